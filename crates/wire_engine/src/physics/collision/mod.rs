//! Collider shapes and intersection algorithms
//!
//! # Module Organization
//!
//! - [`intersection`] - Bounded segment/segment and segment/circle math
//! - [`line`], [`circle`], [`compound`] - The three collider shapes
//! - [`collider`] - The closed [`Collider`] sum type with pairwise dispatch
//! - [`listener`] - Weak collision callbacks

pub mod intersection;
pub mod listener;
pub mod line;
pub mod circle;
pub mod compound;
pub mod collider;

pub use intersection::{IntersectionKind, LineCircleIntersection};
pub use listener::{CollisionListener, ListenerHandle};
pub use line::LineCollider;
pub use circle::CircleCollider;
pub use compound::CompoundCollider;
pub use collider::Collider;
