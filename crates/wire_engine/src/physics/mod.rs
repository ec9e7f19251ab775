//! Physics module for collision detection, resolution and raycasting
//!
//! Colliders are 2D lines, circles and compounds of both. The raycast engine
//! resolves ordered hit lists against any set of colliders, and
//! [`PhysicsWorld`] holds the colliders of one room.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;
pub mod error;
pub mod raycast;

pub use collision::{
    CircleCollider,
    Collider,
    CollisionListener,
    CompoundCollider,
    IntersectionKind,
    LineCircleIntersection,
    LineCollider,
    ListenerHandle,
};
pub use collision_layers::{LayerMask, PhysicsLayer};
pub use collision_system::{ColliderHandle, CollisionPair, PhysicsWorld};
pub use error::{PhysicsError, PhysicsResult};
pub use raycast::{Ray, RaycastFilter, RaycastHit};
