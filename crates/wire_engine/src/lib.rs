//! # Wire Engine
//!
//! Physics and navigation core for a wireframe first-person shooter played
//! on a 2D tile grid.
//!
//! ## Features
//!
//! - **Colliders**: Lines, circles and compounds with bounded intersection math
//! - **Raycasting**: Ordered hit lists with layer termination and exclusion
//! - **Collision World**: Pair tracking with entered/exited events
//! - **Pathfinding**: Eight-directional A* that never cuts wall corners
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wire_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     config.init_logging();
//!
//!     let mut world = PhysicsWorld::with_settings(config.physics.clone());
//!     let (wall_top, wall_bottom) = (Vec2::new(5.0, -5.0), Vec2::new(5.0, 5.0));
//!     world.insert(LineCollider::new(wall_top, wall_bottom, PhysicsLayer::Solid)?);
//!     world.insert(CircleCollider::new(Vec2::new(8.0, 0.0), 0.5, PhysicsLayer::Player)?);
//!
//!     let filter = RaycastFilter::new().terminate_on(LayerMask::SOLID);
//!     let player = Vec2::new(8.0, 0.0);
//!     let visible = world.has_line_of_sight(Vec2::zeros(), player, PhysicsLayer::Player, &filter);
//!     assert!(!visible);
//!
//!     let map: TileMap = "#####\n#...#\n#####".parse()?;
//!     let pathfinder = Pathfinder::new(config.navigation.clone());
//!     let path = pathfinder.solve_path(Vec2i::new(1, 1), Vec2i::new(3, 1), &map);
//!     assert!(path.is_some());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Engine-wide configuration
pub mod core;

pub mod config;
pub mod foundation;
pub mod physics;
pub mod navigation;

pub use core::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::math::{Vec2, Vec2i},
        navigation::{Path, Pathfinder, PathfinderConfig, RoomGrid, TileMap, TileRoom, TileType},
        physics::{
            CircleCollider, Collider, CollisionListener, CompoundCollider, LayerMask, LineCollider,
            ListenerHandle, PhysicsError, PhysicsLayer, PhysicsResult, PhysicsWorld, Ray,
            RaycastFilter, RaycastHit,
        },
        EngineConfig,
    };
}
