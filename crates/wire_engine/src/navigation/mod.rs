//! Grid navigation for enemies
//!
//! - [`tile`] - Tile classification
//! - [`grid`] - The [`RoomGrid`] capability, tile maps and connected rooms
//! - [`pathfinder`] - Eight-directional A* search

pub mod tile;
pub mod grid;
pub mod pathfinder;

pub use tile::TileType;
pub use grid::{MapError, RoomGrid, TileMap, TileRoom};
pub use pathfinder::{solve_path, Path, PathNode, Pathfinder, PathfinderConfig};
