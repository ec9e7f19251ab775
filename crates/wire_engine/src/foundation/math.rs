//! Math utilities and types
//!
//! Provides the 2D vector types used as the coordinate system for all
//! physics and navigation code. World positions are `f64`, grid cells `i32`.

pub use nalgebra::Vector2;

/// 2D world-space vector type
pub type Vec2 = Vector2<f64>;

/// 2D grid cell type
pub type Vec2i = Vector2<i32>;

/// Tolerance for exact-tangency and parallel-line classification
pub const EPSILON: f64 = 1e-9;

/// Math constants
pub mod constants {
    /// Cost of one diagonal grid step
    pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;
}

/// Math utility functions
pub mod utils {
    use super::{Vec2, Vec2i};

    /// Counter-clockwise perpendicular of `v`
    pub fn perp(v: Vec2) -> Vec2 {
        Vec2::new(-v.y, v.x)
    }

    /// Scalar 2D cross product (z component of the 3D cross product)
    pub fn cross(a: Vec2, b: Vec2) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Unsigned angle between two directions in radians
    ///
    /// Returns 0.0 if either vector has zero length.
    pub fn angle_between(a: Vec2, b: Vec2) -> f64 {
        if a.norm_squared() == 0.0 || b.norm_squared() == 0.0 {
            return 0.0;
        }
        a.angle(&b)
    }

    /// True if every component is finite
    pub fn is_finite(v: Vec2) -> bool {
        v.x.is_finite() && v.y.is_finite()
    }

    /// World-space center of a grid cell
    pub fn cell_center(cell: Vec2i, tile_size: f64) -> Vec2 {
        Vec2::new(
            (f64::from(cell.x) + 0.5) * tile_size,
            (f64::from(cell.y) + 0.5) * tile_size,
        )
    }

    /// Grid cell containing a world-space point
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_to_cell(point: Vec2, tile_size: f64) -> Vec2i {
        Vec2i::new(
            (point.x / tile_size).floor() as i32,
            (point.y / tile_size).floor() as i32,
        )
    }
}
