//! Line segment collider

use crate::foundation::math::{utils, Vec2};
use crate::physics::collision_layers::PhysicsLayer;
use crate::physics::error::{PhysicsError, PhysicsResult};

use super::intersection::{self, LineCircleIntersection};
use super::{CircleCollider, ListenerHandle};

/// A finite line segment from `pos1` to `pos2`
#[derive(Debug, Clone)]
pub struct LineCollider {
    pos1: Vec2,
    pos2: Vec2,
    layer: PhysicsLayer,
    listener: Option<ListenerHandle>,
}

impl LineCollider {
    /// Creates a segment collider
    ///
    /// Fails if either endpoint is non-finite or both endpoints coincide.
    pub fn new(pos1: Vec2, pos2: Vec2, layer: PhysicsLayer) -> PhysicsResult<Self> {
        if !utils::is_finite(pos1) || !utils::is_finite(pos2) {
            return Err(PhysicsError::NonFinitePosition);
        }
        if pos1 == pos2 {
            return Err(PhysicsError::DegenerateSegment);
        }
        Ok(Self { pos1, pos2, layer, listener: None })
    }

    /// First endpoint
    pub fn pos1(&self) -> Vec2 {
        self.pos1
    }

    /// Second endpoint
    pub fn pos2(&self) -> Vec2 {
        self.pos2
    }

    /// Segment length
    pub fn length(&self) -> f64 {
        (self.pos2 - self.pos1).norm()
    }

    /// Unit direction from `pos1` to `pos2`
    pub fn direction(&self) -> Vec2 {
        (self.pos2 - self.pos1).normalize()
    }

    /// Unit normal (direction rotated counter-clockwise)
    pub fn normal(&self) -> Vec2 {
        utils::perp(self.direction())
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> Vec2 {
        (self.pos1 + self.pos2) * 0.5
    }

    /// Physics layer
    pub fn layer(&self) -> PhysicsLayer {
        self.layer
    }

    /// Set the physics layer
    pub fn set_layer(&mut self, layer: PhysicsLayer) {
        self.layer = layer;
    }

    /// Collision listener, if any
    pub fn listener(&self) -> Option<&ListenerHandle> {
        self.listener.as_ref()
    }

    /// Set or clear the collision listener
    pub fn set_listener(&mut self, listener: Option<ListenerHandle>) {
        self.listener = listener;
    }

    /// Translate both endpoints
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos1 += delta;
        self.pos2 += delta;
    }

    /// Move `pos1` to `position`, keeping the segment's shape
    pub fn set_position(&mut self, position: Vec2) {
        self.move_by(position - self.pos1);
    }

    /// Segment/segment test, bounded on both segments
    pub fn intersects_line(&self, other: &LineCollider) -> bool {
        self.line_intersection(other).is_some()
    }

    /// Segment/circle test: center within `radius` of the segment
    pub fn intersects_circle(&self, circle: &CircleCollider) -> bool {
        self.distance_to(circle.center()) <= circle.radius()
    }

    /// Crossing point with another segment, if the segments intersect
    pub fn line_intersection(&self, other: &LineCollider) -> Option<Vec2> {
        intersection::segment_intersection(self.pos1, self.pos2, other.pos1, other.pos2)
    }

    /// Bounded crossing points with a circle's boundary
    pub fn circle_intersection(&self, circle: &CircleCollider) -> LineCircleIntersection {
        intersection::segment_circle_intersection(
            self.pos1,
            self.pos2,
            circle.center(),
            circle.radius(),
        )
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        intersection::closest_point_on_segment(self.pos1, self.pos2, point)
    }

    /// Shortest distance from `point` to the segment
    pub fn distance_to(&self, point: Vec2) -> f64 {
        (point - self.closest_point(point)).norm()
    }
}
