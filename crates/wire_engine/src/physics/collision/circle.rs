//! Circle collider with push-out resolution

use crate::foundation::math::{utils, Vec2, EPSILON};
use crate::physics::collision_layers::PhysicsLayer;
use crate::physics::error::{PhysicsError, PhysicsResult};

use super::{Collider, CompoundCollider, LineCollider, ListenerHandle};

/// A circle with a strictly positive radius
#[derive(Debug, Clone)]
pub struct CircleCollider {
    center: Vec2,
    radius: f64,
    layer: PhysicsLayer,
    listener: Option<ListenerHandle>,
}

impl CircleCollider {
    /// Creates a circle collider
    pub fn new(center: Vec2, radius: f64, layer: PhysicsLayer) -> PhysicsResult<Self> {
        if !utils::is_finite(center) {
            return Err(PhysicsError::NonFinitePosition);
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Self { center, radius, layer, listener: None })
    }

    /// Center position
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Radius
    pub fn radius(&self) -> f64 {
        self.radius
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

    /// Translate the center
    pub fn move_by(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Move the center to `position`
    pub fn set_position(&mut self, position: Vec2) {
        self.center = position;
    }

    /// Circle/circle test (touching counts)
    pub fn intersects_circle(&self, other: &CircleCollider) -> bool {
        (self.center - other.center).norm() <= self.radius + other.radius
    }

    /// Circle/segment test, delegated to the segment
    pub fn intersects_line(&self, line: &LineCollider) -> bool {
        line.intersects_circle(self)
    }

    /// Overlap depth with another circle, `0.0` when apart
    pub fn circle_overlap(&self, other: &CircleCollider) -> f64 {
        if !self.intersects_circle(other) {
            return 0.0;
        }
        (self.radius + other.radius) - (self.center - other.center).norm()
    }

    /// Closest point on the circle's boundary to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let offset = point - self.center;
        let distance = offset.norm();
        if distance < EPSILON {
            return self.center + Vec2::new(self.radius, 0.0);
        }
        self.center + offset * (self.radius / distance)
    }

    /// Push this circle out of `other` along the minimum translation vector
    ///
    /// Returns whether the circle moved. `on_resolution` fires on this
    /// circle's listener after every actual displacement.
    pub fn resolve_collision(&mut self, other: &Collider) -> bool {
        match other {
            Collider::Line(line) => self.resolve_line(line, other),
            Collider::Circle(circle) => self.resolve_circle(circle, other),
            Collider::Compound(compound) => self.resolve_compound(compound),
        }
    }

    fn resolve_line(&mut self, line: &LineCollider, other: &Collider) -> bool {
        let closest = line.closest_point(self.center);
        let offset = self.center - closest;
        let distance = offset.norm();
        if distance >= self.radius {
            return false;
        }
        // Center exactly on the segment: push along the segment normal
        let direction = if distance < EPSILON {
            line.normal()
        } else {
            offset / distance
        };
        self.displace(direction * (self.radius - distance), other)
    }

    fn resolve_circle(&mut self, circle: &CircleCollider, other: &Collider) -> bool {
        let overlap = self.circle_overlap(circle);
        if overlap <= 0.0 {
            return false;
        }
        let offset = self.center - circle.center;
        let distance = offset.norm();
        // Concentric circles: pick a fixed axis so resolution stays deterministic
        let direction = if distance < EPSILON {
            Vec2::x()
        } else {
            offset / distance
        };
        self.displace(direction * overlap, other)
    }

    fn resolve_compound(&mut self, compound: &CompoundCollider) -> bool {
        let mut moved = false;
        for child in compound.children() {
            moved |= self.resolve_collision(child);
        }
        moved
    }

    fn displace(&mut self, delta: Vec2, other: &Collider) -> bool {
        if delta.norm_squared() == 0.0 {
            return false;
        }
        self.center += delta;
        log::trace!(
            "resolved {} circle against {} by ({:.4}, {:.4})",
            self.layer.name(),
            other.layer().name(),
            delta.x,
            delta.y
        );
        if let Some(listener) = &self.listener {
            listener.notify(|l| l.on_resolution(self, other));
        }
        true
    }
}
