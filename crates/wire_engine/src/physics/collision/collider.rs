//! Closed collider sum type and pairwise dispatch

use crate::foundation::math::Vec2;
use crate::physics::collision_layers::PhysicsLayer;
use crate::physics::error::{PhysicsError, PhysicsResult};

use super::{CircleCollider, CompoundCollider, LineCollider, ListenerHandle};

/// Any collider shape
///
/// Every pair of variants is matched explicitly; pairs without a defined
/// behaviour return [`PhysicsError::UnsupportedPair`].
#[derive(Debug, Clone)]
pub enum Collider {
    /// Line segment
    Line(LineCollider),
    /// Circle
    Circle(CircleCollider),
    /// Group of children sharing a layer and listener
    Compound(CompoundCollider),
}

impl Collider {
    /// Variant name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "LineCollider",
            Self::Circle(_) => "CircleCollider",
            Self::Compound(_) => "CompoundCollider",
        }
    }

    /// Physics layer
    pub fn layer(&self) -> PhysicsLayer {
        match self {
            Self::Line(line) => line.layer(),
            Self::Circle(circle) => circle.layer(),
            Self::Compound(compound) => compound.layer(),
        }
    }

    /// Set the physics layer (compounds fan out to children)
    pub fn set_layer(&mut self, layer: PhysicsLayer) {
        match self {
            Self::Line(line) => line.set_layer(layer),
            Self::Circle(circle) => circle.set_layer(layer),
            Self::Compound(compound) => compound.set_layer(layer),
        }
    }

    /// Collision listener, if any
    pub fn listener(&self) -> Option<&ListenerHandle> {
        match self {
            Self::Line(line) => line.listener(),
            Self::Circle(circle) => circle.listener(),
            Self::Compound(compound) => compound.listener(),
        }
    }

    /// Set or clear the listener (compounds fan out to children)
    pub fn set_listener(&mut self, listener: Option<ListenerHandle>) {
        match self {
            Self::Line(line) => line.set_listener(listener),
            Self::Circle(circle) => circle.set_listener(listener),
            Self::Compound(compound) => compound.set_listener(listener),
        }
    }

    /// Reference position: first endpoint, center, or compound anchor
    pub fn position(&self) -> Vec2 {
        match self {
            Self::Line(line) => line.pos1(),
            Self::Circle(circle) => circle.center(),
            Self::Compound(compound) => compound.position(),
        }
    }

    /// Move the reference position, translating the whole shape
    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Self::Line(line) => line.set_position(position),
            Self::Circle(circle) => circle.set_position(position),
            Self::Compound(compound) => compound.set_position(position),
        }
    }

    /// Translate the whole shape
    pub fn move_by(&mut self, delta: Vec2) {
        match self {
            Self::Line(line) => line.move_by(delta),
            Self::Circle(circle) => circle.move_by(delta),
            Self::Compound(compound) => compound.move_by(delta),
        }
    }

    /// Closest point of the shape to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        match self {
            Self::Line(line) => line.closest_point(point),
            Self::Circle(circle) => circle.closest_point(point),
            Self::Compound(compound) => compound.closest_point(point),
        }
    }

    /// Pure overlap test between two colliders
    pub fn intersects(&self, other: &Collider) -> bool {
        match (self, other) {
            (Self::Compound(compound), _) => compound.intersects(other),
            (_, Self::Compound(compound)) => compound.intersects(self),
            (Self::Line(a), Self::Line(b)) => a.intersects_line(b),
            (Self::Line(line), Self::Circle(circle)) | (Self::Circle(circle), Self::Line(line)) => {
                line.intersects_circle(circle)
            }
            (Self::Circle(a), Self::Circle(b)) => a.intersects_circle(b),
        }
    }

    /// Overlap test that notifies both sides' listeners on contact
    ///
    /// Each side's listener is optional and independent. Compounds on either
    /// side run detection per child, so each colliding child reports
    /// separately and the callback count does not depend on argument order.
    pub fn detect_collision(&self, other: &Collider) -> bool {
        if let Self::Compound(compound) = self {
            return compound.detect_collision(other);
        }
        if let Self::Compound(compound) = other {
            let mut collided = false;
            for child in compound.children() {
                collided |= self.detect_collision(child);
            }
            return collided;
        }
        if !self.intersects(other) {
            return false;
        }
        if let Some(listener) = self.listener() {
            listener.notify(|l| l.on_collision(self, other));
        }
        if let Some(listener) = other.listener() {
            listener.notify(|l| l.on_collision(other, self));
        }
        true
    }

    /// Push this collider out of `other`
    ///
    /// Only circles can be resolved; lines and compounds are static
    /// geometry and report [`PhysicsError::UnsupportedPair`].
    pub fn resolve_collision(&mut self, other: &Collider) -> PhysicsResult<bool> {
        match self {
            Self::Circle(circle) => Ok(circle.resolve_collision(other)),
            Self::Line(_) | Self::Compound(_) => Err(PhysicsError::UnsupportedPair {
                operation: "resolve_collision",
                this: self.kind_name(),
                other: other.kind_name(),
            }),
        }
    }

    /// Line variant, if this is one
    pub fn as_line(&self) -> Option<&LineCollider> {
        match self {
            Self::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Circle variant, if this is one
    pub fn as_circle(&self) -> Option<&CircleCollider> {
        match self {
            Self::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// Compound variant, if this is one
    pub fn as_compound(&self) -> Option<&CompoundCollider> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }
}

impl From<LineCollider> for Collider {
    fn from(line: LineCollider) -> Self {
        Self::Line(line)
    }
}

impl From<CircleCollider> for Collider {
    fn from(circle: CircleCollider) -> Self {
        Self::Circle(circle)
    }
}

impl From<CompoundCollider> for Collider {
    fn from(compound: CompoundCollider) -> Self {
        Self::Compound(compound)
    }
}
