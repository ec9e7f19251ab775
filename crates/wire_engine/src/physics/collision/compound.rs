//! Compound collider built from a fixed set of children

use crate::foundation::math::Vec2;
use crate::physics::collision_layers::PhysicsLayer;
use crate::physics::error::{PhysicsError, PhysicsResult};

use super::{Collider, ListenerHandle};

/// A fixed list of child colliders sharing one layer and one listener
///
/// Layer and listener changes fan out to every child immediately.
#[derive(Debug, Clone)]
pub struct CompoundCollider {
    children: Vec<Collider>,
    origin: Vec2,
    layer: PhysicsLayer,
    listener: Option<ListenerHandle>,
}

impl CompoundCollider {
    /// Creates a compound from its children, assigning them `layer`
    ///
    /// Any listener a child carried is cleared; listeners are set through
    /// the compound. The compound's position is the first child's position
    /// at creation.
    pub fn new(children: Vec<Collider>, layer: PhysicsLayer) -> PhysicsResult<Self> {
        let origin = children.first().ok_or(PhysicsError::EmptyCompound)?.position();
        let mut compound = Self { children, origin, layer, listener: None };
        compound.set_layer(layer);
        compound.set_listener(None);
        Ok(compound)
    }

    /// Child colliders
    pub fn children(&self) -> &[Collider] {
        &self.children
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false; a compound has at least one child
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Shared physics layer
    pub fn layer(&self) -> PhysicsLayer {
        self.layer
    }

    /// Set the layer on the compound and every child
    pub fn set_layer(&mut self, layer: PhysicsLayer) {
        self.layer = layer;
        for child in &mut self.children {
            child.set_layer(layer);
        }
    }

    /// Shared collision listener, if any
    pub fn listener(&self) -> Option<&ListenerHandle> {
        self.listener.as_ref()
    }

    /// Set the listener on the compound and every child
    pub fn set_listener(&mut self, listener: Option<ListenerHandle>) {
        for child in &mut self.children {
            child.set_listener(listener.clone());
        }
        self.listener = listener;
    }

    /// Anchor position
    pub fn position(&self) -> Vec2 {
        self.origin
    }

    /// Translate every child
    pub fn move_by(&mut self, delta: Vec2) {
        self.origin += delta;
        for child in &mut self.children {
            child.move_by(delta);
        }
    }

    /// Move the anchor to `position`, translating every child with it
    pub fn set_position(&mut self, position: Vec2) {
        self.move_by(position - self.origin);
    }

    /// True if any child intersects `other`
    pub fn intersects(&self, other: &Collider) -> bool {
        self.children.iter().any(|child| child.intersects(other))
    }

    /// Runs collision detection for every child against `other`
    ///
    /// Each colliding child notifies listeners on its own; the compound
    /// reports true if any child collided.
    pub fn detect_collision(&self, other: &Collider) -> bool {
        let mut collided = false;
        for child in &self.children {
            collided |= child.detect_collision(other);
        }
        collided
    }

    /// Closest point on any child to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        self.children
            .iter()
            .map(|child| child.closest_point(point))
            .min_by(|a, b| (a - point).norm_squared().total_cmp(&(b - point).norm_squared()))
            .unwrap_or(self.origin)
    }
}
