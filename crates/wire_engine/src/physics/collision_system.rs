//! Collider registry for one simulation space
//!
//! Owns the colliders of the active room, runs pairwise collision detection
//! with layer filtering, resolves moving circles against static geometry and
//! serves raycasts. All queries read a consistent snapshot: callers move
//! colliders first, then query, within one simulation step.

use std::collections::HashSet;

use slotmap::{new_key_type, SlotMap};

use crate::core::config::PhysicsSettings;
use crate::foundation::math::Vec2;
use crate::physics::collision::Collider;
use crate::physics::collision_layers::{should_collide, LayerMask, PhysicsLayer};
use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::raycast::{self, Ray, RaycastFilter, RaycastHit};

new_key_type! {
    /// Stable handle to a collider registered in a [`PhysicsWorld`]
    pub struct ColliderHandle;
}

/// Two colliders that touched during a detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Smaller handle
    pub collider_a: ColliderHandle,
    /// Larger handle
    pub collider_b: ColliderHandle,
}

impl CollisionPair {
    /// Create a new pair (always stores the smaller handle first)
    pub fn new(a: ColliderHandle, b: ColliderHandle) -> Self {
        if a < b {
            Self { collider_a: a, collider_b: b }
        } else {
            Self { collider_a: b, collider_b: a }
        }
    }

    /// True if `handle` is one side of this pair
    pub fn involves(&self, handle: ColliderHandle) -> bool {
        self.collider_a == handle || self.collider_b == handle
    }
}

#[derive(Debug, Clone)]
struct ColliderEntry {
    collider: Collider,
    mask: LayerMask,
}

/// Registry of colliders with detection, resolution and raycast queries
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    colliders: SlotMap<ColliderHandle, ColliderEntry>,
    current_pairs: HashSet<CollisionPair>,
    previous_pairs: HashSet<CollisionPair>,
    settings: PhysicsSettings,
}

impl PhysicsWorld {
    /// Create an empty world with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty world with the given settings
    pub fn with_settings(settings: PhysicsSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    /// Active settings
    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Register a collider that interacts with every layer
    pub fn insert(&mut self, collider: impl Into<Collider>) -> ColliderHandle {
        self.insert_with_mask(collider, LayerMask::all())
    }

    /// Register a collider that only interacts with layers in `mask`
    pub fn insert_with_mask(
        &mut self,
        collider: impl Into<Collider>,
        mask: LayerMask,
    ) -> ColliderHandle {
        self.colliders.insert(ColliderEntry { collider: collider.into(), mask })
    }

    /// Unregister a collider
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.current_pairs.retain(|pair| !pair.involves(handle));
        self.colliders.remove(handle).map(|entry| entry.collider)
    }

    /// Collider behind `handle`
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle).map(|entry| &entry.collider)
    }

    /// Mutable collider behind `handle`, for movement
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle).map(|entry| &mut entry.collider)
    }

    /// Collision mask of a collider
    pub fn mask(&self, handle: ColliderHandle) -> Option<LayerMask> {
        self.colliders.get(handle).map(|entry| entry.mask)
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Registered colliders in registration order
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter().map(|(handle, entry)| (handle, &entry.collider))
    }

    /// Remove every collider and forget collision history
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }

    /// Run detection over every mask-compatible pair
    ///
    /// Listeners fire for each contact. Returns the pairs touching this step.
    pub fn detect_collisions(&mut self) -> &HashSet<CollisionPair> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        let entries: Vec<(ColliderHandle, &ColliderEntry)> = self.colliders.iter().collect();
        for (index, (handle_a, a)) in entries.iter().enumerate() {
            for (handle_b, b) in &entries[index + 1..] {
                if !should_collide(a.collider.layer(), a.mask, b.collider.layer(), b.mask) {
                    continue;
                }
                if a.collider.detect_collision(&b.collider) {
                    self.current_pairs.insert(CollisionPair::new(*handle_a, *handle_b));
                }
            }
        }
        log::trace!(
            "collision pass: {} colliders, {} contacts",
            entries.len(),
            self.current_pairs.len()
        );
        &self.current_pairs
    }

    /// Pairs that started touching in the last detection pass
    pub fn collisions_entered(&self) -> Vec<CollisionPair> {
        self.current_pairs.difference(&self.previous_pairs).copied().collect()
    }

    /// Pairs that stopped touching in the last detection pass
    pub fn collisions_exited(&self) -> Vec<CollisionPair> {
        self.previous_pairs.difference(&self.current_pairs).copied().collect()
    }

    /// Pairs touching after the last detection pass
    pub fn current_collisions(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }

    /// Push a circle collider out of every mask-compatible collider
    ///
    /// Colliders are visited in registration order. Returns whether the
    /// circle moved.
    pub fn resolve_collisions(&mut self, handle: ColliderHandle) -> PhysicsResult<bool> {
        let entry = self.colliders.get(handle).ok_or(PhysicsError::UnknownCollider)?;
        if entry.collider.as_circle().is_none() {
            return Err(PhysicsError::UnsupportedPair {
                operation: "resolve_collisions",
                this: entry.collider.kind_name(),
                other: "PhysicsWorld",
            });
        }

        let mut moving = entry.collider.clone();
        let mask = entry.mask;
        let mut moved = false;
        for (other_handle, other) in &self.colliders {
            if other_handle == handle
                || !should_collide(moving.layer(), mask, other.collider.layer(), other.mask)
            {
                continue;
            }
            moved |= moving.resolve_collision(&other.collider)?;
        }

        if let Some(entry) = self.colliders.get_mut(handle) {
            entry.collider = moving;
        }
        Ok(moved)
    }

    /// Cast a ray against every registered collider
    pub fn raycast(&self, ray: &Ray, filter: &RaycastFilter) -> Vec<RaycastHit<ColliderHandle>> {
        raycast::raycast(ray, self.iter(), filter)
    }

    /// Cast along `direction` for the configured default ray distance
    pub fn raycast_direction(
        &self,
        source: Vec2,
        direction: Vec2,
        filter: &RaycastFilter,
    ) -> PhysicsResult<Vec<RaycastHit<ColliderHandle>>> {
        let ray = Ray::along(source, direction, self.settings.default_ray_distance)?;
        Ok(self.raycast(&ray, filter))
    }

    /// True if the ray from `source` to `target` ends on `expected`
    ///
    /// This is how a turret decides whether it can see the player: the last
    /// hit after termination must be on the player's layer.
    pub fn has_line_of_sight(
        &self,
        source: Vec2,
        target: Vec2,
        expected: PhysicsLayer,
        filter: &RaycastFilter,
    ) -> bool {
        let hits = self.raycast(&Ray::between(source, target), filter);
        raycast::blocking_hit(&hits).is_some_and(|hit| hit.layer == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::listener::testing::recording;
    use crate::physics::collision::{CircleCollider, LineCollider};
    use approx::assert_relative_eq;

    fn circle(x: f64, y: f64, r: f64, layer: PhysicsLayer) -> CircleCollider {
        CircleCollider::new(Vec2::new(x, y), r, layer).unwrap()
    }

    fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> LineCollider {
        LineCollider::new(Vec2::new(x1, y1), Vec2::new(x2, y2), PhysicsLayer::Solid).unwrap()
    }

    #[test]
    fn test_collision_detection() {
        let mut world = PhysicsWorld::new();
        let a = world.insert(circle(0.0, 0.0, 5.0, PhysicsLayer::Player));
        let b = world.insert(circle(8.0, 0.0, 5.0, PhysicsLayer::Enemy));
        world.insert(circle(50.0, 0.0, 1.0, PhysicsLayer::Item));

        let collisions = world.detect_collisions();
        assert_eq!(collisions.len(), 1);
        assert!(collisions.contains(&CollisionPair::new(b, a)));
    }

    #[test]
    fn test_layer_filtering() {
        let mut world = PhysicsWorld::new();
        world.insert_with_mask(circle(0.0, 0.0, 5.0, PhysicsLayer::Player), LayerMask::ENEMY);
        world.insert(circle(8.0, 0.0, 5.0, PhysicsLayer::Solid));
        assert!(world.detect_collisions().is_empty());
    }

    #[test]
    fn test_entered_and_exited() {
        let mut world = PhysicsWorld::new();
        let player = world.insert(circle(0.0, 0.0, 1.0, PhysicsLayer::Player));
        let item = world.insert(circle(5.0, 0.0, 1.0, PhysicsLayer::Item));
        world.detect_collisions();
        assert!(world.collisions_entered().is_empty());

        world.get_mut(player).unwrap().set_position(Vec2::new(4.0, 0.0));
        world.detect_collisions();
        assert_eq!(world.collisions_entered(), vec![CollisionPair::new(player, item)]);
        assert!(world.collisions_exited().is_empty());

        world.get_mut(player).unwrap().set_position(Vec2::new(-4.0, 0.0));
        world.detect_collisions();
        assert!(world.collisions_entered().is_empty());
        assert_eq!(world.collisions_exited(), vec![CollisionPair::new(player, item)]);
    }

    #[test]
    fn test_detection_fires_listeners() {
        let (events, handle) = recording();
        let mut player = circle(0.0, 0.0, 1.0, PhysicsLayer::Player);
        player.set_listener(Some(handle));

        let mut world = PhysicsWorld::new();
        world.insert(player);
        world.insert(wall(-5.0, 0.5, 5.0, 0.5));
        world.detect_collisions();
        assert_eq!(events.borrow().collisions, vec![(PhysicsLayer::Player, PhysicsLayer::Solid)]);
    }

    #[test]
    fn test_resolve_against_room_walls() {
        let mut world = PhysicsWorld::new();
        world.insert(wall(0.0, 0.0, 10.0, 0.0));
        world.insert(wall(0.0, 0.0, 0.0, 10.0));
        let player = world.insert(circle(0.5, 3.0, 1.0, PhysicsLayer::Player));

        assert!(world.resolve_collisions(player).unwrap());
        assert_relative_eq!(
            world.get(player).unwrap().position(),
            Vec2::new(1.0, 3.0),
            epsilon = 1e-12
        );
        assert!(!world.resolve_collisions(player).unwrap());
    }

    #[test]
    fn test_resolve_skips_masked_layers() {
        let mut world = PhysicsWorld::new();
        world.insert(circle(1.0, 0.0, 1.0, PhysicsLayer::Item));
        let player =
            world.insert_with_mask(circle(0.0, 0.0, 1.0, PhysicsLayer::Player), LayerMask::SOLID);
        assert!(!world.resolve_collisions(player).unwrap());
    }

    #[test]
    fn test_resolve_rejects_static_geometry_and_stale_handles() {
        let mut world = PhysicsWorld::new();
        let segment = world.insert(wall(0.0, 0.0, 1.0, 0.0));
        assert!(matches!(
            world.resolve_collisions(segment),
            Err(PhysicsError::UnsupportedPair { this: "LineCollider", .. })
        ));
        world.remove(segment);
        assert_eq!(world.resolve_collisions(segment), Err(PhysicsError::UnknownCollider));
    }

    #[test]
    fn test_line_of_sight() {
        let mut world = PhysicsWorld::new();
        let (turret, target) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        world.insert(circle(0.0, 0.0, 0.5, PhysicsLayer::Enemy));
        world.insert(circle(10.0, 0.0, 0.5, PhysicsLayer::Player));
        let filter = RaycastFilter::new()
            .terminate_on(LayerMask::SOLID | LayerMask::PLAYER)
            .exclude(LayerMask::ENEMY);

        assert!(world.has_line_of_sight(turret, target, PhysicsLayer::Player, &filter));

        let pillar = world.insert(wall(5.0, -1.0, 5.0, 1.0));
        assert!(!world.has_line_of_sight(turret, target, PhysicsLayer::Player, &filter));

        world.remove(pillar);
        world.insert(wall(5.0, 2.0, 5.0, 4.0));
        assert!(world.has_line_of_sight(turret, target, PhysicsLayer::Player, &filter));
    }

    #[test]
    fn test_raycast_direction_uses_default_distance() {
        let mut world = PhysicsWorld::with_settings(PhysicsSettings { default_ray_distance: 20.0 });
        world.insert(wall(15.0, -1.0, 15.0, 1.0));
        world.insert(wall(25.0, -1.0, 25.0, 1.0));
        let hits =
            world.raycast_direction(Vec2::zeros(), Vec2::x(), &RaycastFilter::new()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].distance, 15.0);
    }
}
