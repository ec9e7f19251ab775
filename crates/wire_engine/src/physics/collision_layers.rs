//! Collision layer system for filtering collision detection and raycasts
//!
//! Every collider carries exactly one [`PhysicsLayer`]. Layers never decide
//! shape dispatch; they only filter which pairs interact and where a raycast
//! stops or passes through.

use bitflags::bitflags;
use serde::{Serialize, Deserialize};

/// Layer tag attached to every collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicsLayer {
    /// Walls and other level geometry that blocks everything
    Solid,
    /// Doors, glass and other geometry that only blocks some queries
    SemiSolid,
    /// The player body
    Player,
    /// Pickups
    Item,
    /// Turrets, drones and the reactor core
    Enemy,
    /// Surfaces that bounce projectiles
    Reflective,
    /// Markers that exist only to be hit by raycasts
    Raycast,
}

impl PhysicsLayer {
    /// Every layer, in declaration order
    pub const ALL: [PhysicsLayer; 7] = [
        Self::Solid,
        Self::SemiSolid,
        Self::Player,
        Self::Item,
        Self::Enemy,
        Self::Reflective,
        Self::Raycast,
    ];

    /// Human readable name for debug logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::SemiSolid => "SemiSolid",
            Self::Player => "Player",
            Self::Item => "Item",
            Self::Enemy => "Enemy",
            Self::Reflective => "Reflective",
            Self::Raycast => "Raycast",
        }
    }
}

bitflags! {
    /// Set of physics layers, used for collision masks and raycast filters
    ///
    /// The default is the empty mask.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// [`PhysicsLayer::Solid`]
        const SOLID = 1 << 0;
        /// [`PhysicsLayer::SemiSolid`]
        const SEMISOLID = 1 << 1;
        /// [`PhysicsLayer::Player`]
        const PLAYER = 1 << 2;
        /// [`PhysicsLayer::Item`]
        const ITEM = 1 << 3;
        /// [`PhysicsLayer::Enemy`]
        const ENEMY = 1 << 4;
        /// [`PhysicsLayer::Reflective`]
        const REFLECTIVE = 1 << 5;
        /// [`PhysicsLayer::Raycast`]
        const RAYCAST = 1 << 6;
    }
}

impl From<PhysicsLayer> for LayerMask {
    fn from(layer: PhysicsLayer) -> Self {
        match layer {
            PhysicsLayer::Solid => Self::SOLID,
            PhysicsLayer::SemiSolid => Self::SEMISOLID,
            PhysicsLayer::Player => Self::PLAYER,
            PhysicsLayer::Item => Self::ITEM,
            PhysicsLayer::Enemy => Self::ENEMY,
            PhysicsLayer::Reflective => Self::REFLECTIVE,
            PhysicsLayer::Raycast => Self::RAYCAST,
        }
    }
}

impl LayerMask {
    /// Build a mask from a list of layers
    ///
    /// # Example
    /// ```
    /// use wire_engine::physics::{LayerMask, PhysicsLayer};
    ///
    /// let walls = LayerMask::of(&[PhysicsLayer::Solid, PhysicsLayer::SemiSolid]);
    /// assert!(walls.contains_layer(PhysicsLayer::SemiSolid));
    /// assert!(!walls.contains_layer(PhysicsLayer::Player));
    /// ```
    pub fn of(layers: &[PhysicsLayer]) -> Self {
        layers.iter().fold(Self::empty(), |acc, &layer| acc | Self::from(layer))
    }

    /// True if `layer` is a member of this mask
    pub fn contains_layer(self, layer: PhysicsLayer) -> bool {
        self.contains(Self::from(layer))
    }
}

/// Check if two colliders should interact based on their layers and masks
///
/// A's layer must be in B's mask and B's layer must be in A's mask.
pub fn should_collide(
    layer_a: PhysicsLayer,
    mask_a: LayerMask,
    layer_b: PhysicsLayer,
    mask_b: LayerMask,
) -> bool {
    mask_b.contains_layer(layer_a) && mask_a.contains_layer(layer_b)
}
