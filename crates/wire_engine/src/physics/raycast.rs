//! Layered raycasting against colliders
//!
//! A raycast collects every contact along a finite segment, sorts them by
//! distance from the source and truncates the list at the first hit whose
//! layer is in the termination mask. Weapons use the last element as the
//! thing that stopped the shot; line-of-sight checks compare its layer with
//! the layer they are looking for.

use crate::foundation::math::{utils, Vec2};
use crate::physics::collision::intersection::{self, LineCircleIntersection};
use crate::physics::collision::Collider;
use crate::physics::collision_layers::{LayerMask, PhysicsLayer};
use crate::physics::error::{PhysicsError, PhysicsResult};

/// A finite ray segment from `source` to `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    source: Vec2,
    target: Vec2,
}

impl Ray {
    /// Ray from `source` to an explicit `target`
    pub fn between(source: Vec2, target: Vec2) -> Self {
        Self { source, target }
    }

    /// Ray from `source` along `direction` for `max_distance`
    pub fn along(source: Vec2, direction: Vec2, max_distance: f64) -> PhysicsResult<Self> {
        if !utils::is_finite(source) || !utils::is_finite(direction) {
            return Err(PhysicsError::NonFinitePosition);
        }
        let length = direction.norm();
        if length == 0.0 || !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(PhysicsError::DegenerateRay);
        }
        Ok(Self {
            source,
            target: source + direction * (max_distance / length),
        })
    }

    /// Start point
    pub fn source(&self) -> Vec2 {
        self.source
    }

    /// End point
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Distance from source to target
    pub fn length(&self) -> f64 {
        (self.target - self.source).norm()
    }

    /// Unit direction, `None` for a zero-length ray
    pub fn direction(&self) -> Option<Vec2> {
        let length = self.length();
        (length > 0.0).then(|| (self.target - self.source) / length)
    }

    /// Point at `distance` from the source
    pub fn point_at(&self, distance: f64) -> Vec2 {
        self.direction().map_or(self.source, |dir| self.source + dir * distance)
    }
}

/// Layer filters applied to a raycast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RaycastFilter {
    /// Layers that end the hit list (the terminating hit is kept)
    pub termination: LayerMask,
    /// Layers ignored entirely
    pub exclusion: LayerMask,
}

impl RaycastFilter {
    /// Filter that neither terminates nor excludes anything
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first hit on any of these layers
    pub fn terminate_on(mut self, layers: LayerMask) -> Self {
        self.termination = layers;
        self
    }

    /// Ignore these layers
    pub fn exclude(mut self, layers: LayerMask) -> Self {
        self.exclusion = layers;
        self
    }
}

/// A single contact along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit<K> {
    /// Key of the collider that was hit
    pub collider: K,
    /// Layer of the collider that was hit
    pub layer: PhysicsLayer,
    /// World-space contact point
    pub point: Vec2,
    /// Distance from the ray source to `point`
    pub distance: f64,
}

/// Casts `ray` against `colliders`, returning hits nearest first
///
/// Colliders on excluded layers are skipped. After sorting, the list is cut
/// after the first hit on a termination layer. Equal distances keep the
/// order in which colliders were supplied. The result is empty, never an
/// error, when nothing is hit or the ray has zero length.
pub fn raycast<'a, K, I>(ray: &Ray, colliders: I, filter: &RaycastFilter) -> Vec<RaycastHit<K>>
where
    I: IntoIterator<Item = (K, &'a Collider)>,
{
    if ray.length() == 0.0 {
        log::debug!("raycast with zero length at ({}, {})", ray.source.x, ray.source.y);
        return Vec::new();
    }

    let mut hits: Vec<RaycastHit<K>> = colliders
        .into_iter()
        .filter(|(_, collider)| !filter.exclusion.contains_layer(collider.layer()))
        .filter_map(|(key, collider)| {
            contact_point(ray, collider).map(|point| RaycastHit {
                collider: key,
                layer: collider.layer(),
                point,
                distance: (point - ray.source).norm(),
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    if let Some(index) = hits.iter().position(|hit| filter.termination.contains_layer(hit.layer)) {
        if index + 1 < hits.len() {
            log::trace!(
                "raycast terminated on {} after {} of {} hits",
                hits[index].layer.name(),
                index + 1,
                hits.len()
            );
        }
        hits.truncate(index + 1);
    }
    hits
}

/// First contact of `ray` with a single collider
///
/// A tangent contact reports its single point. Circles crossed twice report
/// the crossing nearer the source. Compounds are tested as the union of
/// their children. Ties keep the earlier candidate.
pub fn contact_point(ray: &Ray, collider: &Collider) -> Option<Vec2> {
    match collider {
        Collider::Line(line) => {
            intersection::segment_intersection(ray.source, ray.target, line.pos1(), line.pos2())
        }
        Collider::Circle(circle) => {
            let crossing = intersection::segment_circle_intersection(
                ray.source,
                ray.target,
                circle.center(),
                circle.radius(),
            );
            match crossing {
                LineCircleIntersection::None => None,
                LineCircleIntersection::Tangent(point) | LineCircleIntersection::Half(point) => {
                    Some(point)
                }
                LineCircleIntersection::Full(first, second) => {
                    nearest_to(ray.source, [first, second])
                }
            }
        }
        Collider::Compound(compound) => nearest_to(
            ray.source,
            compound.children().iter().filter_map(|child| contact_point(ray, child)),
        ),
    }
}

/// Candidate closest to `origin`; the first one wins on equal distance
fn nearest_to(origin: Vec2, candidates: impl IntoIterator<Item = Vec2>) -> Option<Vec2> {
    candidates.into_iter().reduce(|best, candidate| {
        if (candidate - origin).norm_squared() < (best - origin).norm_squared() {
            candidate
        } else {
            best
        }
    })
}

/// The hit that stopped the ray: the last one after termination
pub fn blocking_hit<K>(hits: &[RaycastHit<K>]) -> Option<&RaycastHit<K>> {
    hits.last()
}
