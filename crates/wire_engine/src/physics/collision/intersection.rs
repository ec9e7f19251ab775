//! Segment intersection primitives
//!
//! The analytic core shared by the colliders and the raycast engine. All
//! tests are bounded to the finite segment; an intersection of the infinite
//! extensions never counts.

use crate::foundation::math::{utils, Vec2, EPSILON};

/// Classification of a segment/circle intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionKind {
    /// No contact
    None,
    /// The segment touches the circle at exactly one point
    Tangent,
    /// Only one of the two boundary crossings lies on the segment
    HalfIntersection,
    /// Both boundary crossings lie on the segment
    FullIntersection,
}

/// Result of intersecting a line segment with a circle
///
/// Points are ordered by increasing distance from the segment's first
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCircleIntersection {
    /// No contact
    None,
    /// Single touching point
    Tangent(Vec2),
    /// The one crossing that lies on the segment
    Half(Vec2),
    /// Entry and exit crossings
    Full(Vec2, Vec2),
}

impl LineCircleIntersection {
    /// Kind of this intersection
    pub fn kind(&self) -> IntersectionKind {
        match self {
            Self::None => IntersectionKind::None,
            Self::Tangent(_) => IntersectionKind::Tangent,
            Self::Half(_) => IntersectionKind::HalfIntersection,
            Self::Full(..) => IntersectionKind::FullIntersection,
        }
    }

    /// First valid point, if any
    ///
    /// For a tangent this is the touching point, so `pos1 == pos2`.
    pub fn pos1(&self) -> Option<Vec2> {
        match *self {
            Self::None => None,
            Self::Tangent(p) | Self::Half(p) | Self::Full(p, _) => Some(p),
        }
    }

    /// Second point, valid for tangents (duplicated) and full intersections
    pub fn pos2(&self) -> Option<Vec2> {
        match *self {
            Self::None | Self::Half(_) => None,
            Self::Tangent(p) | Self::Full(_, p) => Some(p),
        }
    }

    /// Valid points in segment order
    pub fn points(&self) -> Vec<Vec2> {
        match *self {
            Self::None => Vec::new(),
            Self::Tangent(p) | Self::Half(p) => vec![p],
            Self::Full(a, b) => vec![a, b],
        }
    }

    /// True unless this is [`LineCircleIntersection::None`]
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Parametric positions of the crossing of segments `a-b` and `c-d`
///
/// Returns `(t_ab, t_cd)` with the point at `a + (b - a) * t_ab`. Parallel
/// segments yield `None`. The computation is symmetric: swapping the
/// segments swaps the two scalars bit for bit.
pub fn segment_params(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<(f64, f64)> {
    let e = b - a;
    let f = d - c;
    if utils::cross(e, f).abs() <= EPSILON * e.norm() * f.norm() {
        return None;
    }
    let q = utils::perp(f);
    let p = utils::perp(e);
    let t_ab = (c - a).dot(&q) / e.dot(&q);
    let t_cd = (a - c).dot(&p) / f.dot(&p);
    Some((t_ab, t_cd))
}

/// Intersection point of two finite segments
///
/// Both scalars must lie in `[0, 1]` (inclusive).
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let (t_ab, t_cd) = segment_params(a, b, c, d)?;
    let unit = 0.0..=1.0;
    (unit.contains(&t_ab) && unit.contains(&t_cd)).then(|| a + (b - a) * t_ab)
}

/// Closest point to `point` on segment `a-b`
pub fn closest_point_on_segment(a: Vec2, b: Vec2, point: Vec2) -> Vec2 {
    let e = b - a;
    let length_sq = e.norm_squared();
    if length_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(&e) / length_sq).clamp(0.0, 1.0);
    a + e * t
}

/// Bounded intersection of segment `a-b` with a circle
pub fn segment_circle_intersection(
    a: Vec2,
    b: Vec2,
    center: Vec2,
    radius: f64,
) -> LineCircleIntersection {
    let length = (b - a).norm();
    if length == 0.0 {
        return LineCircleIntersection::None;
    }
    let direction = (b - a) / length;

    // Projection of the center onto the infinite line
    let t = (center - a).dot(&direction);
    let d_ec = (center - (a + direction * t)).norm();
    let on_segment = |s: f64| (-EPSILON..=length + EPSILON).contains(&s);

    if (d_ec - radius).abs() <= EPSILON {
        return if on_segment(t) {
            LineCircleIntersection::Tangent(a + direction * t)
        } else {
            LineCircleIntersection::None
        };
    }
    if d_ec > radius {
        return LineCircleIntersection::None;
    }

    let dt = (radius * radius - d_ec * d_ec).sqrt();
    let (near, far) = (t - dt, t + dt);
    match (on_segment(near), on_segment(far)) {
        (true, true) => LineCircleIntersection::Full(a + direction * near, a + direction * far),
        (true, false) => LineCircleIntersection::Half(a + direction * near),
        (false, true) => LineCircleIntersection::Half(a + direction * far),
        (false, false) => LineCircleIntersection::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_crossing_segments() {
        let hit = segment_intersection(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0)).unwrap();
        assert_relative_eq!(hit, v(1.0, 1.0));
    }

    #[test]
    fn test_infinite_extensions_do_not_count() {
        assert!(segment_params(v(0.0, 0.0), v(1.0, 0.0), v(5.0, 5.0), v(5.0, 6.0)).is_some());
        assert!(segment_intersection(v(0.0, 0.0), v(1.0, 0.0), v(5.0, 5.0), v(5.0, 6.0)).is_none());
    }

    #[test]
    fn test_other_segment_bound_is_checked() {
        // Crossing lies inside the first segment but beyond the end of the second
        let a = (v(-5.0, 0.0), v(5.0, 0.0));
        let b = (v(0.0, 1.0), v(0.0, 3.0));
        let (t_ab, t_cd) = segment_params(a.0, a.1, b.0, b.1).unwrap();
        assert!((0.0..=1.0).contains(&t_ab));
        assert!(t_cd < 0.0);
        assert!(segment_intersection(a.0, a.1, b.0, b.1).is_none());
    }

    #[test]
    fn test_touching_endpoints_are_inclusive() {
        let hit = segment_intersection(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)).unwrap();
        assert_relative_eq!(hit, v(1.0, 0.0));
    }

    #[test]
    fn test_parallel_segments() {
        assert!(segment_params(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 1.0)).is_none());
        assert!(segment_intersection(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(3.0, 0.0)).is_none());
    }

    #[test]
    fn test_closest_point_is_clamped() {
        let (a, b) = (v(0.0, 0.0), v(4.0, 0.0));
        assert_relative_eq!(closest_point_on_segment(a, b, v(2.0, 3.0)), v(2.0, 0.0));
        assert_relative_eq!(closest_point_on_segment(a, b, v(-3.0, 1.0)), a);
        assert_relative_eq!(closest_point_on_segment(a, b, v(9.0, -1.0)), b);
    }

    #[test]
    fn test_full_circle_intersection() {
        let hit = segment_circle_intersection(v(-5.0, 0.0), v(5.0, 0.0), v(0.0, 0.0), 1.0);
        assert_eq!(hit.kind(), IntersectionKind::FullIntersection);
        assert_relative_eq!(hit.pos1().unwrap(), v(-1.0, 0.0));
        assert_relative_eq!(hit.pos2().unwrap(), v(1.0, 0.0));
    }

    #[test]
    fn test_half_circle_intersection() {
        let hit = segment_circle_intersection(v(0.5, 0.0), v(5.0, 0.0), v(0.0, 0.0), 1.0);
        assert_eq!(hit.kind(), IntersectionKind::HalfIntersection);
        assert_relative_eq!(hit.pos1().unwrap(), v(1.0, 0.0));
        assert!(hit.pos2().is_none());
    }

    #[test]
    fn test_half_intersection_on_entry_side() {
        let hit = segment_circle_intersection(v(-5.0, 0.0), v(0.0, 0.0), v(0.0, 0.0), 1.0);
        assert_eq!(hit, LineCircleIntersection::Half(v(-1.0, 0.0)));
    }

    #[test]
    fn test_tangent_circle_intersection() {
        let hit = segment_circle_intersection(v(-5.0, 1.0), v(5.0, 1.0), v(0.0, 0.0), 1.0);
        assert_eq!(hit.kind(), IntersectionKind::Tangent);
        assert_eq!(hit.pos1(), hit.pos2());
        assert_relative_eq!(hit.pos1().unwrap(), v(0.0, 1.0));
    }

    #[test]
    fn test_no_circle_intersection() {
        let miss = segment_circle_intersection(v(-5.0, 2.0), v(5.0, 2.0), v(0.0, 0.0), 1.0);
        assert_eq!(miss, LineCircleIntersection::None);
        assert!(miss.points().is_empty());

        // Infinite line would cross, but the segment stops short
        let short = segment_circle_intersection(v(3.0, 0.0), v(5.0, 0.0), v(0.0, 0.0), 1.0);
        assert_eq!(short, LineCircleIntersection::None);

        // Segment entirely inside the circle never crosses the boundary
        let inside = segment_circle_intersection(v(-0.2, 0.0), v(0.2, 0.0), v(0.0, 0.0), 1.0);
        assert_eq!(inside, LineCircleIntersection::None);
    }
}
