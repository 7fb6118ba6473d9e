use super::{Vector2d, EPSILON};

/// Intersection of two infinite rays `p1 + t·v1` and `p2 + u·v2`.
///
/// Returns `None` when the rays are parallel (`|denom| < EPSILON`). No
/// bounds check is applied; both rays are treated as infinite lines.
#[must_use]
pub fn ray_ray_intersection(
    p1: &Vector2d,
    v1: &Vector2d,
    p2: &Vector2d,
    v2: &Vector2d,
) -> Option<Vector2d> {
    let denom = v1.x * v2.y - v2.x * v1.y;
    if denom.abs() < EPSILON {
        return None;
    }
    let t = (v2.x * (p1.y - p2.y) - v2.y * (p1.x - p2.x)) / denom;
    Some(Vector2d::new(p1.x + t * v1.x, p1.y + t * v1.y))
}

/// Intersection of the segments `p1 → p1 + v1` and `p2 → p2 + v2`.
///
/// Solves the same 2x2 system as [`ray_ray_intersection`] but validates that
/// the intersection lies within `[0, 1]` on both segments before performing
/// any division: the numerators are sign-normalized against the denominator
/// and compared directly, so out-of-range intersections are rejected without
/// a spurious divide. Returns `None` for parallel or collinear segments and
/// for intersections outside either segment.
#[must_use]
pub fn segment_segment_intersection(
    p1: &Vector2d,
    v1: &Vector2d,
    p2: &Vector2d,
    v2: &Vector2d,
) -> Option<Vector2d> {
    let mut denom = v1.x * v2.y - v2.x * v1.y;
    if denom.abs() < EPSILON {
        // Lines are collinear.
        return None;
    }
    let s12_x = p1.x - p2.x;
    let s12_y = p1.y - p2.y;
    let mut s_numer = v1.x * s12_y - v1.y * s12_x;
    let mut denom_negated = false;
    if denom < 0.0 {
        denom_negated = true;
        denom = -denom;
        s_numer = -s_numer;
    }
    if s_numer < 0.0 {
        // Intersection outside of the 1st segment.
        return None;
    }
    // The numerators must carry the same normalization as the denominator.
    let mut t_numer = v2.x * s12_y - v2.y * s12_x;
    if denom_negated {
        t_numer = -t_numer;
    }
    if t_numer < 0.0 || s_numer > denom || t_numer > denom {
        // Intersection outside of the 1st or 2nd segment.
        return None;
    }
    // Intersection inside both of the segments.
    let t = t_numer / denom;
    Some(Vector2d::new(p1.x + t * v1.x, p1.y + t * v1.y))
}
