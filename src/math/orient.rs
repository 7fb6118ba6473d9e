use crate::geometry::point::Point;

/// Result of the exact orientation predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Ccw,
    Cw,
    Collinear,
}

/// Returns the turn direction of the point triple `(a, b, c)`.
///
/// The predicate is exact for [`Point`] coordinates: with inputs bounded to
/// 30 bits plus sign, each cross term `u`, `v`, `w` fits in 61 bits plus
/// sign and `d = u - v + w` fits in 63 bits plus sign, so the 64-bit
/// temporaries never overflow. The coordinate bound is enforced at point
/// construction, not here.
#[must_use]
pub fn orient(a: Point, b: Point, c: Point) -> Orientation {
    let u = b.x * c.y - b.y * c.x;
    let v = a.x * c.y - a.y * c.x;
    let w = a.x * b.y - a.y * b.x;
    let d = u - v + w;
    match d.cmp(&0) {
        std::cmp::Ordering::Greater => Orientation::Ccw,
        std::cmp::Ordering::Less => Orientation::Cw,
        std::cmp::Ordering::Equal => Orientation::Collinear,
    }
}

/// Returns `true` if the closed point sequence winds counter-clockwise.
///
/// Finds the lexicographically smallest point (by x, then y) and evaluates
/// [`orient`] on the corner around it; that corner cannot be collinear for a
/// polygon free of duplicate points and overlapping edges, and its turn
/// direction equals the overall winding.
///
/// Fewer than 3 points is a contract violation: caught by `debug_assert!`,
/// best-effort `true` in release builds.
#[must_use]
pub fn is_ccw(points: &[Point]) -> bool {
    debug_assert!(points.len() >= 3);
    if points.len() < 3 {
        return true;
    }

    // 1) Find the lowest lexicographical point.
    let mut imin = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let pmin = &points[imin];
        if p.x < pmin.x || (p.x == pmin.x && p.y < pmin.y) {
            imin = i;
        }
    }

    // 2) Detect the orientation of the corner at imin.
    let iprev = (imin + points.len() - 1) % points.len();
    let inext = (imin + 1) % points.len();
    let o = orient(points[iprev], points[imin], points[inext]);
    debug_assert!(o != Orientation::Collinear);
    o == Orientation::Ccw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn basic_turns() {
        assert_eq!(orient(p(0, 0), p(1, 0), p(1, 1)), Orientation::Ccw);
        assert_eq!(orient(p(0, 0), p(1, 1), p(1, 0)), Orientation::Cw);
        assert_eq!(orient(p(0, 0), p(1, 1), p(2, 2)), Orientation::Collinear);
    }

    #[test]
    fn antisymmetry() {
        let triples = [
            (p(0, 0), p(5, 1), p(2, 7)),
            (p(-3, 4), p(10, -2), p(6, 6)),
            (p(100, 0), p(0, 100), p(-100, -1)),
        ];
        for (a, b, c) in triples {
            let fwd = orient(a, b, c);
            let rev = orient(c, b, a);
            match fwd {
                Orientation::Ccw => assert_eq!(rev, Orientation::Cw),
                Orientation::Cw => assert_eq!(rev, Orientation::Ccw),
                Orientation::Collinear => assert_eq!(rev, Orientation::Collinear),
            }
        }
    }

    #[test]
    fn cyclic_invariance() {
        let (a, b, c) = (p(1, 2), p(7, 3), p(4, 9));
        let o = orient(a, b, c);
        assert_eq!(orient(b, c, a), o);
        assert_eq!(orient(c, a, b), o);
    }

    #[test]
    fn exact_at_coordinate_bound() {
        // Nearly-collinear triple at the documented 30-bit bound; a floating
        // point cross product would round this to zero.
        let m = 1_i64 << 30;
        assert_eq!(orient(p(-m, -m), p(0, 0), p(m, m - 1)), Orientation::Cw);
        assert_eq!(orient(p(-m, -m), p(0, 0), p(m, m)), Orientation::Collinear);
    }

    #[test]
    fn winding_detection() {
        let ccw = [p(0, 0), p(10, 0), p(10, 10), p(0, 10)];
        let cw: Vec<Point> = ccw.iter().rev().copied().collect();
        assert!(is_ccw(&ccw));
        assert!(!is_ccw(&cw));
    }

    #[test]
    fn winding_reversal_flips() {
        let poly = [p(0, 0), p(40, 5), p(50, 30), p(20, 45), p(-10, 20)];
        let rev: Vec<Point> = poly.iter().rev().copied().collect();
        assert_ne!(is_ccw(&poly), is_ccw(&rev));
    }
}
