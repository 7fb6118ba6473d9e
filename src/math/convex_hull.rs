use super::orient::{orient, Orientation};
use super::Vector3d;
use crate::geometry::point::Point;
use crate::geometry::polygon::Polygon;

/// Planar convex hull of a point cloud (monotone chain).
///
/// Returns the hull in counter-clockwise order without a repeated closing
/// point. Degenerate input is not an error: fewer than 3 distinct points, or
/// an all-collinear cloud, yield the minimal polygon spanning the extremes.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Polygon {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_unstable_by(|a, b| (a.x, a.y).cmp(&(b.x, b.y)));
    pts.dedup();

    let n = pts.len();
    if n < 3 {
        return Polygon::from_points(pts);
    }

    let mut hull: Vec<Point> = Vec::with_capacity(2 * n);

    // Lower hull.
    for &p in &pts {
        while hull.len() >= 2
            && orient(hull[hull.len() - 2], hull[hull.len() - 1], p) != Orientation::Ccw
        {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper hull.
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && orient(hull[hull.len() - 2], hull[hull.len() - 1], p) != Orientation::Ccw
        {
            hull.pop();
        }
        hull.push(p);
    }

    // First point is repeated as the last one.
    hull.pop();
    Polygon::from_points(hull)
}

/// Convex hull over the union of several polygons' vertices.
#[must_use]
pub fn convex_hull_polygons(polygons: &[Polygon]) -> Polygon {
    let points: Vec<Point> = polygons.iter().flat_map(|p| p.points.iter().copied()).collect();
    convex_hull(&points)
}

/// Convex hull of a 3D point cloud projected onto the XY plane.
///
/// The hull is computed over x/y only; each hull vertex keeps its original z.
/// This is the contract needed for out-of-bed detection of transformed
/// objects, where only the footprint matters. Output is counter-clockwise
/// when viewed from +Z. Degenerate input yields the minimal chain.
#[must_use]
pub fn convex_hull_3d(points: &[Vector3d]) -> Vec<Vector3d> {
    let mut pts: Vec<Vector3d> = points.to_vec();
    pts.sort_unstable_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    pts.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    let n = pts.len();
    if n < 3 {
        return pts;
    }

    let cross =
        |o: &Vector3d, a: &Vector3d, b: &Vector3d| (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x);

    let mut hull: Vec<Vector3d> = Vec::with_capacity(2 * n);
    for p in &pts {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn square_with_interior_points() {
        let pts = [
            p(0, 0),
            p(10, 0),
            p(10, 10),
            p(0, 10),
            p(5, 5),
            p(3, 7),
            p(9, 1),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.points.len(), 4);
        assert!(hull.is_counter_clockwise());
        for corner in [p(0, 0), p(10, 0), p(10, 10), p(0, 10)] {
            assert!(hull.points.contains(&corner), "missing {corner:?}");
        }
    }

    #[test]
    fn collinear_cloud_collapses() {
        let pts = [p(0, 0), p(5, 5), p(2, 2), p(9, 9)];
        let hull = convex_hull(&pts);
        // All collinear: the hull degenerates to the two extremes.
        assert_eq!(hull.points.len(), 2);
        assert!(hull.points.contains(&p(0, 0)));
        assert!(hull.points.contains(&p(9, 9)));
    }

    #[test]
    fn duplicates_and_tiny_input() {
        assert_eq!(convex_hull(&[p(1, 1), p(1, 1)]).points.len(), 1);
        assert!(convex_hull(&[]).points.is_empty());
    }

    #[test]
    fn hull_of_polygons_union() {
        let a = Polygon::from_points(vec![p(0, 0), p(4, 0), p(4, 4), p(0, 4)]);
        let b = Polygon::from_points(vec![p(6, 1), p(10, 1), p(10, 3)]);
        let hull = convex_hull_polygons(&[a, b]);
        assert!(hull.points.contains(&p(0, 0)));
        assert!(hull.points.contains(&p(10, 1)));
        assert!(hull.points.contains(&p(10, 3)));
        // Interior vertex of the union must not survive.
        assert!(!hull.points.contains(&p(6, 1)));
    }

    #[test]
    fn hull_3d_keeps_z() {
        let pts = [
            Vector3d::new(0.0, 0.0, 1.0),
            Vector3d::new(10.0, 0.0, 2.0),
            Vector3d::new(10.0, 10.0, 3.0),
            Vector3d::new(0.0, 10.0, 4.0),
            Vector3d::new(5.0, 5.0, 99.0),
        ];
        let hull = convex_hull_3d(&pts);
        assert_eq!(hull.len(), 4);
        // Interior point dropped, z values carried through.
        assert!(hull.iter().all(|v| (v.z - 99.0).abs() > 1e-9));
        assert!(hull.iter().any(|v| (v.z - 3.0).abs() < 1e-12));
    }

    #[test]
    fn hull_3d_degenerate() {
        let pts = [Vector3d::new(1.0, 2.0, 3.0), Vector3d::new(4.0, 5.0, 6.0)];
        assert_eq!(convex_hull_3d(&pts).len(), 2);
    }
}
