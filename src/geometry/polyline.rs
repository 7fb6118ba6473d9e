use super::line::Line;
use super::point::Point;

/// Open sequence of points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    /// Creates a polyline from points.
    #[must_use]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// A polyline is usable once it has at least two points.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    /// Total path length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    /// Consecutive segments of the path.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        self.points.windows(2).map(|w| Line::new(w[0], w[1])).collect()
    }

    /// Reverses the traversal direction.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Douglas-Peucker simplification.
    #[must_use]
    pub fn simplify(&self, tolerance: f64) -> Self {
        Self { points: douglas_peucker(&self.points, tolerance) }
    }
}

/// Open path annotated with a local stock width at every vertex.
///
/// Invariants: `width.len() == points.len()` and all widths are
/// non-negative. `endpoints` flags which ends of the path are true skeleton
/// endpoints (degree-1 tips) as opposed to cuts at a junction; closed loops
/// carry `(false, false)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThickPolyline {
    pub points: Vec<Point>,
    pub width: Vec<f64>,
    pub endpoints: (bool, bool),
}

impl ThickPolyline {
    /// Total path length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    /// A thick polyline is usable once it has at least two points.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    /// First point of the path.
    ///
    /// # Panics
    ///
    /// Panics if the polyline is empty (callers hold the validity invariant).
    #[must_use]
    pub fn first_point(&self) -> Point {
        self.points[0]
    }

    /// Last point of the path.
    ///
    /// # Panics
    ///
    /// Panics if the polyline is empty (callers hold the validity invariant).
    #[must_use]
    pub fn last_point(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Reverses the traversal direction, widths and endpoint flags included.
    pub fn reverse(&mut self) {
        self.points.reverse();
        self.width.reverse();
        self.endpoints = (self.endpoints.1, self.endpoints.0);
    }
}

impl From<ThickPolyline> for Polyline {
    fn from(thick: ThickPolyline) -> Self {
        Self { points: thick.points }
    }
}

/// Douglas-Peucker polyline simplification with a perpendicular-distance
/// tolerance in scaled units. Endpoints are always kept.
#[must_use]
pub fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0_usize, points.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let anchor = Line::new(points[first], points[last]);
        let mut max_dist = 0.0_f64;
        let mut max_idx = first;
        for (i, point) in points.iter().enumerate().take(last).skip(first + 1) {
            let dist = anchor.distance_to(point);
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }
        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((first, max_idx));
            stack.push((max_idx, last));
        }
    }

    points
        .iter()
        .zip(keep.iter())
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn length_and_lines() {
        let pl = Polyline::from_points(vec![p(0, 0), p(30, 40), p(30, 140)]);
        assert!((pl.length() - 150.0).abs() < 1e-9);
        assert_eq!(pl.lines().len(), 2);
        assert!(pl.is_valid());
        assert!(!Polyline::from_points(vec![p(0, 0)]).is_valid());
    }

    #[test]
    fn douglas_peucker_drops_collinear() {
        let pts = vec![p(0, 0), p(10, 0), p(20, 0), p(30, 0)];
        assert_eq!(douglas_peucker(&pts, 1.0), vec![p(0, 0), p(30, 0)]);
    }

    #[test]
    fn douglas_peucker_keeps_significant_detour() {
        let pts = vec![p(0, 0), p(50, 40), p(100, 0)];
        assert_eq!(douglas_peucker(&pts, 5.0).len(), 3);
        // A tolerance larger than the detour flattens it.
        assert_eq!(douglas_peucker(&pts, 50.0).len(), 2);
    }

    #[test]
    fn thick_polyline_reverse() {
        let mut tp = ThickPolyline {
            points: vec![p(0, 0), p(10, 0), p(20, 0)],
            width: vec![1.0, 2.0, 3.0],
            endpoints: (true, false),
        };
        tp.reverse();
        assert_eq!(tp.points, vec![p(20, 0), p(10, 0), p(0, 0)]);
        assert!((tp.width[0] - 3.0).abs() < f64::EPSILON);
        assert_eq!(tp.endpoints, (false, true));
    }

    #[test]
    fn thick_to_plain_polyline() {
        let tp = ThickPolyline {
            points: vec![p(0, 0), p(10, 0)],
            width: vec![5.0, 5.0],
            endpoints: (true, true),
        };
        let pl: Polyline = tp.into();
        assert_eq!(pl.points.len(), 2);
    }
}
