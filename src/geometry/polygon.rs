use super::line::Line;
use super::point::Point;
use crate::error::GeometryError;
use crate::math::orient::is_ccw;

/// Closed polygon over fixed-point scaled coordinates.
///
/// The last point implicitly connects back to the first. Invariants expected
/// by the algorithms in this crate: at least 3 points, no duplicate adjacent
/// points. [`Polygon::new`] enforces them at ingestion; the unchecked
/// [`Polygon::from_points`] exists for internal use and degenerate-tolerant
/// call sites such as convex hulls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon, removing duplicate adjacent points first.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewPoints`] if fewer than 3 points remain
    /// after deduplication.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        let mut polygon = Self { points };
        polygon.remove_duplicate_points();
        if polygon.points.len() < 3 {
            return Err(GeometryError::TooFewPoints { min: 3, actual: polygon.points.len() });
        }
        Ok(polygon)
    }

    /// Creates a polygon without validation.
    #[must_use]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Removes duplicate adjacent points, including the closing pair.
    pub fn remove_duplicate_points(&mut self) {
        self.points.dedup();
        while self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
    }

    /// Boundary segments, including the closing segment.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n).map(|i| Line::new(self.points[i], self.points[(i + 1) % n])).collect()
    }

    /// Signed area (shoelace formula): positive for counter-clockwise.
    ///
    /// Accumulated exactly in 128-bit integers before the final conversion.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum: i128 = 0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            sum += i128::from(p.x) * i128::from(q.y) - i128::from(q.x) * i128::from(p.y);
        }
        sum as f64 * 0.5
    }

    /// Absolute enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Winding test via the exact corner predicate.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        is_ccw(&self.points)
    }

    /// Reverses the point order, flipping the winding.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Normalizes the winding to counter-clockwise.
    pub fn make_counter_clockwise(&mut self) {
        if !self.is_counter_clockwise() {
            self.reverse();
        }
    }

    /// Normalizes the winding to clockwise.
    pub fn make_clockwise(&mut self) {
        if self.is_counter_clockwise() {
            self.reverse();
        }
    }

    /// Even-odd containment test.
    ///
    /// Points exactly on the boundary may report either side; callers that
    /// care about boundary points must not rely on this test.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        #[allow(clippy::cast_precision_loss)]
        self.contains_xy(point.x as f64, point.y as f64)
    }

    /// Even-odd containment for an arbitrary (possibly off-grid) position.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn contains_xy(&self, x: f64, y: f64) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let pi = self.points[i];
            let pj = self.points[j];
            let (yi, yj) = (pi.y as f64, pj.y as f64);
            if (yi > y) != (yj > y) {
                let x_cross = (pj.x - pi.x) as f64 * (y - yi) / (yj - yi) + pi.x as f64;
                if x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Douglas-Peucker simplification of the closed boundary.
    #[must_use]
    pub fn simplify(&self, tolerance: f64) -> Self {
        if self.points.len() < 3 {
            return self.clone();
        }
        // Close the ring so the last segment participates, then reopen.
        let mut ring = self.points.clone();
        ring.push(ring[0]);
        let mut simplified = super::polyline::douglas_peucker(&ring, tolerance);
        simplified.pop();
        Self { points: simplified }
    }
}

/// Simplifies each polygon with the given tolerance, dropping any that
/// degenerate below 3 points.
#[must_use]
pub fn simplify_polygons(polygons: &[Polygon], tolerance: f64) -> Vec<Polygon> {
    polygons
        .iter()
        .map(|p| p.simplify(tolerance))
        .filter(|p| p.points.len() >= 3)
        .collect()
}

/// Closed region: one outer contour plus zero or more holes.
///
/// By convention the contour winds counter-clockwise and holes clockwise,
/// although the even-odd containment test does not depend on winding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExPolygon {
    pub contour: Polygon,
    pub holes: Vec<Polygon>,
}

impl ExPolygon {
    /// Creates a region from a contour and holes.
    #[must_use]
    pub fn new(contour: Polygon, holes: Vec<Polygon>) -> Self {
        Self { contour, holes }
    }

    /// Creates a hole-free region.
    #[must_use]
    pub fn from_contour(contour: Polygon) -> Self {
        Self { contour, holes: Vec::new() }
    }

    /// All boundary segments: contour first, then each hole.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        let mut lines = self.contour.lines();
        for hole in &self.holes {
            lines.extend(hole.lines());
        }
        lines
    }

    /// Containment: inside the contour and outside every hole.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        #[allow(clippy::cast_precision_loss)]
        self.contains_xy(point.x as f64, point.y as f64)
    }

    pub(crate) fn contains_xy(&self, x: f64, y: f64) -> bool {
        self.contour.contains_xy(x, y) && !self.holes.iter().any(|h| h.contains_xy(x, y))
    }
}
