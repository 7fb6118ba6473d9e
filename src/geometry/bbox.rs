use crate::math::{Point3d, Vector2d, Vector3d};

/// Axis-aligned 3D bounding box in floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3 {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox3 {
    /// Creates a box from explicit corners.
    #[must_use]
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all points; `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point3d]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self { min: *first, max: *first };
        for p in &points[1..] {
            bbox.merge_point(p);
        }
        Some(bbox)
    }

    /// Expands the box to contain `point`.
    pub fn merge_point(&mut self, point: &Point3d) {
        self.min = Point3d::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3d::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Point3d {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vector3d {
        self.max - self.min
    }

    /// The 8 corners, in the fixed order used by the least-squares fit in
    /// `volume_to_bed_transformation` (min-z face first, x fastest).
    #[must_use]
    pub fn corners(&self) -> [Point3d; 8] {
        let (mn, mx) = (self.min, self.max);
        [
            Point3d::new(mn.x, mn.y, mn.z),
            Point3d::new(mx.x, mn.y, mn.z),
            Point3d::new(mn.x, mx.y, mn.z),
            Point3d::new(mx.x, mx.y, mn.z),
            Point3d::new(mn.x, mn.y, mx.z),
            Point3d::new(mx.x, mn.y, mx.z),
            Point3d::new(mn.x, mx.y, mx.z),
            Point3d::new(mx.x, mx.y, mx.z),
        ]
    }
}

/// Axis-aligned 2D bounding box in floating-point coordinates, used for bed
/// arrangement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2f {
    pub min: Vector2d,
    pub max: Vector2d,
}

impl BoundingBox2f {
    /// Creates a box from explicit corners.
    #[must_use]
    pub fn new(min: Vector2d, max: Vector2d) -> Self {
        Self { min, max }
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vector2d {
        self.max - self.min
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vector2d {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_points_and_accessors() {
        let bbox = BoundingBox3::from_points(&[
            Point3d::new(1.0, -2.0, 3.0),
            Point3d::new(-1.0, 4.0, 0.0),
            Point3d::new(0.5, 0.5, 5.0),
        ])
        .unwrap();
        assert_eq!(bbox.min, Point3d::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, Point3d::new(1.0, 4.0, 5.0));
        assert_eq!(bbox.size(), Vector3d::new(2.0, 6.0, 5.0));
        assert_eq!(bbox.center(), Point3d::new(0.0, 1.0, 2.5));
    }

    #[test]
    fn empty_input() {
        assert!(BoundingBox3::from_points(&[]).is_none());
    }

    #[test]
    fn corners_cover_extremes() {
        let bbox = BoundingBox3::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 2.0, 3.0));
        let corners = bbox.corners();
        assert_eq!(corners.len(), 8);
        assert!(corners.contains(&Point3d::new(0.0, 0.0, 0.0)));
        assert!(corners.contains(&Point3d::new(1.0, 2.0, 3.0)));
        assert!(corners.contains(&Point3d::new(1.0, 0.0, 3.0)));
    }

    #[test]
    fn bbox2f_size_center() {
        let bed = BoundingBox2f::new(Vector2d::new(0.0, 0.0), Vector2d::new(200.0, 200.0));
        assert_eq!(bed.size(), Vector2d::new(200.0, 200.0));
        assert_eq!(bed.center(), Vector2d::new(100.0, 100.0));
    }
}
