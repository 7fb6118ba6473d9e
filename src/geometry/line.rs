use std::f64::consts::PI;

use super::point::{Coord, Point};
use crate::math::Vector2d;

/// Directed 2D segment between two scaled-coordinate points.
///
/// Derived quantities (length, direction, distance) are computed on demand,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    /// Creates a new directed segment from `a` to `b`.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }

    /// Displacement vector from `a` to `b`.
    #[must_use]
    pub fn vector(&self) -> Vector2d {
        self.b.to_vec2d() - self.a.to_vec2d()
    }

    /// Direction angle in `(-π, π]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn direction(&self) -> f64 {
        ((self.b.y - self.a.y) as f64).atan2((self.b.x - self.a.x) as f64)
    }

    /// Direction angle normalized to `[0, 2π)`.
    #[must_use]
    pub fn orientation(&self) -> f64 {
        let angle = self.direction();
        if angle < 0.0 {
            angle + 2.0 * PI
        } else {
            angle
        }
    }

    /// Midpoint of the segment (rounded to the integer grid).
    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::new((self.a.x + self.b.x) / 2, (self.a.y + self.b.y) / 2)
    }

    /// Minimum distance from `point` to this segment.
    ///
    /// The projection parameter is clamped to the segment, so endpoints are
    /// handled without a special case. A zero-length segment degenerates to
    /// point distance.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_to(&self, point: &Point) -> f64 {
        let dx = (self.b.x - self.a.x) as f64;
        let dy = (self.b.y - self.a.y) as f64;
        let len_sq = dx * dx + dy * dy;
        if len_sq <= 0.0 {
            return point.distance_to(&self.a);
        }
        let px = (point.x - self.a.x) as f64;
        let py = (point.y - self.a.y) as f64;
        let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
        let cx = px - t * dx;
        let cy = py - t * dy;
        cx.hypot(cy)
    }
}

/// 3D point in fixed-point scaled coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point3 {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

impl Point3 {
    /// Creates a new 3D point.
    #[must_use]
    pub fn new(x: Coord, y: Coord, z: Coord) -> Self {
        Self { x, y, z }
    }
}

/// Directed 3D segment between two scaled-coordinate points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line3 {
    pub a: Point3,
    pub b: Point3,
}

impl Line3 {
    /// Creates a new directed 3D segment from `a` to `b`.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self { a, b }
    }

    /// Displacement vector from `a` to `b`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn vector(&self) -> crate::math::Vector3d {
        crate::math::Vector3d::new(
            (self.b.x - self.a.x) as f64,
            (self.b.y - self.a.y) as f64,
            (self.b.z - self.a.z) as f64,
        )
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }
}
