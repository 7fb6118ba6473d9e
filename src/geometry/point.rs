use std::ops::{Add, Neg, Sub};

use crate::math::Vector2d;

/// Fixed-point scaled coordinate. One unit is [`SCALING_FACTOR`] millimetres.
pub type Coord = i64;

/// Millimetres per coordinate unit.
pub const SCALING_FACTOR: f64 = 0.000_001;

/// Coordinate magnitude bound: 30 bits plus sign.
///
/// The exact orientation predicate multiplies pairs of coordinates in 64-bit
/// arithmetic, so inputs must stay within this bound. It is enforced with a
/// `debug_assert!` at construction; release builds trust the caller.
pub const MAX_COORD: Coord = 1 << 30;

/// Converts a value in millimetres to scaled coordinates.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn scale(v: f64) -> Coord {
    (v / SCALING_FACTOR).round() as Coord
}

/// Converts a scaled coordinate back to millimetres.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unscale(v: Coord) -> f64 {
    v as f64 * SCALING_FACTOR
}

/// 2D point in fixed-point scaled coordinates.
///
/// Immutable once constructed; owned by the polygon or polyline holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    /// Creates a new point.
    ///
    /// Coordinates must stay within ±[`MAX_COORD`]; violations are caught by
    /// `debug_assert!` only.
    #[must_use]
    pub fn new(x: Coord, y: Coord) -> Self {
        debug_assert!(x.abs() <= MAX_COORD && y.abs() <= MAX_COORD);
        Self { x, y }
    }

    /// Squared distance to another point, exact in integer arithmetic.
    #[must_use]
    pub fn distance_to_sq(&self, other: &Self) -> i128 {
        let dx = i128::from(self.x - other.x);
        let dy = i128::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.distance_to_sq(other) as f64).sqrt()
    }

    /// Floating-point view of this point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_vec2d(self) -> Vector2d {
        Vector2d::new(self.x as f64, self.y as f64)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_unscale_roundtrip() {
        let mm = 12.345;
        let scaled = scale(mm);
        assert!((unscale(scaled) - mm).abs() < SCALING_FACTOR);
    }

    #[test]
    fn distance_exact() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance_to_sq(&b), 25);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn arithmetic_ops() {
        let a = Point::new(1, 2);
        let b = Point::new(10, 20);
        assert_eq!(a + b, Point::new(11, 22));
        assert_eq!(b - a, Point::new(9, 18));
        assert_eq!(-a, Point::new(-1, -2));
    }

    #[test]
    fn distance_at_coordinate_bound() {
        // The largest representable deltas must not overflow.
        let a = Point::new(-MAX_COORD, -MAX_COORD);
        let b = Point::new(MAX_COORD, MAX_COORD);
        let d_sq = a.distance_to_sq(&b);
        assert_eq!(d_sq, 2 * i128::from(MAX_COORD) * i128::from(MAX_COORD) * 4);
    }
}
