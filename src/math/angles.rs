use std::f64::consts::PI;

use super::Vector3d;

/// Returns `true` when two direction angles are parallel within `max_diff`,
/// in either orientation.
#[must_use]
pub fn directions_parallel(angle1: f64, angle2: f64, max_diff: f64) -> bool {
    let diff = (angle1 - angle2).abs();
    diff < max_diff + 1e-9 || (diff - PI).abs() < max_diff + 1e-9
}

/// Radians to degrees.
#[must_use]
pub fn rad2deg(angle: f64) -> f64 {
    180.0 * angle / PI
}

/// Degrees to radians.
#[must_use]
pub fn deg2rad(angle: f64) -> f64 {
    PI * angle / 180.0
}

/// Radians to degrees, treating the input as a direction: opposite
/// directions map to the same value in `[0, 180)`.
#[must_use]
pub fn rad2deg_dir(angle: f64) -> f64 {
    let angle = if angle < PI { angle + PI / 2.0 } else { angle - PI / 2.0 };
    let angle = if angle < 0.0 { angle + PI } else { angle };
    rad2deg(angle)
}

/// Normalizes an angle to `[0, 2π]`.
#[must_use]
pub fn angle_to_0_2pi(angle: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut angle = angle;
    while angle < 0.0 {
        angle += two_pi;
    }
    while two_pi < angle {
        angle -= two_pi;
    }
    angle
}

/// Linear remap of `value` from `[oldmin, oldmax]` to `[newmin, newmax]`.
#[must_use]
pub fn linint(value: f64, oldmin: f64, oldmax: f64, newmin: f64, newmax: f64) -> f64 {
    newmin + (value - oldmin) * (newmax - newmin) / (oldmax - oldmin)
}

/// Is the angle close to a multiple of 90 degrees?
#[must_use]
pub fn is_rotation_ninety_degrees(a: f64) -> bool {
    let mut a = a.abs() % (0.5 * PI);
    if a > 0.25 * PI {
        a = 0.5 * PI - a;
    }
    a < 0.001
}

/// Are all three Euler angles close to multiples of 90 degrees?
#[must_use]
pub fn is_rotation_xyz_ninety_degrees(rotation: &Vector3d) -> bool {
    is_rotation_ninety_degrees(rotation.x)
        && is_rotation_ninety_degrees(rotation.y)
        && is_rotation_ninety_degrees(rotation.z)
}
