use std::cell::Cell;
use std::ops::Mul;

use nalgebra::{Rotation3, UnitQuaternion};

use crate::geometry::BoundingBox3;
use crate::math::angles::is_rotation_xyz_ninety_degrees;
use crate::math::{Matrix3d, Matrix4d, Vector3d, EPSILON};

/// Assembles a 4x4 affine matrix from the given components, applied in the
/// order: mirror, scale, rotate X, rotate Y, rotate Z, translate.
#[must_use]
pub fn assemble_transform(
    translation: &Vector3d,
    rotation: &Vector3d,
    scale: &Vector3d,
    mirror: &Vector3d,
) -> Matrix4d {
    let rx = Rotation3::from_axis_angle(&Vector3d::x_axis(), rotation.x).to_homogeneous();
    let ry = Rotation3::from_axis_angle(&Vector3d::y_axis(), rotation.y).to_homogeneous();
    let rz = Rotation3::from_axis_angle(&Vector3d::z_axis(), rotation.z).to_homogeneous();
    let s = Matrix4d::new_nonuniform_scaling(&scale.component_mul(mirror));
    Matrix4d::new_translation(translation) * rz * ry * rx * s
}

/// Euler angles (radians, XYZ convention) extracted from a rotation matrix
/// assembled as `Rz * Ry * Rx`.
///
/// The matrix must not contain scale or shear. Near the gimbal-lock
/// configuration (`|r20| == 1`) the Z angle is fixed at zero and the X angle
/// absorbs the remaining rotation.
#[must_use]
pub fn extract_euler_angles(rotation: &Matrix3d) -> Vector3d {
    let r20 = rotation[(2, 0)].clamp(-1.0, 1.0);
    if r20.abs() < 1.0 - 1e-9 {
        let y = -r20.asin();
        let x = rotation[(2, 1)].atan2(rotation[(2, 2)]);
        let z = rotation[(1, 0)].atan2(rotation[(0, 0)]);
        Vector3d::new(x, y, z)
    } else if r20 < 0.0 {
        // y = +π/2
        Vector3d::new(rotation[(0, 1)].atan2(rotation[(0, 2)]), std::f64::consts::FRAC_PI_2, 0.0)
    } else {
        // y = -π/2
        Vector3d::new(
            (-rotation[(0, 1)]).atan2(-rotation[(0, 2)]),
            -std::f64::consts::FRAC_PI_2,
            0.0,
        )
    }
}

/// Rotation taking a coordinate system with Euler rotation `rot_xyz_from`
/// applied into one with `rot_xyz_to` applied.
#[must_use]
pub fn rotation_xyz_diff(rot_xyz_from: &Vector3d, rot_xyz_to: &Vector3d) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3d::z_axis(), rot_xyz_to.z)
        * UnitQuaternion::from_axis_angle(&Vector3d::y_axis(), rot_xyz_to.y)
        * UnitQuaternion::from_axis_angle(&Vector3d::x_axis(), rot_xyz_to.x)
        * UnitQuaternion::from_axis_angle(&Vector3d::x_axis(), -rot_xyz_from.x)
        * UnitQuaternion::from_axis_angle(&Vector3d::y_axis(), -rot_xyz_from.y)
        * UnitQuaternion::from_axis_angle(&Vector3d::z_axis(), -rot_xyz_from.z)
}

/// Z rotation aligning `rot_xyz_from` to `rot_xyz_to`.
///
/// Only meaningful when the two rotations are known to differ by a rotation
/// around Z alone; this is a `debug_assert!`ed contract.
#[must_use]
pub fn rotation_diff_z(rot_xyz_from: &Vector3d, rot_xyz_to: &Vector3d) -> f64 {
    match rotation_xyz_diff(rot_xyz_from, rot_xyz_to).axis_angle() {
        Some((axis, angle)) => {
            debug_assert!(axis.x.abs() < 1e-8 && axis.y.abs() < 1e-8);
            if axis.z < 0.0 {
                -angle
            } else {
                angle
            }
        }
        None => 0.0,
    }
}

/// Which components [`Transformation::get_matrix`] omitted; part of the
/// cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Flags {
    dont_translate: bool,
    dont_rotate: bool,
    dont_scale: bool,
    dont_mirror: bool,
}

#[derive(Debug, Clone, Copy)]
struct CachedMatrix {
    flags: Flags,
    matrix: Matrix4d,
}

/// Composable rigid transformation: offset, per-axis Euler rotation,
/// non-uniform scale and per-axis mirror.
///
/// The assembled 4x4 matrix is cached lazily; any setter invalidates the
/// cache, and the flag combination passed to [`Transformation::get_matrix`]
/// is part of the cache key. The cache uses interior mutability (`Cell`),
/// which makes this type single-owner: it is intentionally not `Sync`.
#[derive(Debug, Clone)]
pub struct Transformation {
    offset: Vector3d,
    rotation: Vector3d,
    scaling_factor: Vector3d,
    mirror: Vector3d,
    cache: Cell<Option<CachedMatrix>>,
}

impl Default for Transformation {
    fn default() -> Self {
        Self {
            offset: Vector3d::zeros(),
            rotation: Vector3d::zeros(),
            scaling_factor: Vector3d::repeat(1.0),
            mirror: Vector3d::repeat(1.0),
            cache: Cell::new(None),
        }
    }
}

impl Transformation {
    /// Identity transformation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a transformation by decomposing an affine matrix into offset,
    /// rotation, scale and mirror components.
    ///
    /// A negative determinant is folded into a mirror along Z. Shear is not
    /// representable and is silently dropped.
    #[must_use]
    pub fn from_matrix(matrix: &Matrix4d) -> Self {
        let mut result = Self::new();
        result.set_from_matrix(matrix);
        result
    }

    #[must_use]
    pub fn offset(&self) -> &Vector3d {
        &self.offset
    }

    pub fn set_offset(&mut self, offset: Vector3d) {
        self.offset = offset;
        self.cache.set(None);
    }

    #[must_use]
    pub fn rotation(&self) -> &Vector3d {
        &self.rotation
    }

    /// Sets the Euler rotation (radians per axis).
    pub fn set_rotation(&mut self, rotation: Vector3d) {
        self.rotation = rotation;
        self.cache.set(None);
    }

    #[must_use]
    pub fn scaling_factor(&self) -> &Vector3d {
        &self.scaling_factor
    }

    pub fn set_scaling_factor(&mut self, scaling_factor: Vector3d) {
        self.scaling_factor = scaling_factor;
        self.cache.set(None);
    }

    #[must_use]
    pub fn is_scaling_uniform(&self) -> bool {
        (self.scaling_factor.x - self.scaling_factor.y).abs() < 1e-8
            && (self.scaling_factor.x - self.scaling_factor.z).abs() < 1e-8
    }

    #[must_use]
    pub fn mirror(&self) -> &Vector3d {
        &self.mirror
    }

    pub fn set_mirror(&mut self, mirror: Vector3d) {
        self.mirror = mirror;
        self.cache.set(None);
    }

    /// A transformation is left-handed when an odd number of axes mirror.
    #[must_use]
    pub fn is_left_handed(&self) -> bool {
        self.mirror.x * self.mirror.y * self.mirror.z < 0.0
    }

    /// Resets to identity.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Replaces all components by decomposing `matrix`.
    pub fn set_from_matrix(&mut self, matrix: &Matrix4d) {
        let offset = Vector3d::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        let m3: Matrix3d = matrix.fixed_view::<3, 3>(0, 0).into_owned();

        let mut scale = Vector3d::new(m3.column(0).norm(), m3.column(1).norm(), m3.column(2).norm());
        let mut mirror = Vector3d::repeat(1.0);

        let mut columns = [
            m3.column(0).into_owned(),
            m3.column(1).into_owned(),
            m3.column(2).into_owned(),
        ];
        for (col, s) in columns.iter_mut().zip(scale.iter()) {
            if *s > EPSILON {
                *col /= *s;
            }
        }
        if m3.determinant() < 0.0 {
            // Fold the reflection into the Z axis.
            mirror.z = -1.0;
            columns[2] = -columns[2];
        }
        if scale.x <= EPSILON {
            scale.x = 1.0;
        }
        if scale.y <= EPSILON {
            scale.y = 1.0;
        }
        if scale.z <= EPSILON {
            scale.z = 1.0;
        }

        let rotation_matrix = Matrix3d::from_columns(&columns);

        self.offset = offset;
        self.rotation = extract_euler_angles(&rotation_matrix);
        self.scaling_factor = scale;
        self.mirror = mirror;
        self.cache.set(None);
    }

    /// The assembled matrix, optionally omitting individual components.
    ///
    /// Recomputes only when a component changed or the flag combination
    /// differs from the cached one.
    #[must_use]
    pub fn get_matrix(
        &self,
        dont_translate: bool,
        dont_rotate: bool,
        dont_scale: bool,
        dont_mirror: bool,
    ) -> Matrix4d {
        let flags = Flags { dont_translate, dont_rotate, dont_scale, dont_mirror };
        if let Some(cached) = self.cache.get() {
            if cached.flags == flags {
                return cached.matrix;
            }
        }
        let translation = if dont_translate { Vector3d::zeros() } else { self.offset };
        let rotation = if dont_rotate { Vector3d::zeros() } else { self.rotation };
        let scale = if dont_scale { Vector3d::repeat(1.0) } else { self.scaling_factor };
        let mirror = if dont_mirror { Vector3d::repeat(1.0) } else { self.mirror };
        let matrix = assemble_transform(&translation, &rotation, &scale, &mirror);
        self.cache.set(Some(CachedMatrix { flags, matrix }));
        matrix
    }

    /// The full assembled matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix4d {
        self.get_matrix(false, false, false, false)
    }

    /// Finds a volume transformation so that the chained
    /// `instance * volume` is as close to identity as possible, in the
    /// least-squares sense over the 8 corners of `bbox`.
    ///
    /// `bbox` is expected to be centered around zero on all axes.
    #[must_use]
    pub fn volume_to_bed_transformation(instance: &Self, bbox: &BoundingBox3) -> Self {
        let mut out = Self::new();

        if instance.is_scaling_uniform() {
            // No fitting needed: the inverse of the non-translating matrix
            // is exact.
            let m = instance.get_matrix(true, false, false, false);
            out.set_from_matrix(&m.try_inverse().unwrap_or_else(Matrix4d::identity));
        } else if is_rotation_xyz_ninety_degrees(instance.rotation()) {
            // Anisotropic scaling, rotation by multiples of ninety degrees:
            // axis-aligned scale transfers exactly, fit it on the corners.
            let rot = instance.rotation();
            let instance_rotation = (Rotation3::from_axis_angle(&Vector3d::z_axis(), rot.z)
                * Rotation3::from_axis_angle(&Vector3d::y_axis(), rot.y)
                * Rotation3::from_axis_angle(&Vector3d::x_axis(), rot.x))
            .matrix()
            .into_owned();
            let volume_rotation = (Rotation3::from_axis_angle(&Vector3d::x_axis(), -rot.x)
                * Rotation3::from_axis_angle(&Vector3d::y_axis(), -rot.y)
                * Rotation3::from_axis_angle(&Vector3d::z_axis(), -rot.z))
            .matrix()
            .into_owned();

            let linear = instance_rotation
                * Matrix3d::from_diagonal(
                    &instance.scaling_factor().component_mul(instance.mirror()),
                )
                * volume_rotation;
            let inverse = linear.try_inverse().unwrap_or_else(Matrix3d::identity);

            // Least-squares per-axis scale over the bounding box corners.
            let mut num = Vector3d::zeros();
            let mut den = Vector3d::zeros();
            for corner in bbox.corners() {
                let p = corner.coords;
                let q = inverse * p;
                num += p.component_mul(&q);
                den += p.component_mul(&p);
            }
            let scale = Vector3d::new(
                if den.x > 0.0 { num.x / den.x } else { 1.0 },
                if den.y > 0.0 { num.y / den.y } else { 1.0 },
                if den.z > 0.0 { num.z / den.z } else { 1.0 },
            );

            out.set_rotation(extract_euler_angles(&volume_rotation));
            out.set_scaling_factor(Vector3d::new(scale.x.abs(), scale.y.abs(), scale.z.abs()));
            out.set_mirror(Vector3d::new(
                if scale.x > 0.0 { 1.0 } else { -1.0 },
                if scale.y > 0.0 { 1.0 } else { -1.0 },
                if scale.z > 0.0 { 1.0 } else { -1.0 },
            ));
        } else {
            // General anisotropic scaling with general rotation: keep the
            // volume in the instance coordinate system, undo the scale only.
            out.set_scaling_factor(Vector3d::new(
                1.0 / instance.scaling_factor().x,
                1.0 / instance.scaling_factor().y,
                1.0 / instance.scaling_factor().z,
            ));
        }

        out
    }
}

impl Mul for &Transformation {
    type Output = Transformation;

    /// Composes two transformations by multiplying their matrices; the
    /// product is decomposed back into components without reinterpreting the
    /// order of operations.
    fn mul(self, rhs: Self) -> Transformation {
        Transformation::from_matrix(&(self.matrix() * rhs.matrix()))
    }
}
