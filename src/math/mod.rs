pub mod angles;
pub mod convex_hull;
pub mod intersect_2d;
pub mod orient;

/// 2D floating-point vector type.
pub type Vector2d = nalgebra::Vector2<f64>;

/// 3D floating-point vector type.
pub type Vector3d = nalgebra::Vector3<f64>;

/// 3D floating-point point type.
pub type Point3d = nalgebra::Point3<f64>;

/// 3x3 rotation matrix.
pub type Matrix3d = nalgebra::Matrix3<f64>;

/// 4x4 affine transformation matrix.
pub type Matrix4d = nalgebra::Matrix4<f64>;

/// Parallelism / degeneracy threshold for floating-point computations on
/// scaled coordinates. Coordinates are large integers (one unit = 1e-6 mm),
/// so this is far below any representable feature size.
pub const EPSILON: f64 = 1e-4;
