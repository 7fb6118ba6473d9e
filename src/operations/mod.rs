pub mod arrange;
pub mod chain;
pub mod medial_axis;
pub mod transform;

pub use arrange::arrange;
pub use chain::{chain_polygons, chained_path, chained_path_from, chained_path_items};
pub use medial_axis::MedialAxis;
pub use transform::{
    assemble_transform, extract_euler_angles, rotation_diff_z, rotation_xyz_diff, Transformation,
};
