pub mod bbox;
pub mod line;
pub mod point;
pub mod polygon;
pub mod polyline;

pub use bbox::{BoundingBox2f, BoundingBox3};
pub use line::{Line, Line3, Point3};
pub use point::{scale, unscale, Coord, Point};
pub use polygon::{simplify_polygons, ExPolygon, Polygon};
pub use polyline::{douglas_peucker, Polyline, ThickPolyline};
