mod diagram;
mod validate;
mod walk;

use std::f64::consts::{FRAC_PI_4, PI};

use crate::error::Result;
use crate::geometry::line::Line as Segment;
use crate::geometry::point::Coord;
use crate::geometry::{ExPolygon, Point, Polyline, ThickPolyline};
use crate::math::Vector2d;

/// Extracts the medial axis of a region as thick polylines.
///
/// The skeleton is the Voronoi diagram of the boundary segments, pruned to
/// the part that runs between facing boundary walls, annotated with the local
/// wall-to-wall width and chained into maximal paths. The prime consumer is
/// thin-wall detection: regions narrower than a nozzle-width band collapse to
/// their centerline.
#[derive(Debug)]
pub struct MedialAxis<'a> {
    region: &'a ExPolygon,
    max_width: f64,
    min_width: f64,
    facing_tolerance: f64,
    corner_angle: f64,
}

impl<'a> MedialAxis<'a> {
    /// Creates a medial axis extraction for `region`.
    ///
    /// Edges whose width lies wholly above `max_width` or wholly below
    /// `min_width` (both in scaled units) are discarded.
    #[must_use]
    pub fn new(region: &'a ExPolygon, max_width: f64, min_width: f64) -> Self {
        Self {
            region,
            max_width,
            min_width,
            facing_tolerance: PI / 5.0,
            corner_angle: 3.0 * FRAC_PI_4,
        }
    }

    /// Overrides how far from antiparallel (π) two boundary segments may be
    /// while still counting as facing walls.
    ///
    /// The default of π/5 keeps only proper thin-wall centerlines; a tolerance
    /// of π disables the filter entirely, which admits the corner spokes of
    /// the raw skeleton (a square region then yields its four diagonals).
    #[must_use]
    pub fn with_facing_tolerance(mut self, tolerance: f64) -> Self {
        self.facing_tolerance = tolerance;
        self
    }

    /// Overrides the maximum direction change across a degree-2 vertex before
    /// the path is split there.
    ///
    /// Defaults to 3π/4: ordinary skeletons kink by up to about π/2 where a
    /// filtered spoke leaves a vertex (a square hole's ring does), so only
    /// near-reversals split.
    #[must_use]
    pub fn with_corner_angle(mut self, angle: f64) -> Self {
        self.corner_angle = angle;
        self
    }

    /// Runs the extraction.
    ///
    /// Degenerate regions produce an empty result. Paths whose ends both
    /// reach a skeleton tip are dropped when shorter than twice `max_width`;
    /// surviving free ends are extended to the region boundary. An extended
    /// tip keeps the width of the skeleton vertex it was moved from, so on a
    /// tapering feature the reported tip width is the last interior width,
    /// not the (zero) stock at the boundary itself.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if the Voronoi construction rejects
    /// the boundary.
    pub fn build(&self) -> Result<Vec<ThickPolyline>> {
        // A two-point contour degenerates to a pair of overlapping opposite
        // segments, which the diagram builder rejects.
        if self.region.contour.points.len() < 3 {
            return Ok(Vec::new());
        }
        let lines: Vec<Segment> =
            self.region.lines().into_iter().filter(|l| l.a != l.b).collect();
        if lines.len() < 3 {
            return Ok(Vec::new());
        }

        let graph = diagram::build(&lines)?;
        let geometry = validate::apply(
            &graph,
            &lines,
            self.region,
            self.min_width,
            self.max_width,
            self.facing_tolerance,
        );
        let paths = walk::assemble(&graph, &geometry, self.corner_angle.cos());

        let mut out = Vec::new();
        for mut path in paths {
            if path.endpoints.0 {
                extend_tip(&mut path.points, &lines, self.max_width, false);
            }
            if path.endpoints.1 {
                extend_tip(&mut path.points, &lines, self.max_width, true);
            }

            let polyline = round_to_grid(&path);
            if !polyline.is_valid() {
                continue;
            }
            if polyline.endpoints.0
                && polyline.endpoints.1
                && polyline.length() < self.max_width * 2.0
            {
                continue;
            }
            out.push(polyline);
        }
        Ok(out)
    }

    /// Like [`MedialAxis::build`], with the width annotation stripped.
    ///
    /// # Errors
    ///
    /// Same as [`MedialAxis::build`].
    pub fn build_polylines(&self) -> Result<Vec<Polyline>> {
        Ok(self.build()?.into_iter().map(Polyline::from).collect())
    }
}

/// Moves a free path end along its terminal direction to the nearest boundary
/// intersection, at most `max_width` away. The width entry at the tip is left
/// untouched.
fn extend_tip(points: &mut [Vector2d], lines: &[Segment], max_width: f64, at_end: bool) {
    let n = points.len();
    if n < 2 {
        return;
    }
    let (tip, prev) = if at_end { (n - 1, n - 2) } else { (0, 1) };
    let dir = points[tip] - points[prev];
    let norm = dir.norm();
    if norm <= 0.0 {
        return;
    }
    let dir = dir / norm;

    let mut nearest: Option<f64> = None;
    for line in lines {
        if let Some(t) = ray_segment_hit(points[tip], dir, line) {
            if nearest.map_or(true, |best| t < best) {
                nearest = Some(t);
            }
        }
    }
    if let Some(t) = nearest {
        points[tip] += dir * t.min(max_width);
    }
}

/// Parameter along the ray `origin + t * dir` of its intersection with
/// `segment`, if one exists strictly ahead of the origin.
fn ray_segment_hit(origin: Vector2d, dir: Vector2d, segment: &Segment) -> Option<f64> {
    let a = segment.a.to_vec2d();
    let v = segment.b.to_vec2d() - a;
    let denom = dir.x * v.y - dir.y * v.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let w = a - origin;
    let t = (w.x * v.y - w.y * v.x) / denom;
    let s = (w.x * dir.y - w.y * dir.x) / denom;
    (t > 1e-9 && (-1e-9..=1.0 + 1e-9).contains(&s)).then_some(t)
}

/// Rounds a floating-point skeleton path onto the coordinate grid, merging
/// points that collapse onto the same grid position.
#[allow(clippy::cast_possible_truncation)]
fn round_to_grid(path: &walk::SkeletonPath) -> ThickPolyline {
    let mut points: Vec<Point> = Vec::with_capacity(path.points.len());
    let mut width = Vec::with_capacity(path.width.len());
    for (p, w) in path.points.iter().zip(&path.width) {
        let rounded = Point::new(p.x.round() as Coord, p.y.round() as Coord);
        if points.last() == Some(&rounded) {
            continue;
        }
        points.push(rounded);
        width.push(*w);
    }
    ThickPolyline { points, width, endpoints: path.endpoints }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    fn rectangle() -> ExPolygon {
        ExPolygon::from_contour(Polygon::from_points(vec![
            p(0, 0),
            p(100, 0),
            p(100, 10),
            p(0, 10),
        ]))
    }

    fn square() -> ExPolygon {
        ExPolygon::from_contour(Polygon::from_points(vec![
            p(0, 0),
            p(100, 0),
            p(100, 100),
            p(0, 100),
        ]))
    }

    #[test]
    fn thin_rectangle_collapses_to_one_axis() {
        let region = rectangle();
        let result = MedialAxis::new(&region, 20.0, 0.0).build().unwrap();
        assert_eq!(result.len(), 1);

        let axis = &result[0];
        // Tips are extended to the short walls, so the axis spans the full
        // length at half height.
        let mut ends = [axis.first_point(), axis.last_point()];
        ends.sort_by_key(|e| e.x);
        assert_eq!(ends[0], p(0, 5));
        assert_eq!(ends[1], p(100, 5));
        assert_eq!(axis.endpoints, (true, true));
        for w in &axis.width {
            assert!((w - 10.0).abs() < 1e-6, "width {w}");
        }
    }

    #[test]
    fn square_yields_nothing_with_default_facing_filter() {
        // Adjacent walls of a square meet at π/2, far from antiparallel:
        // every skeleton edge is a corner spoke and gets filtered.
        let region = square();
        let result = MedialAxis::new(&region, 300.0, 1.0).build().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn square_corner_spokes_with_relaxed_facing_filter() {
        let region = square();
        let result =
            MedialAxis::new(&region, 300.0, 1.0).with_facing_tolerance(PI).build().unwrap();
        assert_eq!(result.len(), 4);

        let center = p(50, 50);
        for spoke in &result {
            assert_eq!(spoke.points.len(), 2);
            // Each spoke runs corner to center; the width grows linearly
            // from zero to the full inscribed diameter.
            let (corner_idx, center_idx) =
                if spoke.points[1] == center { (0, 1) } else { (1, 0) };
            assert_eq!(spoke.points[center_idx], center);
            assert!(spoke.width[corner_idx] < 1e-6);
            assert!((spoke.width[center_idx] - 100.0).abs() < 1e-6);
            let corner = spoke.points[corner_idx];
            assert!(corner.x == 0 || corner.x == 100);
            assert!(corner.y == 0 || corner.y == 100);
        }
    }

    #[test]
    fn width_band_discards_wide_regions() {
        // The rectangle's centerline is 10 wide everywhere; a max_width of 5
        // leaves nothing.
        let region = rectangle();
        let result = MedialAxis::new(&region, 5.0, 1.0).build().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn degenerate_region_is_empty() {
        let region = ExPolygon::from_contour(Polygon::from_points(vec![p(0, 0), p(10, 0)]));
        assert!(MedialAxis::new(&region, 10.0, 1.0).build().unwrap().is_empty());
        assert!(MedialAxis::new(&ExPolygon::default(), 10.0, 1.0).build().unwrap().is_empty());
    }

    #[test]
    fn ring_region_yields_closed_loop() {
        // Square with a centered square hole: the skeleton is a closed ring.
        let hole = Polygon::from_points(vec![p(40, 40), p(40, 60), p(60, 60), p(60, 40)]);
        let region = ExPolygon::new(
            Polygon::from_points(vec![p(0, 0), p(100, 0), p(100, 100), p(0, 100)]),
            vec![hole],
        );
        let result = MedialAxis::new(&region, 100.0, 1.0).build().unwrap();
        assert_eq!(result.len(), 1);

        let ring = &result[0];
        assert_eq!(ring.endpoints, (false, false));
        assert_eq!(ring.first_point(), ring.last_point());
        assert!(ring.points.len() > 8);
        // Wall-to-wall width: 40 on the straight runs, slightly wider where
        // the ring bulges around the hole corners.
        for w in &ring.width {
            assert!((39.0..48.0).contains(w), "width {w}");
        }
    }

    #[test]
    fn build_polylines_strips_widths() {
        let region = rectangle();
        let result = MedialAxis::new(&region, 20.0, 2.0).build_polylines().unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].is_valid());
    }
}
