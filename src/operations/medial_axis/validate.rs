use std::f64::consts::PI;

use super::diagram::{sample_parabola, SkeletonCell, SkeletonGraph};
use crate::geometry::line::Line as Segment;
use crate::geometry::point::MAX_COORD;
use crate::geometry::ExPolygon;
use crate::math::Vector2d;

/// Polyline-ready geometry of one half-edge, in its own direction.
///
/// Straight edges carry their two end vertices; curved edges additionally
/// carry the discretized parabola samples in between. `width` runs parallel
/// to `points` and holds the local clearance diameter.
#[derive(Debug, Clone, Default)]
pub(super) struct EdgeGeometry {
    pub valid: bool,
    pub points: Vec<Vector2d>,
    pub width: Vec<f64>,
}

/// Filters the diagram edges down to the medial axis of the region and
/// attaches thickness geometry to the survivors.
///
/// An edge survives when it is primary and finite, lies inside the region,
/// connects "facing" boundary segments (relative orientation within
/// `facing_tolerance` of π) and is not wholly outside the `[min_width,
/// max_width]` band. Twin edges share one computation; the twin gets the
/// reversed geometry.
pub(super) fn apply(
    graph: &SkeletonGraph,
    lines: &[Segment],
    region: &ExPolygon,
    min_width: f64,
    max_width: f64,
    facing_tolerance: f64,
) -> Vec<EdgeGeometry> {
    let mut geometry = vec![EdgeGeometry::default(); graph.edges.len()];

    for (id, edge) in graph.edges.iter().enumerate() {
        if id > edge.twin {
            continue;
        }
        if !edge.is_primary {
            continue;
        }
        let (Some(v0), Some(v1)) = (edge.vertex0, graph.vertex1(id)) else {
            continue;
        };
        let p0 = graph.vertices[v0];
        let p1 = graph.vertices[v1];
        if !coordinates_sane(p0) || !coordinates_sane(p1) {
            continue;
        }

        // Endpoints of valid edges may sit exactly on the boundary (at
        // corners), where an even-odd test is unreliable; probe the midpoint.
        let mid = (p0 + p1) * 0.5;
        if !region.contains_xy(mid.x, mid.y) {
            continue;
        }

        let cell = graph.cells[edge.cell];
        let twin_cell = graph.cells[graph.edges[edge.twin].cell];

        if cell.contains_segment && twin_cell.contains_segment {
            // Both sites are boundary segments: keep the edge only when the
            // segments face each other, i.e. run nearly antiparallel. This
            // suppresses the corner spokes of the raw skeleton.
            let mut angle = (lines[cell.source].orientation()
                - lines[twin_cell.source].orientation())
            .abs();
            if angle > PI {
                angle = 2.0 * PI - angle;
            }
            if (angle - PI).abs() > facing_tolerance {
                continue;
            }
        }

        // Both end vertices are equidistant from the edge's two sites, so
        // either cell gives the clearance; prefer a segment site.
        let site_cell = if cell.contains_segment { cell } else { twin_cell };
        let w0 = 2.0 * site_distance(site_cell, lines, p0);
        let w1 = 2.0 * site_distance(site_cell, lines, p1);
        if w0 < min_width && w1 < min_width {
            continue;
        }
        if w0 > max_width && w1 > max_width {
            continue;
        }

        let mut points = vec![p0];
        let mut width = vec![w0];
        if cell.contains_segment != twin_cell.contains_segment {
            let (segment_cell, point_cell) =
                if cell.contains_segment { (cell, twin_cell) } else { (twin_cell, cell) };
            let focus = point_site(point_cell, lines, p0);
            for (pos, w) in sample_parabola(&lines[segment_cell.source], focus, p0, p1) {
                points.push(pos);
                width.push(w);
            }
        }
        points.push(p1);
        width.push(w1);

        geometry[edge.twin] = EdgeGeometry {
            valid: true,
            points: points.iter().rev().copied().collect(),
            width: width.iter().rev().copied().collect(),
        };
        geometry[id] = EdgeGeometry { valid: true, points, width };
    }

    geometry
}

#[allow(clippy::cast_precision_loss)]
fn coordinates_sane(p: Vector2d) -> bool {
    let bound = 2.0 * MAX_COORD as f64;
    p.x.is_finite() && p.y.is_finite() && p.x.abs() <= bound && p.y.abs() <= bound
}

/// Distance from `p` to the cell's site.
fn site_distance(cell: SkeletonCell, lines: &[Segment], p: Vector2d) -> f64 {
    if cell.contains_segment {
        segment_distance(&lines[cell.source], p)
    } else {
        (point_site(cell, lines, p) - p).norm()
    }
}

/// The point site of an endpoint cell: the endpoint of the source segment
/// nearer to a position known to lie in the cell.
fn point_site(cell: SkeletonCell, lines: &[Segment], near: Vector2d) -> Vector2d {
    debug_assert!(!cell.contains_segment);
    let a = lines[cell.source].a.to_vec2d();
    let b = lines[cell.source].b.to_vec2d();
    if (a - near).norm_squared() <= (b - near).norm_squared() {
        a
    } else {
        b
    }
}

fn segment_distance(segment: &Segment, p: Vector2d) -> f64 {
    let a = segment.a.to_vec2d();
    let v = segment.b.to_vec2d() - a;
    let len_sq = v.norm_squared();
    if len_sq <= 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&v) / len_sq).clamp(0.0, 1.0);
    (p - (a + v * t)).norm()
}
