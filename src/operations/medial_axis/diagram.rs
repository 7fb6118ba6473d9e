use boostvoronoi::prelude::*;

use crate::error::{OperationError, Result};
use crate::geometry::line::Line as Segment;
use crate::math::Vector2d;

/// Voronoi cell in the arena: the boundary segment it was generated from and
/// whether the site is the segment itself or one of its endpoints.
#[derive(Debug, Clone, Copy)]
pub(super) struct SkeletonCell {
    pub source: usize,
    pub contains_segment: bool,
}

/// Half-edge in the arena. `twin`, `next` and `cell` always resolve; only
/// `vertex0` is optional (infinite edges have no start vertex).
#[derive(Debug, Clone, Copy)]
pub(super) struct SkeletonEdge {
    pub cell: usize,
    pub twin: usize,
    pub next: usize,
    pub vertex0: Option<usize>,
    pub is_primary: bool,
}

/// Integer-indexed copy of the Voronoi diagram of the boundary segments.
///
/// Vertices carry floating-point positions in scaled units. The half-edge
/// connectivity mirrors the builder's: edges come in twin pairs, `next` walks
/// the boundary of `cell` counter-clockwise.
#[derive(Debug)]
pub(super) struct SkeletonGraph {
    pub vertices: Vec<Vector2d>,
    pub cells: Vec<SkeletonCell>,
    pub edges: Vec<SkeletonEdge>,
}

impl SkeletonGraph {
    /// End vertex of `edge`: the start vertex of its twin.
    pub fn vertex1(&self, edge: usize) -> Option<usize> {
        self.edges[self.edges[edge].twin].vertex0
    }
}

/// Builds the Voronoi diagram of `lines` and copies it into an arena.
///
/// # Errors
///
/// Returns `OperationError::Failed` when the underlying diagram construction
/// rejects the input or yields dangling connectivity.
pub(super) fn build(lines: &[Segment]) -> Result<SkeletonGraph> {
    let segments: Vec<[i64; 4]> =
        lines.iter().map(|l| [l.a.x, l.a.y, l.b.x, l.b.y]).collect();

    let diagram = Builder::<i64, f64>::default()
        .with_segments(segments.iter())
        .map_err(|e| OperationError::Failed(format!("voronoi input rejected: {e}")))?
        .build()
        .map_err(|e| OperationError::Failed(format!("voronoi construction failed: {e}")))?;

    let vertices: Vec<Vector2d> = diagram
        .vertices()
        .iter()
        .map(|v| {
            let v = v.get();
            Vector2d::new(v.x(), v.y())
        })
        .collect();

    let cells: Vec<SkeletonCell> = diagram
        .cells()
        .iter()
        .map(|c| {
            let c = c.get();
            SkeletonCell {
                source: c.source_index(),
                contains_segment: c.contains_segment(),
            }
        })
        .collect();

    let dangling = || OperationError::Failed("voronoi diagram has dangling references".to_owned());
    let mut edges = Vec::with_capacity(diagram.edges().len());
    for e in diagram.edges() {
        let e = e.get();
        edges.push(SkeletonEdge {
            cell: e.cell().map_err(|_| dangling())?.0,
            twin: e.twin().map_err(|_| dangling())?.0,
            next: e.next().map_err(|_| dangling())?.0,
            vertex0: e.vertex0().map(|v| v.0),
            is_primary: e.is_primary(),
        });
    }

    Ok(SkeletonGraph { vertices, cells, edges })
}

/// Discretizes the parabolic arc between `p0` and `p1`, equidistant from the
/// point site `focus` and the segment site `directrix`.
///
/// Returns interior samples only (the arc endpoints are the caller's Voronoi
/// vertices), each paired with its clearance diameter. The subdivision count
/// follows the tangent-direction turn across the arc, so consecutive sample
/// directions stay within a small angular step.
pub(super) fn sample_parabola(
    directrix: &Segment,
    focus: Vector2d,
    p0: Vector2d,
    p1: Vector2d,
) -> Vec<(Vector2d, f64)> {
    const MAX_ANGLE_STEP: f64 = 0.2;
    const MAX_SAMPLES: usize = 16;

    let axis = directrix.vector();
    let len = axis.norm();
    if len <= 0.0 {
        return Vec::new();
    }
    let dir = axis / len;
    let normal = Vector2d::new(-dir.y, dir.x);
    let origin = directrix.a.to_vec2d();

    // Focus in the directrix-aligned frame; fy is the focal distance.
    let rel = focus - origin;
    let fx = rel.dot(&dir);
    let fy_signed = dir.x * rel.y - dir.y * rel.x;
    let fy = fy_signed.abs();
    if fy <= f64::EPSILON {
        // Focus on the directrix line: the arc degenerates to a segment.
        return Vec::new();
    }
    let side = fy_signed.signum();

    let s0 = (p0 - origin).dot(&dir);
    let s1 = (p1 - origin).dot(&dir);

    // Subdivide by the turn of the parabola tangent, d'(s) = (s - fx) / fy.
    let turn = (((s1 - fx) / fy).atan() - ((s0 - fx) / fy).atan()).abs();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let samples = ((turn / MAX_ANGLE_STEP).ceil() as usize).clamp(1, MAX_SAMPLES);

    let mut out = Vec::with_capacity(samples.saturating_sub(1));
    for k in 1..samples {
        #[allow(clippy::cast_precision_loss)]
        let s = s0 + (s1 - s0) * (k as f64) / (samples as f64);
        let d = ((s - fx) * (s - fx) + fy * fy) / (2.0 * fy);
        let position = origin + dir * s + normal * (side * d);
        out.push((position, 2.0 * d));
    }
    out
}
