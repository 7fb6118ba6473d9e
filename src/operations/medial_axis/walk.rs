use super::diagram::SkeletonGraph;
use super::validate::EdgeGeometry;
use crate::math::Vector2d;

/// Skeleton path in floating-point coordinates, before grid rounding and
/// endpoint extension.
#[derive(Debug)]
pub(super) struct SkeletonPath {
    pub points: Vec<Vector2d>,
    pub width: Vec<f64>,
    /// True where the path ends at a degree-1 skeleton tip.
    pub endpoints: (bool, bool),
}

/// Chains the valid edges into maximal paths.
///
/// Seeds at the lowest-numbered available edge, grows across degree-2
/// vertices while the turn stays below the sharp-corner threshold
/// (`min_turn_cos` is the cosine of the maximum turn), and stops at
/// junctions, sharp corners and tips. Junction status is the static degree
/// over all valid edges, so the cut points do not depend on traversal order.
/// Each seed is grown in both directions; a path that closes onto its own
/// start vertex is a loop and carries no free endpoints.
pub(super) fn assemble(
    graph: &SkeletonGraph,
    geometry: &[EdgeGeometry],
    min_turn_cos: f64,
) -> Vec<SkeletonPath> {
    let mut walker = Walker {
        graph,
        geometry,
        degree: vertex_degrees(graph, geometry),
        used: geometry.iter().map(|g| !g.valid).collect(),
        min_turn_cos,
    };

    let mut paths = Vec::new();
    for seed in 0..graph.edges.len() {
        if walker.used[seed] {
            continue;
        }
        walker.consume(seed);

        let mut points = geometry[seed].points.clone();
        let mut width = geometry[seed].width.clone();
        let start_vertex = graph.edges[seed].vertex0;

        let (tail_tip, looped) = walker.grow(seed, start_vertex, &mut points, &mut width);
        if looped {
            paths.push(SkeletonPath { points, width, endpoints: (false, false) });
            continue;
        }

        // Grow the other way from the seed's twin, then stitch the two
        // halves together at the seed's start vertex.
        let twin = graph.edges[seed].twin;
        let mut back_points = Vec::new();
        let mut back_width = Vec::new();
        let (head_tip, _) = walker.grow(twin, None, &mut back_points, &mut back_width);

        back_points.reverse();
        back_width.reverse();
        back_points.extend(points);
        back_width.extend(width);

        paths.push(SkeletonPath {
            points: back_points,
            width: back_width,
            endpoints: (head_tip, tail_tip),
        });
    }
    paths
}

/// Number of valid edges incident to each vertex.
fn vertex_degrees(graph: &SkeletonGraph, geometry: &[EdgeGeometry]) -> Vec<usize> {
    let mut degree = vec![0_usize; graph.vertices.len()];
    for (id, edge) in graph.edges.iter().enumerate() {
        if id > edge.twin || !geometry[id].valid {
            continue;
        }
        if let Some(v0) = edge.vertex0 {
            degree[v0] += 1;
        }
        if let Some(v1) = graph.vertex1(id) {
            degree[v1] += 1;
        }
    }
    degree
}

struct Walker<'a> {
    graph: &'a SkeletonGraph,
    geometry: &'a [EdgeGeometry],
    degree: Vec<usize>,
    used: Vec<bool>,
    min_turn_cos: f64,
}

impl Walker<'_> {
    fn consume(&mut self, edge: usize) {
        self.used[edge] = true;
        self.used[self.graph.edges[edge].twin] = true;
    }

    /// Extends the path past the end vertex of `current` for as long as that
    /// vertex has degree 2 and the turn stays gentle.
    ///
    /// Appended edge geometry skips its first point (shared with the path
    /// end). Returns `(tip, looped)`: `tip` is set when the walk dies at a
    /// degree-1 vertex, `looped` when it returns to `start_vertex`.
    fn grow(
        &mut self,
        mut current: usize,
        start_vertex: Option<usize>,
        points: &mut Vec<Vector2d>,
        width: &mut Vec<f64>,
    ) -> (bool, bool) {
        loop {
            if start_vertex.is_some() && self.graph.vertex1(current) == start_vertex {
                return (false, true);
            }
            let Some(v) = self.graph.vertex1(current) else {
                return (false, false);
            };
            if self.degree[v] != 2 {
                return (self.degree[v] == 1, false);
            }
            let Some(next) = self.available_neighbor(current) else {
                return (false, false);
            };
            if !self.gentle_turn(current, next) {
                return (false, false);
            }
            self.consume(next);
            points.extend(self.geometry[next].points.iter().skip(1));
            width.extend(self.geometry[next].width.iter().skip(1));
            current = next;
        }
    }

    /// The unconsumed valid edge leaving the end vertex of `edge`, if any.
    ///
    /// Circulates with twin/next pointers only: starting from `next(edge)`,
    /// every `next(twin(f))` also leaves the same vertex, and the circulation
    /// closes at `twin(edge)`.
    fn available_neighbor(&self, edge: usize) -> Option<usize> {
        let twin = self.graph.edges[edge].twin;
        let mut f = self.graph.edges[edge].next;
        let mut guard = self.graph.edges.len();
        while f != twin && guard > 0 {
            if !self.used[f] {
                return Some(f);
            }
            f = self.graph.edges[self.graph.edges[f].twin].next;
            guard -= 1;
        }
        None
    }

    fn gentle_turn(&self, current: usize, next: usize) -> bool {
        let Some(incoming) = direction(self.geometry[current].points.last_chunk()) else {
            return true;
        };
        let Some(outgoing) = direction(self.geometry[next].points.first_chunk()) else {
            return true;
        };
        incoming.dot(&outgoing) >= self.min_turn_cos
    }
}

fn direction(pair: Option<&[Vector2d; 2]>) -> Option<Vector2d> {
    let [a, b] = pair?;
    let v = b - a;
    let norm = v.norm();
    (norm > 0.0).then(|| v / norm)
}
