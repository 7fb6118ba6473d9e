use crate::geometry::{Point, Polygon};

/// Greedy nearest-neighbor visiting order over `points`, seeded at
/// `start_near`.
///
/// This is a travel-distance heuristic, not an optimal TSP solution. The
/// result is deterministic: distances are compared exactly in integer
/// arithmetic and equidistant candidates resolve to the lowest original
/// index (the scan uses a strict `<` over candidates in index order).
#[must_use]
pub fn chained_path_from(points: &[Point], start_near: Point) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut order = Vec::with_capacity(points.len());
    let mut current = start_near;
    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_dist = points[remaining[0]].distance_to_sq(&current);
        for (slot, &idx) in remaining.iter().enumerate().skip(1) {
            let dist = points[idx].distance_to_sq(&current);
            if dist < best_dist {
                best = slot;
                best_dist = dist;
            }
        }
        let idx = remaining.remove(best);
        order.push(idx);
        current = points[idx];
    }
    order
}

/// [`chained_path_from`] seeded at the first point of the set.
#[must_use]
pub fn chained_path(points: &[Point]) -> Vec<usize> {
    match points.first() {
        Some(first) => chained_path_from(points, *first),
        None => Vec::new(),
    }
}

/// Reorders `items` by chaining their representative `points`.
///
/// `points` and `items` run parallel: `points[i]` stands for `items[i]`.
#[must_use]
pub fn chained_path_items<T: Clone>(points: &[Point], items: &[T]) -> Vec<T> {
    debug_assert_eq!(points.len(), items.len());
    chained_path(points).into_iter().map(|i| items[i].clone()).collect()
}

/// Reorders polygons by chaining their first vertices.
#[must_use]
pub fn chain_polygons(polygons: &[Polygon]) -> Vec<Polygon> {
    let points: Vec<Point> =
        polygons.iter().map(|p| p.points.first().copied().unwrap_or_default()).collect();
    chained_path_items(&points, polygons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn follows_clear_nearest_neighbor_order() {
        // Shuffled points on a line: greedy chaining walks them in order.
        let pts = vec![p(0, 0), p(30, 0), p(10, 0), p(20, 0)];
        assert_eq!(chained_path(&pts), vec![0, 2, 3, 1]);
    }

    #[test]
    fn deterministic_on_repeat() {
        let pts = vec![p(5, 1), p(-3, 8), p(12, -4), p(0, 0), p(7, 7)];
        let first = chained_path(&pts);
        for _ in 0..10 {
            assert_eq!(chained_path(&pts), first);
        }
    }

    #[test]
    fn tie_break_picks_lowest_index() {
        // Both candidates are exactly 10 away from the seed.
        let pts = vec![p(0, 0), p(10, 0), p(-10, 0)];
        assert_eq!(chained_path(&pts), vec![0, 1, 2]);

        // Same configuration with the candidates swapped: still the lower
        // index, proving the rule is index-based and not scan luck.
        let pts = vec![p(0, 0), p(-10, 0), p(10, 0)];
        assert_eq!(chained_path(&pts), vec![0, 1, 2]);
    }

    #[test]
    fn explicit_start_point() {
        let pts = vec![p(0, 0), p(100, 0), p(51, 0)];
        // Seeded near the right end, the chain starts from the closest point.
        assert_eq!(chained_path_from(&pts, p(100, 10)), vec![1, 2, 0]);
    }

    #[test]
    fn empty_input() {
        assert!(chained_path(&[]).is_empty());
    }

    #[test]
    fn items_follow_their_points() {
        let pts = vec![p(0, 0), p(20, 0), p(10, 0)];
        let items = vec!["a", "b", "c"];
        assert_eq!(chained_path_items(&pts, &items), vec!["a", "c", "b"]);
    }

    #[test]
    fn polygons_chain_by_first_vertex() {
        let near = Polygon::from_points(vec![p(0, 0), p(1, 0), p(1, 1)]);
        let far = Polygon::from_points(vec![p(100, 0), p(101, 0), p(101, 1)]);
        let middle = Polygon::from_points(vec![p(50, 0), p(51, 0), p(51, 1)]);
        let ordered = chain_polygons(&[near.clone(), far.clone(), middle.clone()]);
        assert_eq!(ordered, vec![near, middle, far]);
    }
}
