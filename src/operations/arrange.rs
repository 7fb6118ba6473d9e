use crate::error::{OperationError, Result};
use crate::geometry::BoundingBox2f;
use crate::math::angles::linint;
use crate::math::Vector2d;

/// Lays out `num_parts` identical parts of `part_size` on a grid, separated
/// by `gap`, preferring cells closest to the bed center.
///
/// Without a bed bounding box a virtual area large enough for all parts is
/// assumed. Returns one center position per part.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` if the grid cannot hold all parts.
pub fn arrange(
    num_parts: usize,
    part_size: &Vector2d,
    gap: f64,
    bed: Option<&BoundingBox2f>,
) -> Result<Vec<Vector2d>> {
    // Cell size is the part plus half the separation on each side.
    let cell = Vector2d::new(part_size.x + gap, part_size.y + gap);

    #[allow(clippy::cast_precision_loss)]
    let area = bed.map_or_else(
        || Vector2d::new(cell.x * num_parts as f64, cell.y * num_parts as f64),
        BoundingBox2f::size,
    );

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cellw = ((area.x + gap) / cell.x).floor() as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cellh = ((area.y + gap) / cell.y).floor() as usize;
    if num_parts > cellw * cellh {
        return Err(OperationError::InvalidInput(format!(
            "{num_parts} parts do not fit into a {cellw}x{cellh} grid"
        ))
        .into());
    }

    // Grid footprint, centered inside the area.
    #[allow(clippy::cast_precision_loss)]
    let cells = Vector2d::new(cellw as f64 * cell.x, cellh as f64 * cell.y);
    let origin = Vector2d::new((area.x - cells.x) / 2.0, (area.y - cells.y) / 2.0);

    // All cell centers, sorted by distance from the area center. The
    // (distance, column, row) key keeps equidistant cells in a fixed order.
    let mut order: Vec<(f64, usize, usize, Vector2d)> = Vec::with_capacity(cellw * cellh);
    for i in 0..cellw {
        for j in 0..cellh {
            #[allow(clippy::cast_precision_loss)]
            let cx = linint(i as f64 + 0.5, 0.0, cellw as f64, origin.x, origin.x + cells.x);
            #[allow(clippy::cast_precision_loss)]
            let cy = linint(j as f64 + 0.5, 0.0, cellh as f64, origin.y, origin.y + cells.y);
            let xd = (area.x / 2.0 - cx).abs();
            let yd = (area.y / 2.0 - cy).abs();
            order.push((xd * xd + yd * yd, i, j, Vector2d::new(cx, cy)));
        }
    }
    order.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let offset = bed.map_or_else(Vector2d::zeros, |bb| bb.min);
    Ok(order.into_iter().take(num_parts).map(|(_, _, _, pos)| pos + offset).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parts_fit_within_bed() {
        let bed = BoundingBox2f::new(Vector2d::new(0.0, 0.0), Vector2d::new(200.0, 200.0));
        let positions = arrange(4, &Vector2d::new(20.0, 20.0), 5.0, Some(&bed)).unwrap();
        assert_eq!(positions.len(), 4);
        for p in &positions {
            assert!(p.x >= 10.0 && p.x <= 190.0, "x={}", p.x);
            assert!(p.y >= 10.0 && p.y <= 190.0, "y={}", p.y);
        }
        // All positions distinct.
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!((a - b).norm() > 1.0);
            }
        }
    }

    #[test]
    fn center_cell_first() {
        let bed = BoundingBox2f::new(Vector2d::new(0.0, 0.0), Vector2d::new(90.0, 90.0));
        let positions = arrange(1, &Vector2d::new(25.0, 25.0), 5.0, Some(&bed)).unwrap();
        // A 3x3 grid: the single part lands in the middle cell.
        assert!((positions[0].x - 45.0).abs() < 1e-9, "x={}", positions[0].x);
        assert!((positions[0].y - 45.0).abs() < 1e-9, "y={}", positions[0].y);
    }

    #[test]
    fn too_many_parts_errors() {
        let bed = BoundingBox2f::new(Vector2d::new(0.0, 0.0), Vector2d::new(50.0, 50.0));
        assert!(arrange(100, &Vector2d::new(20.0, 20.0), 5.0, Some(&bed)).is_err());
    }

    #[test]
    fn no_bed_always_fits() {
        let positions = arrange(7, &Vector2d::new(10.0, 10.0), 2.0, None).unwrap();
        assert_eq!(positions.len(), 7);
    }

    #[test]
    fn bed_offset_applied() {
        let bed = BoundingBox2f::new(Vector2d::new(100.0, 50.0), Vector2d::new(200.0, 150.0));
        let positions = arrange(1, &Vector2d::new(30.0, 30.0), 0.0, Some(&bed)).unwrap();
        assert!(positions[0].x > 100.0 && positions[0].x < 200.0);
        assert!(positions[0].y > 50.0 && positions[0].y < 150.0);
    }
}
