//! Conversions between fine grid coordinates and world coordinates.
//!
//! Every cell of the fine grid maps to a world-space point on a uniform
//! lattice: rows run along the world x axis and columns along the world z
//! axis, each step being one block length.

use crate::math::vec::Vec3;
use crate::maze::generator::Cell;

/// Converts a fine grid cell to world coordinates.
///
/// # Arguments
/// * `cell` - The cell in fine grid coordinates (row, col)
/// * `block_size` - World units per grid cell
/// * `y_position` - The desired y-coordinate (height) in the world
///
/// # Coordinate System
/// - World x increases with the row index
/// - World z increases with the column index
/// - Y increases upwards; the avatar plane is y = 0
pub fn cell_to_world(cell: &Cell, block_size: f32, y_position: f32) -> Vec3 {
    Vec3::new(
        cell.row as f32 * block_size,
        y_position,
        cell.col as f32 * block_size,
    )
}

/// Converts 3D world coordinates to the nearest fine grid cell.
///
/// The y-coordinate is ignored since the grid is 2D. Results are clamped to
/// the grid bounds, so positions outside the maze map to the nearest border
/// cell.
pub fn world_to_cell(position: &Vec3, row_count: usize, col_count: usize, block_size: f32) -> Cell {
    let row = (position.x() / block_size + 0.5).floor().max(0.0) as usize;
    let col = (position.z() / block_size + 0.5).floor().max(0.0) as usize;

    Cell::new(row.min(row_count - 1), col.min(col_count - 1))
}

/// World-space center of the block column standing on a fine grid cell.
///
/// Identical to [`cell_to_world`] at height zero; kept as its own name
/// because collision code reads better talking about block centers than
/// about cells.
pub fn block_center(cell: &Cell, block_size: f32) -> Vec3 {
    cell_to_world(cell, block_size, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A cell maps to row*block along x and col*block along z.
    #[test]
    fn test_cell_to_world_scaling() {
        let p = cell_to_world(&Cell::new(3, 5), 2.0, 0.0);
        assert_eq!(p, Vec3::new(6.0, 0.0, 10.0));
    }

    /// Block centers sit on the cell lattice at floor height.
    #[test]
    fn test_block_center_on_cell_lattice() {
        let center = block_center(&Cell::new(2, 2), 2.0);
        assert_eq!(center, Vec3::new(4.0, 0.0, 4.0));
    }

    /// World positions round-trip back to the cell they came from, even when
    /// nudged off-center by less than half a block.
    #[test]
    fn test_world_to_cell_round_trip() {
        let block = 2.0;
        for row in 0..7 {
            for col in 0..7 {
                let cell = Cell::new(row, col);
                let mut p = cell_to_world(&cell, block, 0.0);
                p = p + Vec3::new(0.4, 0.0, -0.4);
                assert_eq!(world_to_cell(&p, 7, 7, block), cell);
            }
        }
    }

    /// Positions outside the maze clamp to the nearest border cell.
    #[test]
    fn test_world_to_cell_clamps_out_of_bounds() {
        let far = Vec3::new(1000.0, 0.0, -1000.0);
        assert_eq!(world_to_cell(&far, 7, 7, 2.0), Cell::new(6, 0));
    }
}
