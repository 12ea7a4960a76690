//! Cardinal directions and yaw-angle helpers.
//!
//! Yaw follows the camera convention: 0 degrees points along +x and angles
//! grow toward +z. Since grid rows run along x and columns along z, East
//! steps to the next row and South to the next column.

use crate::maze::generator::Cell;

/// The four cardinal directions in the maze world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along +x (yaw 0°), toward higher rows.
    East,
    /// Along +z (yaw 90°), toward higher columns.
    South,
    /// Along -x (yaw 180°), toward lower rows.
    West,
    /// Along -z (yaw 270°), toward lower columns.
    North,
}

/// Translates a cardinal direction into a yaw angle in degrees.
pub fn direction_to_yaw(direction: Direction) -> f32 {
    match direction {
        Direction::East => 0.0,
        Direction::South => 90.0,
        Direction::West => 180.0,
        Direction::North => 270.0,
    }
}

/// Converts a yaw angle (in degrees) to the closest cardinal direction.
pub fn yaw_to_direction(yaw: f32) -> Direction {
    // Normalize angle to 0-360
    let normalized_yaw = ((yaw % 360.0) + 360.0) % 360.0;

    match normalized_yaw as u32 {
        315..=359 | 0..=45 => Direction::East,
        46..=135 => Direction::South,
        136..=225 => Direction::West,
        _ => Direction::North,
    }
}

/// Gets the fine grid cell adjacent to the given cell in a direction.
///
/// Returns `None` when the step would leave the grid bounds.
pub fn step_toward(
    cell: &Cell,
    direction: Direction,
    row_count: usize,
    col_count: usize,
) -> Option<Cell> {
    let Cell { row, col } = *cell;

    match direction {
        Direction::East if row + 1 < row_count => Some(Cell::new(row + 1, col)),
        Direction::West if row > 0 => Some(Cell::new(row - 1, col)),
        Direction::South if col + 1 < col_count => Some(Cell::new(row, col + 1)),
        Direction::North if col > 0 => Some(Cell::new(row, col - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yaw and direction conversions agree with each other.
    #[test]
    fn test_yaw_direction_round_trip() {
        for direction in [
            Direction::East,
            Direction::South,
            Direction::West,
            Direction::North,
        ] {
            assert_eq!(yaw_to_direction(direction_to_yaw(direction)), direction);
        }
    }

    /// Negative and wrapped angles normalize before matching.
    #[test]
    fn test_yaw_to_direction_wraps() {
        assert_eq!(yaw_to_direction(-90.0), Direction::North);
        assert_eq!(yaw_to_direction(450.0), Direction::South);
        assert_eq!(yaw_to_direction(360.0), Direction::East);
    }

    /// Steps past the grid edge return None instead of wrapping.
    #[test]
    fn test_step_toward_respects_bounds() {
        let corner = Cell::new(0, 0);
        assert_eq!(step_toward(&corner, Direction::West, 7, 7), None);
        assert_eq!(step_toward(&corner, Direction::North, 7, 7), None);
        assert_eq!(
            step_toward(&corner, Direction::East, 7, 7),
            Some(Cell::new(1, 0))
        );
        assert_eq!(
            step_toward(&corner, Direction::South, 7, 7),
            Some(Cell::new(0, 1))
        );
    }
}
