//! Time-bonus collectibles hidden in the maze.
//!
//! Each level scatters three collectibles over open interior cells. Walking
//! within reach of one during a run collects it exactly once and credits its
//! time bonus against the run clock. Placement draws from the same RNG
//! surface as generation, so a seeded session reproduces collectible spots
//! along with the maze itself.

use std::time::Duration;

use rand::prelude::*;

use crate::math::Vec3;
use crate::math::coordinates::cell_to_world;
use crate::maze::{Cell, MazeGrid};

/// The three collectible kinds hidden in every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    /// Small find, worth a 5 second bonus.
    ThingOne,
    /// Medium find, worth a 10 second bonus.
    ThingTwo,
    /// Big find, worth a 15 second bonus.
    ThingThree,
}

impl CollectibleKind {
    /// All kinds, in placement order.
    pub const ALL: [CollectibleKind; 3] = [
        CollectibleKind::ThingOne,
        CollectibleKind::ThingTwo,
        CollectibleKind::ThingThree,
    ];

    /// Run-clock credit granted when this kind is collected.
    pub fn time_bonus(&self) -> Duration {
        match self {
            CollectibleKind::ThingOne => Duration::from_secs(5),
            CollectibleKind::ThingTwo => Duration::from_secs(10),
            CollectibleKind::ThingThree => Duration::from_secs(15),
        }
    }
}

/// A collectible anchored to one open cell of the current maze.
#[derive(Debug, Clone)]
pub struct CollectibleMarker {
    /// Which collectible this is.
    pub kind: CollectibleKind,
    /// The open fine-grid cell it sits on.
    pub cell: Cell,
    /// Whether it has been picked up this level.
    pub collected: bool,
}

impl CollectibleMarker {
    /// World position of the marker at the given display height.
    pub fn world_position(&self, block_size: f32, height: f32) -> Vec3 {
        cell_to_world(&self.cell, block_size, height)
    }

    /// Collects the marker if it is still available.
    ///
    /// The first call returns the kind's time bonus and flips the flag;
    /// every later call returns `None` until a new level resets the
    /// markers.
    pub fn try_collect(&mut self) -> Option<Duration> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.kind.time_bonus())
    }
}

/// Scatters one marker per collectible kind over the maze.
///
/// Candidate anchors are the open cells at the coarse lattice centers
/// (odd/odd fine coordinates), minus the two cells right inside the
/// entrance and exit so nothing spawns on top of the start or the goal.
/// Mazes too small to host all three kinds place as many as fit.
pub fn place_collectibles<R: Rng>(maze: &MazeGrid, rng: &mut R) -> Vec<CollectibleMarker> {
    let inside_entrance = Cell::new(1, 1);
    let inside_exit = Cell::new(maze.row_count() - 2, maze.col_count() - 2);

    let mut anchors: Vec<Cell> = (1..maze.row_count())
        .step_by(2)
        .flat_map(|row| {
            (1..maze.col_count())
                .step_by(2)
                .map(move |col| Cell::new(row, col))
        })
        .filter(|cell| !maze.is_wall(cell.row, cell.col))
        .filter(|cell| *cell != inside_entrance && *cell != inside_exit)
        .collect();
    anchors.shuffle(rng);

    CollectibleKind::ALL
        .into_iter()
        .zip(anchors)
        .map(|(kind, cell)| CollectibleMarker {
            kind,
            cell,
            collected: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeGenerator;
    use rand::rngs::StdRng;

    /// Bonus values follow the 5/10/15 second ladder.
    #[test]
    fn test_bonus_ladder() {
        assert_eq!(
            CollectibleKind::ThingOne.time_bonus(),
            Duration::from_secs(5)
        );
        assert_eq!(
            CollectibleKind::ThingTwo.time_bonus(),
            Duration::from_secs(10)
        );
        assert_eq!(
            CollectibleKind::ThingThree.time_bonus(),
            Duration::from_secs(15)
        );
    }

    /// Placement yields three distinct open anchors away from the entrance
    /// and exit neighbors.
    #[test]
    fn test_placement_uses_distinct_interior_cells() {
        let maze = MazeGenerator::generate_with_rng(11, 11, &mut StdRng::seed_from_u64(5));
        let markers = place_collectibles(&maze, &mut StdRng::seed_from_u64(6));

        assert_eq!(markers.len(), 3);
        for (index, marker) in markers.iter().enumerate() {
            assert!(!maze.is_wall(marker.cell.row, marker.cell.col));
            assert_eq!(marker.cell.row % 2, 1);
            assert_eq!(marker.cell.col % 2, 1);
            assert_ne!(marker.cell, Cell::new(1, 1));
            assert_ne!(
                marker.cell,
                Cell::new(maze.row_count() - 2, maze.col_count() - 2)
            );
            assert!(!marker.collected);
            for other in &markers[index + 1..] {
                assert_ne!(marker.cell, other.cell);
            }
        }
    }

    /// The same placement seed reproduces the same anchors.
    #[test]
    fn test_placement_is_seed_deterministic() {
        let maze = MazeGenerator::generate_with_rng(7, 7, &mut StdRng::seed_from_u64(5));
        let a = place_collectibles(&maze, &mut StdRng::seed_from_u64(8));
        let b = place_collectibles(&maze, &mut StdRng::seed_from_u64(8));

        let cells = |markers: &[CollectibleMarker]| -> Vec<Cell> {
            markers.iter().map(|m| m.cell).collect()
        };
        assert_eq!(cells(&a), cells(&b));
    }

    /// Collecting succeeds once and is refused afterwards.
    #[test]
    fn test_collect_flips_once() {
        let mut marker = CollectibleMarker {
            kind: CollectibleKind::ThingTwo,
            cell: Cell::new(3, 3),
            collected: false,
        };

        assert_eq!(marker.try_collect(), Some(Duration::from_secs(10)));
        assert!(marker.collected);
        assert_eq!(marker.try_collect(), None);
        assert_eq!(marker.try_collect(), None);
    }

    /// Mazes with too few interior cells place fewer markers instead of
    /// doubling up.
    #[test]
    fn test_tiny_maze_places_what_fits() {
        let maze = MazeGenerator::generate_with_rng(2, 2, &mut StdRng::seed_from_u64(1));
        let markers = place_collectibles(&maze, &mut StdRng::seed_from_u64(2));
        assert_eq!(markers.len(), 2);

        let maze = MazeGenerator::generate_with_rng(1, 1, &mut StdRng::seed_from_u64(1));
        let markers = place_collectibles(&maze, &mut StdRng::seed_from_u64(2));
        assert!(markers.is_empty());
    }
}
