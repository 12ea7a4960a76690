//! Maze generation using a randomized depth-first backtracker.
//!
//! The carve walk runs on the coarse cell lattice (one coarse cell per 2x2
//! region of the fine grid) and writes into a fine wall/open grid. Each
//! visited cell draws a rotation stride and a starting direction, then scans
//! its four neighbors in that fixed rotating order; the per-cell rotation is
//! what gives these mazes their long winding corridors instead of the even
//! branching a fully shuffled scan would produce.
//!
//! The walk itself runs on an explicit stack, so large mazes cannot overflow
//! the call stack, while the sequence of random draws stays one turn stride
//! plus one starting direction per visited cell.
//!
//! # Examples
//!
//! ```rust
//! use dedalo::maze::MazeGenerator;
//!
//! let maze = MazeGenerator::generate(11, 11);
//! assert_eq!(maze.row_count(), 23);
//! assert!(!maze.is_wall(1, 0)); // the entrance gap is always open
//! ```

use chrono::Local;
use rand::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::math::Vec3;
use crate::math::coordinates::cell_to_world;

/// Represents a cell in the fine maze grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Row index of the cell
    pub row: usize,
    /// Column index of the cell
    pub col: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Requested dimensions of zero or less fall back to this lattice size.
const DIMENSION_FALLBACK: usize = 11;

/// Axis directions scanned by the carve walk, as (row, col) deltas.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// An immutable wall/open grid produced by [`MazeGenerator`].
///
/// Dimensions are always odd (`2*rows+1` by `2*cols+1`): coarse cells sit at
/// odd/odd coordinates, the passages connecting them at odd/even or even/odd
/// coordinates, and the even/even lattice points are always wall. A solid
/// border surrounds the grid except for two single-cell gaps, the entrance
/// and the exit.
///
/// The grid is a single flat row-major buffer and is never mutated after
/// generation; advancing a level replaces it wholesale.
#[derive(Debug, Clone)]
pub struct MazeGrid {
    row_count: usize,
    col_count: usize,
    cells: Vec<bool>,
}

impl MazeGrid {
    pub(crate) fn from_cells(row_count: usize, col_count: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), row_count * col_count);
        Self {
            row_count,
            col_count,
            cells,
        }
    }

    /// Number of rows in the fine grid (`2*rows+1`, always odd).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns in the fine grid (`2*cols+1`, always odd).
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Whether the cell at the given fine coordinates is a wall.
    ///
    /// Out-of-range coordinates report open (not a wall). Callers are only
    /// expected to query inside the grid, so failing toward "never blocks
    /// movement" keeps a bad query from walling off the world.
    pub fn is_wall(&self, row: usize, col: usize) -> bool {
        if row >= self.row_count || col >= self.col_count {
            return false;
        }
        self.cells[row * self.col_count + col]
    }

    /// The entrance gap in the border, fixed at fine `(1, 0)`.
    pub fn start_cell(&self) -> Cell {
        Cell::new(1, 0)
    }

    /// The exit gap in the border, fixed opposite the entrance.
    pub fn end_cell(&self) -> Cell {
        Cell::new(self.row_count - 2, self.col_count - 1)
    }

    /// World position of the entrance on the y = 0 plane.
    pub fn start_point(&self, block_size: f32) -> Vec3 {
        cell_to_world(&self.start_cell(), block_size, 0.0)
    }

    /// World position of the exit on the y = 0 plane.
    pub fn end_point(&self, block_size: f32) -> Vec3 {
        cell_to_world(&self.end_cell(), block_size, 0.0)
    }

    /// All open cells of the fine grid, in row-major order.
    pub fn open_cells(&self) -> Vec<Cell> {
        let mut open = Vec::new();
        for row in 0..self.row_count {
            for col in 0..self.col_count {
                if !self.is_wall(row, col) {
                    open.push(Cell::new(row, col));
                }
            }
        }
        open
    }

    /// Renders the grid as text, one row per line: `#` for a wall cell and
    /// a space for an open one.
    pub fn format_text(&self) -> String {
        let mut out = String::with_capacity((self.col_count + 1) * self.row_count);
        for row in 0..self.row_count {
            for col in 0..self.col_count {
                out.push(if self.is_wall(row, col) { '#' } else { ' ' });
            }
            out.push('\n');
        }
        out
    }

    /// Saves the grid to a timestamped text file in the `saved-mazes`
    /// directory, in the [`format_text`](Self::format_text) format.
    ///
    /// Prints the output path to stdout on success and the failure to
    /// stderr otherwise; callers that do not care about the dump can ignore
    /// the result.
    pub fn save_to_file(&self) -> Result<PathBuf, std::io::Error> {
        let timestamp = Local::now().format("Maze_%m-%d-%y_%I-%M%p.mz").to_string();
        let output_dir = Path::new("saved-mazes");
        let output_path = output_dir.join(timestamp);

        if let Err(e) = fs::create_dir_all(output_dir) {
            eprintln!("Failed to create output directory: {}", e);
            return Err(e);
        }

        if let Err(e) = fs::write(&output_path, self.format_text()) {
            eprintln!("Failed to write maze file: {}", e);
            return Err(e);
        }

        println!("Maze saved to: {}", output_path.display());
        Ok(output_path)
    }
}

/// Padded all-wall work grid the carve walk mutates in place.
///
/// The work grid is one cell larger than the final grid on every side, and
/// that outer ring is carved open up front. Neighbor probes from any border
/// cell land in the ring and read open, so the walk needs no bounds checks
/// and never carves a passage through the border.
struct WorkGrid {
    col_count: usize,
    cells: Vec<bool>,
}

impl WorkGrid {
    fn new(rows: usize, cols: usize) -> Self {
        let row_count = 2 * rows + 3;
        let col_count = 2 * cols + 3;
        let mut work = Self {
            col_count,
            cells: vec![true; row_count * col_count],
        };

        // Sentinel ring
        for row in 0..row_count {
            work.open(row as isize, 0);
            work.open(row as isize, (col_count - 1) as isize);
        }
        for col in 0..col_count {
            work.open(0, col as isize);
            work.open((row_count - 1) as isize, col as isize);
        }

        // Forced border gaps: entrance and exit of the final grid.
        work.open(2, 1);
        work.open(2 * rows as isize, 2 * cols as isize + 1);

        work
    }

    fn open(&mut self, row: isize, col: isize) {
        self.cells[row as usize * self.col_count + col as usize] = false;
    }

    fn is_wall_at(&self, row: isize, col: isize) -> bool {
        self.cells[row as usize * self.col_count + col as usize]
    }

    /// Slices the padded grid down to the final `(2*rows+1) x (2*cols+1)`
    /// interior, dropping the sentinel ring.
    fn into_maze(self, rows: usize, cols: usize) -> MazeGrid {
        let row_count = 2 * rows + 1;
        let col_count = 2 * cols + 1;
        let mut cells = vec![false; row_count * col_count];
        for row in 0..row_count {
            for col in 0..col_count {
                cells[row * col_count + col] = self.cells[(row + 1) * self.col_count + (col + 1)];
            }
        }
        MazeGrid::from_cells(row_count, col_count, cells)
    }
}

/// One coarse cell on the carve walk's explicit stack.
///
/// `next` is the direction index the walk will probe next, `turn` the
/// per-cell rotation stride, and `tried` how many of the four directions
/// have been probed so far. A popped frame resumes exactly where the walk
/// left it when it descended into a neighbor.
struct WalkFrame {
    cell_row: usize,
    cell_col: usize,
    turn: usize,
    next: usize,
    tried: usize,
}

impl WalkFrame {
    /// Marks the coarse cell open and draws its scan order: the turn stride
    /// (clockwise or counter-clockwise for this cell) and the starting
    /// direction. Exactly two random draws per visited cell.
    fn enter<R: Rng>(work: &mut WorkGrid, cell_row: usize, cell_col: usize, rng: &mut R) -> Self {
        work.open(2 * cell_row as isize, 2 * cell_col as isize);
        Self {
            cell_row,
            cell_col,
            turn: if rng.gen_bool(0.5) { 1 } else { 3 },
            next: rng.gen_range(0..4),
            tried: 0,
        }
    }
}

/// One-shot generator for [`MazeGrid`] values.
pub struct MazeGenerator;

impl MazeGenerator {
    /// Generates a maze with `rows x cols` coarse cells using the thread
    /// RNG.
    ///
    /// Never fails: dimensions of zero or less are clamped to 11 per axis
    /// instead of erroring, so callers always get a usable grid back.
    pub fn generate(rows: i32, cols: i32) -> MazeGrid {
        Self::generate_with_rng(rows, cols, &mut thread_rng())
    }

    /// Generates a maze drawing all randomness from the supplied source.
    ///
    /// The same source state always yields the same grid, which is what the
    /// determinism tests (and any replay feature) rely on.
    pub fn generate_with_rng<R: Rng>(rows: i32, cols: i32, rng: &mut R) -> MazeGrid {
        let rows = if rows <= 0 {
            DIMENSION_FALLBACK
        } else {
            rows as usize
        };
        let cols = if cols <= 0 {
            DIMENSION_FALLBACK
        } else {
            cols as usize
        };

        let mut work = WorkGrid::new(rows, cols);
        Self::carve_passages(&mut work, rows, cols, rng);
        work.into_maze(rows, cols)
    }

    /// Runs the depth-first carve walk from a random seed cell.
    fn carve_passages<R: Rng>(work: &mut WorkGrid, rows: usize, cols: usize, rng: &mut R) {
        let seed_row = rng.gen_range(1..=rows);
        let seed_col = rng.gen_range(1..=cols);

        let mut stack = vec![WalkFrame::enter(work, seed_row, seed_col, rng)];
        while let Some(frame) = stack.last_mut() {
            if frame.tried == 4 {
                stack.pop();
                continue;
            }

            let (d_row, d_col) = DIRECTIONS[frame.next];
            frame.tried += 1;
            frame.next = (frame.next + frame.turn) % 4;

            let fine_row = 2 * frame.cell_row as isize;
            let fine_col = 2 * frame.cell_col as isize;
            let next_row = frame.cell_row as isize + d_row;
            let next_col = frame.cell_col as isize + d_col;

            // An unvisited coarse neighbor still has its fine cell walled.
            // Probes past the border land in the open sentinel ring and
            // fail, which is what keeps the border solid.
            if work.is_wall_at(fine_row + 2 * d_row, fine_col + 2 * d_col) {
                work.open(fine_row + d_row, fine_col + d_col);
                stack.push(WalkFrame::enter(
                    work,
                    next_row as usize,
                    next_col as usize,
                    rng,
                ));
            }
        }
    }
}
