//! Maze generation and the immutable wall grid the rest of the game reads.

pub mod generator;

pub use generator::{Cell, MazeGenerator, MazeGrid};
