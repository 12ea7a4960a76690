//! Coordinate system transformations for the maze world.
//!
//! This module converts between the two coordinate systems the game uses:
//! - Fine grid coordinates: the wall/open array produced by maze generation
//!   (rows/columns, where rows run along the world x axis)
//! - World coordinates: the 3D space cameras move through (x, y, z)
//!
//! It also defines the cardinal [`Direction`](positions::Direction) type and
//! its yaw-angle mapping, shared by spawn orientation and grid walking.

mod positions;
mod transformations;

pub use positions::*;
pub use transformations::*;
