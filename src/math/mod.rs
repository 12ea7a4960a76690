//! Math utilities and types for 3D world geometry and game logic.
//!
//! This module provides the vector type the rest of the crate computes with,
//! plus the coordinate transformations between maze grid space and world
//! space. The [`vec::Vec3`] type is laid out to be compatible with GPU
//! memory (for direct upload by a rendering front end).

pub mod coordinates;
pub mod vec;

pub use vec::Vec3;
