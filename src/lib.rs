//! Dedalo - First-Person Maze Exploration Core
//!
//! Dedalo is the simulation core of a first-person maze exploration game:
//! procedurally generated perfect mazes, wall collision with an inset buffer,
//! aim picking against the stacked wall cubes, dual avatar/drone cameras, and
//! a timed-run session with collectible time bonuses. Rendering, windowing,
//! and input decoding live in a separate shell built on top of this crate.
//!
//! # Features
//! - **Procedural Generation**: Randomized depth-first mazes with a fixed
//!   entrance and exit, deterministic under a seeded RNG
//! - **Collision**: Slab-method ray tests that keep the avatar out of wall
//!   columns while letting movement slide along them
//! - **Aim Picking**: Nearest wall cube along the view ray, by grid cell and
//!   height level
//! - **Dual Cameras**: A collision-bound avatar and a free-flying drone,
//!   with input bound to one at a time
//! - **Timed Runs**: A phase machine with a run clock that excludes drone
//!   time and credits collectible bonuses
//!
//! # Architecture
//! The crate follows a modular architecture:
//! - `game/`: Session state, cameras, collision, and collectibles
//! - `maze/`: Maze generation and the immutable wall grid
//! - `math/`: Vector math and grid/world coordinate mappings
//! - `perf`: Instrumentation timers behind a global registry
//!
//! # Usage
//! Build a [`game::GameSession`] from a [`game::WorldConfig`], route input
//! into it every frame, and read the grid and camera state back out for
//! rendering.

#![warn(missing_docs)]

pub mod game;
pub mod math;
pub mod maze;
pub mod perf;
