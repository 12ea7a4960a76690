//! Wall collision and aim picking for maze navigation.
//!
//! This module implements the two spatial queries the game runs against the
//! wall grid:
//!
//! - **Movement resolution**: [`NavigationCollider::resolve_move`] takes the
//!   position a camera wants to reach and returns the position it is allowed
//!   to reach, stopping short of wall faces by a fixed inset so the view
//!   never clips into geometry.
//! - **Aim picking**: [`NavigationCollider::aimed_block`] casts a ray along
//!   the camera's view direction and reports which wall cube it hits first,
//!   if any.
//!
//! Both queries use the same slab-style ray test against axis-aligned boxes:
//! for each face plane the ray is not parallel to, compute the distance to
//! the plane and keep the nearest forward hit whose intersection point lies
//! on the face. Movement ignores the walls' vertical extent entirely: the
//! ray is projected onto the floor plane and tested against footprint boxes
//! of unbounded height, so climbing over a column is never a way through
//! it. Picking tests the cubes of each column individually because it needs
//! the height level back.

use crate::game::camera::Camera;
use crate::math::Vec3;
use crate::math::coordinates::block_center;
use crate::maze::{Cell, MazeGrid};

/// Axis directions with a smaller magnitude than this are treated as
/// parallel to the corresponding face planes and skipped.
pub const RAY_AXIS_EPSILON: f32 = 1e-6;

/// Number of cubes stacked vertically in every wall column.
pub const WALL_COLUMN_CUBES: usize = 5;

/// Fraction of a half block kept clear between the camera and any wall
/// face. Movement clamps this far in front of the face it would cross, and
/// the push-out path places an overlapping camera this far outside.
pub const BOUNDARY_INSET: f32 = 0.32;

/// An axis-aligned box in world space.
///
/// `min` holds the smaller coordinate on each axis and `max` the larger;
/// the bounds are treated as inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner `[x, y, z]`.
    pub min: [f32; 3],
    /// Maximum corner `[x, y, z]`.
    pub max: [f32; 3],
}

impl Aabb {
    /// Whether `point` lies strictly inside the box, boundary excluded.
    ///
    /// Movement resolution parks the camera exactly on the inset shell
    /// around walls, so the overlap check has to treat boundary contact as
    /// outside or a clamped position would count as a new overlap.
    pub fn strictly_inside(&self, point: &Vec3) -> bool {
        (0..3).all(|axis| {
            point.axis(axis) > self.min[axis] && point.axis(axis) < self.max[axis]
        })
    }

    /// Distance along `direction` from `origin` to the nearest face of this
    /// box, or `None` when the ray misses it.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray start point in world space
    /// * `direction` - Ray direction; need not be normalized, distances are
    ///   in multiples of its length
    ///
    /// # Algorithm
    ///
    /// For each axis the ray is not parallel to, intersect the two face
    /// planes on that axis, discard hits behind the origin or at a
    /// non-finite distance, and check the intersection point against the
    /// face's extent on the other two axes (inclusive, so edge and corner
    /// contact counts). The smallest surviving distance wins. A ray started
    /// inside the box reports the face it exits through.
    pub fn ray_entry(&self, origin: &Vec3, direction: &Vec3) -> Option<f32> {
        let mut nearest: Option<f32> = None;
        for axis in 0..3 {
            if direction.axis(axis).abs() <= RAY_AXIS_EPSILON {
                continue;
            }
            for plane in [self.min[axis], self.max[axis]] {
                let t = (plane - origin.axis(axis)) / direction.axis(axis);
                if !t.is_finite() || t < 0.0 {
                    continue;
                }
                let hit = *origin + *direction * t;
                let on_face = (0..3).filter(|&other| other != axis).all(|other| {
                    hit.axis(other) >= self.min[other] && hit.axis(other) <= self.max[other]
                });
                if on_face && nearest.is_none_or(|best| t < best) {
                    nearest = Some(t);
                }
            }
        }
        nearest
    }
}

/// Which wall cube an aim ray landed on.
///
/// `row` and `col` are fine-grid coordinates of the wall cell and `level`
/// the height of the cube within its column, `0` at the floor up to
/// [`WALL_COLUMN_CUBES`]` - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimedBlock {
    /// Fine-grid row of the wall cell.
    pub row: usize,
    /// Fine-grid column of the wall cell.
    pub col: usize,
    /// Height level of the cube within the column, 0 at the floor.
    pub level: usize,
}

/// Resolves camera movement and aim queries against a wall grid.
///
/// The collider itself only carries the block scale; the grid is passed
/// into each query so one collider serves every level.
#[derive(Debug, Clone, Copy)]
pub struct NavigationCollider {
    /// Side length of one wall cube in world units.
    pub block_size: f32,
}

impl NavigationCollider {
    /// Creates a collider for walls of the given block size.
    pub fn new(block_size: f32) -> Self {
        Self { block_size }
    }

    /// Resolves a desired camera position against the wall grid.
    ///
    /// # Arguments
    ///
    /// * `current` - Where the camera is now
    /// * `desired` - Where it wants to be after this frame's movement
    /// * `maze` - Wall grid to collide against
    ///
    /// # Returns
    ///
    /// The position the camera may actually take. Vertical movement is
    /// always granted in full; only the horizontal component is clamped.
    ///
    /// # Algorithm
    ///
    /// 1. Flatten the movement to the xz plane. A negligible horizontal
    ///    component (pure vertical moves, standing still) passes through
    ///    untouched.
    /// 2. Cast a floor-plane ray along the movement direction against the
    ///    unbounded-height footprint box of every wall cell, keeping the
    ///    nearest face distance, and note whether the current position
    ///    already overlaps a footprint. Walls block movement at any
    ///    altitude; only the pick query cares about cube heights.
    /// 3. No face ahead: grant the move.
    /// 4. Face ahead and currently outside: stop [`BOUNDARY_INSET`] (scaled
    ///    by a half block) short of the face. If the face is farther than
    ///    the move, grant the move; if the camera is already within the
    ///    inset shell, it stays where it is rather than stepping backward.
    /// 5. Currently overlapping a footprint (a recovery case, not reachable
    ///    by resolved movement): place the camera the same inset past the
    ///    face the ray exits through, pushing it back into open space.
    pub fn resolve_move(&self, current: Vec3, desired: Vec3, maze: &MazeGrid) -> Vec3 {
        let delta = (desired - current).flattened();
        let length = delta.length();
        if length <= RAY_AXIS_EPSILON {
            return desired;
        }
        let direction = delta * (1.0 / length);
        let origin = current.flattened();

        let mut nearest: Option<f32> = None;
        let mut overlapping = false;
        for row in 0..maze.row_count() {
            for col in 0..maze.col_count() {
                if !maze.is_wall(row, col) {
                    continue;
                }
                let footprint = self.footprint_bounds(row, col);
                if footprint.strictly_inside(&origin) {
                    overlapping = true;
                }
                if let Some(t) = footprint.ray_entry(&origin, &direction) {
                    if nearest.is_none_or(|best| t < best) {
                        nearest = Some(t);
                    }
                }
            }
        }

        let Some(face_distance) = nearest else {
            return desired;
        };

        let inset = BOUNDARY_INSET * self.block_size * 0.5;
        let allowed = if overlapping {
            face_distance + inset
        } else {
            let stop = face_distance - inset;
            if stop >= length {
                return desired;
            }
            stop.max(0.0)
        };

        let resolved = origin + direction * allowed;
        Vec3::new(resolved.x(), desired.y(), resolved.z())
    }

    /// Reports the wall cube the camera's view ray hits first.
    ///
    /// Casts from the camera position along its front vector against every
    /// cube of every wall column and keeps the globally nearest hit.
    /// Returns `None` when the view line leaves the grid without touching a
    /// wall, such as out through the entrance or over the top of the
    /// columns.
    pub fn aimed_block(&self, camera: &Camera, maze: &MazeGrid) -> Option<AimedBlock> {
        let mut best: Option<(f32, AimedBlock)> = None;
        for row in 0..maze.row_count() {
            for col in 0..maze.col_count() {
                if !maze.is_wall(row, col) {
                    continue;
                }
                for level in 0..WALL_COLUMN_CUBES {
                    let cube = self.cube_bounds(row, col, level);
                    let Some(t) = cube.ray_entry(&camera.position, &camera.front) else {
                        continue;
                    };
                    if best.is_none_or(|(nearest, _)| t < nearest) {
                        best = Some((t, AimedBlock { row, col, level }));
                    }
                }
            }
        }
        best.map(|(_, block)| block)
    }

    /// Unbounded-height box over the wall cell's footprint.
    ///
    /// Movement treats walls as vertically infinite, so flying over a
    /// column is not a way through it.
    fn footprint_bounds(&self, row: usize, col: usize) -> Aabb {
        let half = self.block_size * 0.5;
        let center = block_center(&Cell::new(row, col), self.block_size);
        Aabb {
            min: [center.x() - half, f32::NEG_INFINITY, center.z() - half],
            max: [center.x() + half, f32::INFINITY, center.z() + half],
        }
    }

    /// Box of a single cube at the given height level of a wall column.
    fn cube_bounds(&self, row: usize, col: usize, level: usize) -> Aabb {
        let half = self.block_size * 0.5;
        let center = block_center(&Cell::new(row, col), self.block_size);
        let y = level as f32 * self.block_size;
        Aabb {
            min: [center.x() - half, y - half, center.z() - half],
            max: [center.x() + half, y + half, center.z() + half],
        }
    }
}
