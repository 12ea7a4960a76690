//! Game session state: phase machine, cameras, run clock, and collectibles.
//!
//! This module defines the [`GameSession`] struct, which owns everything
//! mutable about one play session: the current maze, the avatar and drone
//! cameras, which of them input is bound to, the run clock, and the
//! collectibles scattered over the level.

pub mod camera;
pub mod collectibles;
pub mod collision;

use std::time::{Duration, Instant};

use rand::prelude::*;

use self::camera::{Camera, CameraMovement, PITCH_LIMIT};
use self::collectibles::{CollectibleMarker, place_collectibles};
use self::collision::{AimedBlock, NavigationCollider};
use crate::math::Vec3;
use crate::math::coordinates::{Direction, direction_to_yaw, world_to_cell};
use crate::maze::{Cell, MazeGenerator, MazeGrid};
use crate::perf;

/// Avatar eye height above a cell center, as a fraction of the block size.
const AVATAR_EYE_HEIGHT_FACTOR: f32 = 0.5;

/// Static world parameters a session is built from.
///
/// `border_padding` is the ring of extra floor cells drawn around the maze;
/// the session stores it for the rendering shell and never computes on it.
#[derive(Debug, Clone, Copy)]
pub struct WorldConfig {
    /// Coarse maze rows requested from the generator.
    pub rows: i32,
    /// Coarse maze columns requested from the generator.
    pub cols: i32,
    /// Side length of one wall cube in world units.
    pub block_size: f32,
    /// Extra floor cells drawn around the maze border.
    pub border_padding: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 11,
            cols: 11,
            block_size: 2.0,
            border_padding: 2,
        }
    }
}

/// Where the session is in its explore / timed-run / done cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Exploring freely, no clock running.
    FreeRoam,
    /// Timed run in progress; collectibles and the goal are live.
    Playing,
    /// Run complete, end time frozen until the level is rebuilt.
    Finished,
}

/// Which camera input is currently bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCamera {
    /// The avatar walking the maze floor; movement is collision-resolved.
    Avatar,
    /// The drone hovering overhead; movement is unrestricted.
    Drone,
}

/// Wall-clock accounting for one timed run.
///
/// Tracks the raw span between start and finish, the total time spent bound
/// to the drone, and collected bonuses. The scored time is the raw span
/// minus drone time minus bonuses, floored at zero, so overhead scouting
/// never improves a score and bonuses always help.
#[derive(Debug, Clone)]
pub struct RunClock {
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    bonus: Duration,
    drone_time: Duration,
    drone_since: Option<Instant>,
}

impl RunClock {
    /// A clock that has not started yet.
    pub fn new() -> Self {
        Self {
            started_at: None,
            finished_at: None,
            bonus: Duration::ZERO,
            drone_time: Duration::ZERO,
            drone_since: None,
        }
    }

    /// Starts the run, discarding any previous accounting.
    pub fn start(&mut self) {
        *self = Self::new();
        self.started_at = Some(Instant::now());
    }

    /// Freezes the run, closing any open drone segment first.
    pub fn finish(&mut self) {
        if self.started_at.is_none() || self.finished_at.is_some() {
            return;
        }
        self.end_drone_segment();
        self.finished_at = Some(Instant::now());
    }

    /// Marks the moment input switched to the drone.
    ///
    /// Only an actively running clock tracks drone time; repeated calls
    /// while a segment is already open do nothing.
    pub fn begin_drone_segment(&mut self) {
        if self.is_running() && self.drone_since.is_none() {
            self.drone_since = Some(Instant::now());
        }
    }

    /// Closes the open drone segment, if any, and banks its span.
    pub fn end_drone_segment(&mut self) {
        if let Some(since) = self.drone_since.take() {
            self.drone_time += since.elapsed();
        }
    }

    /// Credits a collectible bonus against the scored time.
    pub fn add_bonus(&mut self, bonus: Duration) {
        self.bonus += bonus;
    }

    /// Whether the run has started and not yet finished.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.finished_at.is_none()
    }

    /// Raw span from start until finish, or until now while running.
    pub fn raw_time(&self) -> Duration {
        let Some(started) = self.started_at else {
            return Duration::ZERO;
        };
        match self.finished_at {
            Some(finished) => finished.duration_since(started),
            None => started.elapsed(),
        }
    }

    /// Total time spent bound to the drone, including an open segment.
    pub fn drone_total(&self) -> Duration {
        match self.drone_since {
            Some(since) => self.drone_time + since.elapsed(),
            None => self.drone_time,
        }
    }

    /// Total collectible credit banked so far.
    pub fn bonus_total(&self) -> Duration {
        self.bonus
    }

    /// The run's score: raw time minus drone time minus bonuses.
    pub fn scored_time(&self) -> Duration {
        self.raw_time()
            .saturating_sub(self.drone_total())
            .saturating_sub(self.bonus)
    }
}

impl Default for RunClock {
    /// Returns a clock that has not started yet.
    fn default() -> Self {
        Self::new()
    }
}

/// Whether two world positions are within pickup range of each other,
/// measured on the horizontal plane against half a block.
pub fn within_reach(a: &Vec3, b: &Vec3, block_size: f32) -> bool {
    a.horizontal_distance_to(b) < block_size * 0.5
}

/// One play session: the current level plus all mutable game state.
///
/// The session owns the maze, both cameras, the run clock, and the
/// collectibles, and routes input to whichever camera is bound. Avatar
/// movement goes through wall collision; drone movement does not. Levels
/// are replaced wholesale by [`advance_level`](GameSession::advance_level)
/// and [`restart_level`](GameSession::restart_level).
///
/// # Examples
///
/// ```rust
/// use dedalo::game::{GamePhase, GameSession, WorldConfig};
///
/// let mut session = GameSession::new(WorldConfig::default());
/// assert_eq!(session.phase(), GamePhase::FreeRoam);
///
/// session.start_run();
/// assert_eq!(session.phase(), GamePhase::Playing);
/// assert!(session.clock().is_running());
/// ```
pub struct GameSession {
    config: WorldConfig,
    collider: NavigationCollider,
    maze: MazeGrid,
    avatar: Camera,
    drone: Camera,
    active: ActiveCamera,
    phase: GamePhase,
    clock: RunClock,
    collectibles: Vec<CollectibleMarker>,
    level: u32,
}

impl GameSession {
    /// Creates a session with a freshly generated level.
    pub fn new(config: WorldConfig) -> Self {
        Self::with_rng(config, &mut thread_rng())
    }

    /// Creates a session drawing all level randomness from the supplied
    /// source, so tests and replays get a reproducible maze and
    /// collectible layout.
    pub fn with_rng<R: Rng>(config: WorldConfig, rng: &mut R) -> Self {
        let maze = Self::generate_maze(config, rng);
        let collectibles = place_collectibles(&maze, rng);
        let avatar = Self::spawn_avatar(&maze, config.block_size);
        let drone = Self::spawn_drone(&maze, config.block_size);
        Self {
            config,
            collider: NavigationCollider::new(config.block_size),
            maze,
            avatar,
            drone,
            active: ActiveCamera::Avatar,
            phase: GamePhase::FreeRoam,
            clock: RunClock::new(),
            collectibles,
            level: 1,
        }
    }

    /// Starts the timed run from free roam.
    ///
    /// The avatar respawns at the maze entrance facing into the maze and
    /// the clock starts. Calls outside the free-roam phase do nothing, so
    /// an extra keypress cannot reset a run in progress.
    pub fn start_run(&mut self) {
        if self.phase != GamePhase::FreeRoam {
            return;
        }
        self.avatar = Self::spawn_avatar(&self.maze, self.config.block_size);
        self.phase = GamePhase::Playing;
        self.clock.start();
        if self.active == ActiveCamera::Drone {
            self.clock.begin_drone_segment();
        }
    }

    /// Per-frame game logic: collectible pickup and goal detection.
    ///
    /// Does nothing outside the playing phase. Any collectible within reach
    /// of the avatar is collected and its bonus credited; reaching the exit
    /// region finishes the run.
    pub fn step(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let position = self.avatar.position;
        for marker in &mut self.collectibles {
            if marker.collected {
                continue;
            }
            let anchor = marker.world_position(self.config.block_size, position.y());
            if within_reach(&position, &anchor, self.config.block_size) {
                if let Some(bonus) = marker.try_collect() {
                    self.clock.add_bonus(bonus);
                }
            }
        }

        let goal = self.maze.end_point(self.config.block_size);
        if within_reach(&position, &goal, self.config.block_size) {
            self.finish_run();
        }
    }

    /// Ends the timed run and freezes the clock.
    pub fn finish_run(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.clock.finish();
        self.phase = GamePhase::Finished;
    }

    /// Moves on to the next level with a brand new maze.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.rebuild(&mut thread_rng());
    }

    /// Replays the current level number on a brand new maze.
    pub fn restart_level(&mut self) {
        self.rebuild(&mut thread_rng());
    }

    /// Applies a movement intent to the input-bound camera.
    ///
    /// The avatar's desired position is resolved against the walls before
    /// it is applied; the drone flies free.
    pub fn move_active(&mut self, movement: CameraMovement, delta_time: f32) {
        match self.active {
            ActiveCamera::Avatar => {
                let desired = self.avatar.move_toward(movement, delta_time);
                let resolved = self
                    .collider
                    .resolve_move(self.avatar.position, desired, &self.maze);
                self.avatar.set_position(resolved);
            }
            ActiveCamera::Drone => {
                let desired = self.drone.move_toward(movement, delta_time);
                self.drone.set_position(desired);
            }
        }
    }

    /// Applies look input to the input-bound camera.
    pub fn look_active(&mut self, delta_x: f32, delta_y: f32) {
        self.active_camera_mut().look_around(delta_x, delta_y);
    }

    /// Applies zoom input to the input-bound camera.
    pub fn zoom_active(&mut self, scroll_y: f32) {
        self.active_camera_mut().zoom(scroll_y);
    }

    /// Sets the movement speed of the input-bound camera, usually to one
    /// of the camera speed tiers.
    pub fn change_active_speed(&mut self, speed: f32) {
        self.active_camera_mut().change_speed(speed);
    }

    /// Binds input to the given camera.
    ///
    /// During a run, time spent bound to the drone is accumulated
    /// separately so it can be excluded from the score.
    pub fn bind_camera(&mut self, target: ActiveCamera) {
        if self.active == target {
            return;
        }
        self.active = target;
        match target {
            ActiveCamera::Drone => self.clock.begin_drone_segment(),
            ActiveCamera::Avatar => self.clock.end_drone_segment(),
        }
    }

    /// Binds input to whichever camera is not bound now.
    pub fn toggle_camera(&mut self) {
        let target = match self.active {
            ActiveCamera::Avatar => ActiveCamera::Drone,
            ActiveCamera::Drone => ActiveCamera::Avatar,
        };
        self.bind_camera(target);
    }

    /// The wall cube the input-bound camera is aiming at, if any.
    pub fn aimed_block(&self) -> Option<AimedBlock> {
        self.collider.aimed_block(self.active_camera(), &self.maze)
    }

    /// The fine-grid cell under the avatar.
    pub fn avatar_cell(&self) -> Cell {
        world_to_cell(
            &self.avatar.position,
            self.maze.row_count(),
            self.maze.col_count(),
            self.config.block_size,
        )
    }

    /// The session's static world parameters.
    pub fn config(&self) -> WorldConfig {
        self.config
    }

    /// The current level's wall grid.
    pub fn maze(&self) -> &MazeGrid {
        &self.maze
    }

    /// Current phase of the session.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Which camera input is bound to.
    pub fn active(&self) -> ActiveCamera {
        self.active
    }

    /// The run clock for the current level.
    pub fn clock(&self) -> &RunClock {
        &self.clock
    }

    /// The collectibles of the current level, collected or not.
    pub fn collectibles(&self) -> &[CollectibleMarker] {
        &self.collectibles
    }

    /// One-based level counter.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The avatar camera.
    pub fn avatar(&self) -> &Camera {
        &self.avatar
    }

    /// The drone camera.
    pub fn drone(&self) -> &Camera {
        &self.drone
    }

    /// The camera input is currently bound to.
    pub fn active_camera(&self) -> &Camera {
        match self.active {
            ActiveCamera::Avatar => &self.avatar,
            ActiveCamera::Drone => &self.drone,
        }
    }

    fn active_camera_mut(&mut self) -> &mut Camera {
        match self.active {
            ActiveCamera::Avatar => &mut self.avatar,
            ActiveCamera::Drone => &mut self.drone,
        }
    }

    /// Replaces the level wholesale: new maze, new collectibles, cameras
    /// respawned, clock and phase reset.
    fn rebuild<R: Rng>(&mut self, rng: &mut R) {
        self.maze = Self::generate_maze(self.config, rng);
        self.collectibles = place_collectibles(&self.maze, rng);
        self.avatar = Self::spawn_avatar(&self.maze, self.config.block_size);
        self.drone = Self::spawn_drone(&self.maze, self.config.block_size);
        self.active = ActiveCamera::Avatar;
        self.phase = GamePhase::FreeRoam;
        self.clock = RunClock::new();
    }

    fn generate_maze<R: Rng>(config: WorldConfig, rng: &mut R) -> MazeGrid {
        perf::time("maze generation", || {
            MazeGenerator::generate_with_rng(config.rows, config.cols, rng)
        })
    }

    /// Avatar at the entrance, eye height up, facing into the maze.
    fn spawn_avatar(maze: &MazeGrid, block_size: f32) -> Camera {
        let start = maze.start_point(block_size);
        let eye = Vec3::new(
            start.x(),
            block_size * AVATAR_EYE_HEIGHT_FACTOR,
            start.z(),
        );
        Camera::new(
            eye,
            Vec3::new(0.0, 1.0, 0.0),
            direction_to_yaw(Direction::South),
            0.0,
        )
    }

    /// Drone centered above the maze, pitched down to the limit.
    fn spawn_drone(maze: &MazeGrid, block_size: f32) -> Camera {
        let x = (maze.row_count() - 1) as f32 * 0.5 * block_size;
        let z = (maze.col_count() - 1) as f32 * 0.5 * block_size;
        let altitude = maze.row_count().max(maze.col_count()) as f32 * block_size;
        Camera::new(
            Vec3::new(x, altitude, z),
            Vec3::new(0.0, 1.0, 0.0),
            direction_to_yaw(Direction::South),
            -PITCH_LIMIT,
        )
    }
}
