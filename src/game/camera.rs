//! Free-look camera state and movement intents.
//!
//! This module defines the [`Camera`] struct, which tracks a viewpoint's
//! position and orientation, and turns input into movement intents.
//!
//! # Overview
//!
//! The camera system handles:
//! - **Orientation**: yaw/pitch Euler angles kept in degrees, with the
//!   front/right/up basis renormalized on every look change
//! - **Movement intents**: [`move_toward`](Camera::move_toward) computes the
//!   position a movement key asks for without applying it, so a collider can
//!   adjust it first
//! - **Zoom**: scroll input narrows or widens the field of view inside fixed
//!   bounds
//!
//! Two cameras share this type: the avatar walking the maze floor and the
//! drone hovering above it looking down. Only the way the session applies
//! their desired positions differs.
//!
//! # Coordinate System
//!
//! Right-handed, y up. Yaw is measured on the xz plane from +x (0° = +x,
//! 90° = +z), pitch from the horizon (+ up, - down). Forward and backward
//! intents move along the horizontal projection of the view direction, so
//! looking at the floor never slows walking.

use crate::math::Vec3;

/// Default yaw in degrees; -90° points the camera down -z.
pub const YAW_DEFAULT: f32 = -90.0;
/// Pitch magnitude limit in degrees. Keeps the view from flipping over the
/// vertical and the right vector from degenerating.
pub const PITCH_LIMIT: f32 = 89.0;
/// Careful-movement speed tier, in world units per second.
pub const SPEED_SLOW: f32 = 0.5;
/// Default walking speed tier, in world units per second.
pub const SPEED_NORMAL: f32 = 3.6;
/// Fast traversal speed tier, in world units per second.
pub const SPEED_FAST: f32 = 16.0;
/// Narrowest field of view the zoom can reach, in degrees.
pub const FOV_MIN: f32 = 1.0;
/// Widest field of view, in degrees. Also the default.
pub const FOV_MAX: f32 = 45.0;
/// Default look sensitivity multiplier applied to cursor deltas.
pub const SENSITIVITY_DEFAULT: f32 = 0.1;

/// Movement intents a camera can be asked to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Walk along the horizontal projection of the view direction.
    Forward,
    /// Walk against the horizontal projection of the view direction.
    Backward,
    /// Strafe along the negative right vector.
    Left,
    /// Strafe along the right vector.
    Right,
    /// Rise along the world up vector.
    Up,
    /// Sink against the world up vector.
    Down,
}

/// A free-look viewpoint described by position plus yaw/pitch angles.
///
/// The derived basis vectors (`front`, `right`, `up`) are kept normalized
/// and consistent with the angles; every method that changes yaw or pitch
/// recomputes them. Movement never mutates the position directly: callers
/// take the desired position from [`move_toward`](Camera::move_toward), run
/// it through collision, and store the result with
/// [`set_position`](Camera::set_position).
///
/// # Examples
///
/// ```rust
/// use dedalo::game::camera::{Camera, CameraMovement};
/// use dedalo::math::Vec3;
///
/// let camera = Camera::with_target(
///     Vec3::new(0.0, 1.0, 0.0),
///     Vec3::new(0.0, 1.0, 0.0),
///     Vec3::new(5.0, 1.0, 0.0),
/// );
/// let desired = camera.move_toward(CameraMovement::Forward, 1.0);
/// assert!(desired.x() > 0.0); // walking toward the target on +x
/// assert_eq!(desired.y(), 1.0); // forward movement stays horizontal
/// ```
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position of the viewpoint.
    pub position: Vec3,
    /// Normalized view direction derived from yaw and pitch.
    pub front: Vec3,
    /// Normalized up vector of the view basis.
    pub up: Vec3,
    /// Normalized right vector of the view basis.
    pub right: Vec3,
    /// Normalized world up direction the basis is built against.
    pub world_up: Vec3,
    /// Yaw angle in degrees, measured on the xz plane from +x.
    pub yaw: f32,
    /// Pitch angle in degrees, clamped to [`PITCH_LIMIT`] either way.
    pub pitch: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Look sensitivity multiplier applied to cursor deltas.
    pub sensitivity: f32,
    /// Field of view in degrees, kept inside [`FOV_MIN`]..=[`FOV_MAX`].
    pub fov: f32,
}

impl Camera {
    /// Creates a camera at `position` with explicit yaw and pitch angles.
    ///
    /// `world_up` is normalized and the view basis is derived from the
    /// angles immediately.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            world_up: world_up.normalize(),
            yaw,
            pitch,
            speed: SPEED_NORMAL,
            sensitivity: SENSITIVITY_DEFAULT,
            fov: FOV_MAX,
        };
        camera.update_vectors();
        camera
    }

    /// Creates a camera at `position` already looking at `target`.
    pub fn with_target(position: Vec3, world_up: Vec3, target: Vec3) -> Self {
        let mut camera = Self::new(position, world_up, YAW_DEFAULT, 0.0);
        camera.locate_target(target);
        camera
    }

    /// Re-aims the camera at a world-space target without moving it.
    ///
    /// Converts the direction toward `target` back into yaw/pitch angles
    /// and rebuilds the basis, so later look input continues smoothly from
    /// the new orientation.
    pub fn locate_target(&mut self, target: Vec3) {
        let direction = (target - self.position).normalize();
        self.pitch = direction.y().asin().to_degrees();
        self.yaw = direction.z().atan2(direction.x()).to_degrees();
        self.update_vectors();
    }

    /// Computes the position this camera wants to be at after carrying out
    /// a movement intent for `delta_time` seconds.
    ///
    /// Forward and backward run along the horizontal projection of the view
    /// direction (the world-up/right cross product), so pitch never bleeds
    /// into walking speed. Up and down ride the world up vector. The camera
    /// itself is not moved; apply the result with
    /// [`set_position`](Camera::set_position) once collision has had its
    /// say.
    pub fn move_toward(&self, direction: CameraMovement, delta_time: f32) -> Vec3 {
        let velocity = self.speed * delta_time;
        let horizontal_front = self.world_up.cross(&self.right);
        match direction {
            CameraMovement::Forward => self.position + horizontal_front * velocity,
            CameraMovement::Backward => self.position - horizontal_front * velocity,
            CameraMovement::Left => self.position - self.right * velocity,
            CameraMovement::Right => self.position + self.right * velocity,
            CameraMovement::Up => self.position + self.world_up * velocity,
            CameraMovement::Down => self.position - self.world_up * velocity,
        }
    }

    /// Moves the camera to an already-validated world position.
    ///
    /// Orientation is untouched, so no basis update is needed.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Applies cursor movement to the view angles.
    ///
    /// Deltas are scaled by the sensitivity; positive `delta_x` looks
    /// right, positive `delta_y` looks up. Pitch is clamped to
    /// [`PITCH_LIMIT`] so the view cannot flip over the vertical.
    pub fn look_around(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x * self.sensitivity;
        self.pitch += delta_y * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Sets the movement speed, usually to one of the tier constants
    /// ([`SPEED_SLOW`], [`SPEED_NORMAL`], [`SPEED_FAST`]).
    pub fn change_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Applies scroll input to the field of view.
    ///
    /// Scrolling up (`positive scroll_y`) zooms in by narrowing the fov;
    /// the result is clamped to [`FOV_MIN`]..=[`FOV_MAX`].
    pub fn zoom(&mut self, scroll_y: f32) {
        self.fov = (self.fov - scroll_y).clamp(FOV_MIN, FOV_MAX);
    }

    /// Rebuilds the front/right/up basis from the current yaw and pitch.
    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

impl Default for Camera {
    /// A camera at the origin looking down -z with default tiers.
    fn default() -> Self {
        Self::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), YAW_DEFAULT, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    /// The derived basis stays orthonormal through arbitrary look input.
    #[test]
    fn test_basis_stays_orthonormal_after_look() {
        let mut camera = Camera::default();
        for (dx, dy) in [(250.0, -90.0), (-13.7, 44.1), (720.0, 500.0)] {
            camera.look_around(dx, dy);
            assert!((camera.front.length() - 1.0).abs() < EPSILON);
            assert!((camera.right.length() - 1.0).abs() < EPSILON);
            assert!((camera.up.length() - 1.0).abs() < EPSILON);
            assert!(camera.front.dot(&camera.right).abs() < EPSILON);
            assert!(camera.front.dot(&camera.up).abs() < EPSILON);
            assert!(camera.right.dot(&camera.up).abs() < EPSILON);
        }
    }

    /// Pitch clamps at the limit however far the cursor travels.
    #[test]
    fn test_pitch_clamps_at_limit() {
        let mut camera = Camera::default();
        camera.look_around(0.0, 100_000.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.look_around(0.0, -200_000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    /// Zoom narrows and widens the fov but never leaves its bounds.
    #[test]
    fn test_zoom_clamps_fov() {
        let mut camera = Camera::default();
        camera.zoom(10.0);
        assert_eq!(camera.fov, FOV_MAX - 10.0);
        camera.zoom(1000.0);
        assert_eq!(camera.fov, FOV_MIN);
        camera.zoom(-1000.0);
        assert_eq!(camera.fov, FOV_MAX);
    }

    /// Re-aiming at a target on +z lands on a 90° yaw with level pitch.
    #[test]
    fn test_locate_target_recovers_angles() {
        let mut camera = Camera::default();
        camera.locate_target(Vec3::new(0.0, 0.0, 5.0));
        assert!((camera.yaw - 90.0).abs() < EPSILON);
        assert!(camera.pitch.abs() < EPSILON);
        assert!((camera.front.z() - 1.0).abs() < EPSILON);

        // Aiming below the horizon pitches down.
        camera.locate_target(Vec3::new(3.0, -3.0, 0.0));
        assert!(camera.pitch < 0.0);
    }

    /// Walking forward while looking at the floor stays horizontal and at
    /// full speed.
    #[test]
    fn test_forward_intent_stays_horizontal() {
        let mut camera = Camera::new(
            Vec3::new(2.0, 1.0, 2.0),
            Vec3::new(0.0, 1.0, 0.0),
            0.0,
            -45.0,
        );
        camera.change_speed(SPEED_FAST);

        let desired = camera.move_toward(CameraMovement::Forward, 0.5);
        assert_eq!(desired.y(), camera.position.y());
        let traveled = camera.position.horizontal_distance_to(&desired);
        assert!((traveled - SPEED_FAST * 0.5).abs() < 1e-3);
    }

    /// Strafing moves perpendicular to the walking direction, and rising
    /// rides the world up vector.
    #[test]
    fn test_strafe_and_rise_directions() {
        let camera = Camera::new(Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), 37.0, 20.0);

        let forward = camera.move_toward(CameraMovement::Forward, 1.0) - camera.position;
        let sideways = camera.move_toward(CameraMovement::Right, 1.0) - camera.position;
        assert!(forward.dot(&sideways).abs() < 1e-3);
        assert_eq!(sideways.y(), 0.0);

        let risen = camera.move_toward(CameraMovement::Up, 1.0);
        assert_eq!(risen.x(), camera.position.x());
        assert_eq!(risen.z(), camera.position.z());
        assert!((risen.y() - camera.speed).abs() < EPSILON);
    }
}
