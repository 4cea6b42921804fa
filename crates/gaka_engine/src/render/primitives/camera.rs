//! # Flying Camera
//!
//! A free-look perspective camera driven by yaw/pitch angles. The view matrix is
//! cached and only rebuilt after the camera moved or turned.
//!
//! ## Conventions
//! - Right-handed, Y-up world
//! - Yaw of -90° looks down -Z
//! - Angles are in degrees and wrapped into (-180°, 180°]

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Default vertical field of view in degrees
pub const DEFAULT_FOV: f32 = 45.0;

/// Default yaw in degrees (looking down -Z)
pub const DEFAULT_YAW: f32 = -90.0;

/// First-person style camera that can fly in any direction
#[derive(Debug, Clone)]
pub struct FlyingCamera {
    position: Vec3,
    world_up: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    view: Mat4,
    needs_update: bool,
}

impl FlyingCamera {
    /// Create a camera at `position` looking down -Z
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `world_up` - Direction considered "up" for the world (typically +Y)
    pub fn new(position: Vec3, world_up: Vec3) -> Self {
        Self::with_angles(position, world_up, DEFAULT_YAW, 0.0)
    }

    /// Create a camera with an explicit initial orientation
    ///
    /// Angles are in degrees and are wrapped into (-180°, 180°].
    pub fn with_angles(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            world_up,
            front: -Vec3::z(),
            right: Vec3::x(),
            up: Vec3::y(),
            yaw: utils::wrap_degrees(yaw),
            pitch: utils::wrap_degrees(pitch),
            fov: DEFAULT_FOV,
            view: Mat4::identity(),
            needs_update: true,
        };
        camera.update_vectors();
        camera
    }

    fn update_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);

        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
        self.needs_update = true;
    }

    /// View matrix, rebuilt only when the camera changed since the last call
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.needs_update {
            self.view = Mat4::look_at(&self.position, &(self.position + self.front), &self.up);
            self.needs_update = false;
            log::trace!("Camera view matrix rebuilt at {:?}", self.position);
        }
        self.view
    }

    /// Whether the next [`FlyingCamera::view_matrix`] call rebuilds the matrix
    pub const fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Move along the viewing direction
    pub fn move_by(&mut self, distance: f32) {
        self.position += self.front * distance;
        self.needs_update = true;
    }

    /// Move sideways; positive distances go right
    pub fn strafe_by(&mut self, distance: f32) {
        self.position += self.right * distance;
        self.needs_update = true;
    }

    /// Move along the camera's up vector
    pub fn move_up(&mut self, distance: f32) {
        self.position += self.up * distance;
        self.needs_update = true;
    }

    /// Turn left/right by `degrees`
    pub fn yaw_motion(&mut self, degrees: f32) {
        self.yaw = utils::wrap_degrees(self.yaw + degrees);
        self.update_vectors();
    }

    /// Turn up/down by `degrees`
    pub fn pitch_motion(&mut self, degrees: f32) {
        self.pitch = utils::wrap_degrees(self.pitch + degrees);
        self.update_vectors();
    }

    /// Camera position in world space
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.needs_update = true;
    }

    /// Vertical field of view in degrees
    pub const fn fov(&self) -> f32 {
        self.fov
    }

    /// Set the vertical field of view in degrees
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Yaw in degrees
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit viewing direction
    pub const fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right vector
    pub const fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector
    pub const fn up(&self) -> Vec3 {
        self.up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> FlyingCamera {
        FlyingCamera::new(Vec3::new(0.0, 2.0, 8.0), Vec3::y())
    }

    #[test]
    fn test_defaults() {
        let cam = camera();
        assert_relative_eq!(cam.fov(), 45.0);
        assert_relative_eq!(cam.yaw(), -90.0);
        assert_relative_eq!(cam.pitch(), 0.0);
        assert_relative_eq!(cam.front(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(cam.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(cam.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut cam = FlyingCamera::with_angles(Vec3::zeros(), Vec3::y(), 0.0, 0.0);
        cam.yaw_motion(200.0);
        assert_relative_eq!(cam.yaw(), -160.0, epsilon = 1e-4);

        cam.yaw_motion(-20.0);
        assert_relative_eq!(cam.yaw(), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_wraps() {
        let mut cam = FlyingCamera::with_angles(Vec3::zeros(), Vec3::y(), -90.0, 170.0);
        cam.pitch_motion(20.0);
        assert_relative_eq!(cam.pitch(), -170.0, epsilon = 1e-4);
    }

    #[test]
    fn test_tiny_yaw_past_half_turn_stays_in_range() {
        let mut cam = FlyingCamera::with_angles(Vec3::zeros(), Vec3::y(), 179.999_98, 0.0);
        cam.yaw_motion(0.000_03);
        assert!(cam.yaw() > -180.0 && cam.yaw() <= 180.0);
    }

    #[test]
    fn test_view_matrix_cache() {
        let mut cam = camera();
        assert!(cam.needs_update());

        let first = cam.view_matrix();
        assert!(!cam.needs_update());
        assert_eq!(cam.view_matrix(), first);

        cam.move_by(1.0);
        assert!(cam.needs_update());
        assert_ne!(cam.view_matrix(), first);
    }

    #[test]
    fn test_movement() {
        let mut cam = camera();
        cam.move_by(2.0);
        assert_relative_eq!(cam.position(), Vec3::new(0.0, 2.0, 6.0), epsilon = 1e-6);

        cam.strafe_by(0.5);
        assert_relative_eq!(cam.position(), Vec3::new(0.5, 2.0, 6.0), epsilon = 1e-6);

        cam.move_up(-1.0);
        assert_relative_eq!(cam.position(), Vec3::new(0.5, 1.0, 6.0), epsilon = 1e-6);
    }

    #[test]
    fn test_view_matrix_puts_camera_at_origin() {
        let mut cam = camera();
        cam.yaw_motion(30.0);
        let view = cam.view_matrix();
        assert_relative_eq!(view.transform_point3(&cam.position()), Vec3::zeros(), epsilon = 1e-5);

        let ahead = view.transform_point3(&(cam.position() + cam.front()));
        assert_relative_eq!(ahead, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }
}
