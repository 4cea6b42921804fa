//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene graph and the renderer.
//! All matrices follow the OpenGL conventions (right-handed view space, clip-space
//! depth in [-1, 1]) expected by the shader programs the engine drives.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Common math utilities
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians.to_degrees()
    }

    /// Wrap an angle in degrees into the half-open range (-180, 180]
    ///
    /// Used by the flying camera so that repeated yaw/pitch motions never
    /// accumulate unbounded angles.
    pub fn wrap_degrees(angle: f32) -> f32 {
        let wrapped = 180.0 - (180.0 - angle).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360
        if wrapped <= -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a translation matrix
    fn translation(offset: &Vec3) -> Mat4;

    /// Create a rotation matrix of `angle_degrees` around `axis`
    ///
    /// A zero-length axis yields the identity matrix.
    fn rotation_degrees(angle_degrees: f32, axis: &Vec3) -> Mat4;

    /// Create an OpenGL perspective projection matrix
    ///
    /// `fov_y` is expressed in radians.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4;

    /// Transform a point (w = 1) and drop the homogeneous coordinate
    fn transform_point3(&self, point: &Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn translation(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset)
    }

    fn rotation_degrees(angle_degrees: f32, axis: &Vec3) -> Mat4 {
        Unit::try_new(*axis, f32::EPSILON).map_or_else(Mat4::identity, |axis| {
            Mat4::from_axis_angle(&axis, utils::deg_to_rad(angle_degrees))
        })
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // Same layout as glm::perspective
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = -(far + near) / (far - near);
        result[(2, 3)] = -(2.0 * far * near) / (far - near);
        result[(3, 2)] = -1.0;
        result
    }

    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }

    fn transform_point3(&self, point: &Vec3) -> Vec3 {
        self.transform_point(&Point3::from(*point)).coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(utils::wrap_degrees(200.0), -160.0);
        assert_relative_eq!(utils::wrap_degrees(180.0), 180.0);
        assert_relative_eq!(utils::wrap_degrees(-180.0), 180.0);
        assert_relative_eq!(utils::wrap_degrees(-190.0), 170.0);
        assert_relative_eq!(utils::wrap_degrees(45.0), 45.0);
        assert_relative_eq!(utils::wrap_degrees(720.0 + 10.0), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_wrap_degrees_never_returns_minus_half_turn() {
        for angle in [180.00002_f32, 180.00001, -180.00002, 540.00003, -179.99998] {
            let wrapped = utils::wrap_degrees(angle);
            assert!(wrapped > -180.0 && wrapped <= 180.0, "{angle} wrapped to {wrapped}");
        }
        assert_relative_eq!(utils::wrap_degrees(180.00002), 180.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rotation_about_z() {
        let rotation = Mat4::rotation_degrees(90.0, &Vec3::new(0.0, 0.0, 1.0));
        let rotated = rotation.transform_point3(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_axis_rotation_is_identity() {
        let rotation = Mat4::rotation_degrees(45.0, &Vec3::zeros());
        assert_eq!(rotation, Mat4::identity());
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let projection = Mat4::perspective(utils::deg_to_rad(45.0), 16.0 / 9.0, 0.5, 1000.0);

        let near = projection * Vec4::new(0.0, 0.0, -0.5, 1.0);
        let far = projection * Vec4::new(0.0, 0.0, -1000.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 2.0, 8.0);
        let view = Mat4::look_at(&eye, &Vec3::new(0.0, 2.0, 7.0), &Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(view.transform_point3(&eye), Vec3::zeros(), epsilon = 1e-6);
    }
}
