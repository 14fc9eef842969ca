//! Math utilities and types
//!
//! Thin aliases over `nalgebra` so the rest of the engine speaks in `Vec3`,
//! `Mat4` and `Quat` rather than generic matrix types.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector3, Vector4};

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

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Point3, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Transform a point (w = 1) by a homogeneous matrix
    pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
        matrix.transform_point(&Point3::from(point)).coords
    }

    /// Transform a direction (w = 0) by a homogeneous matrix, translation ignored
    pub fn transform_vector(matrix: &Mat4, vector: Vec3) -> Vec3 {
        matrix.transform_vector(&vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_conversion_roundtrip() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = 1e-6);
        assert_relative_eq!(utils::rad_to_deg(constants::PI * 0.5), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_vector_ignores_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(5.0, 0.0, 0.0));
        let moved = utils::transform_point(&matrix, Vec3::zeros());
        let direction = utils::transform_vector(&matrix, Vec3::x());

        assert_relative_eq!(moved, Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(direction, Vec3::x());
    }
}
