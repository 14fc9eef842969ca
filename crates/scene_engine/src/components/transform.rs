//! Spatial transform component
//!
//! Every game object carries exactly one transform as its first component.
//! It holds the local position, rotation and scale relative to the parent;
//! world matrices are resolved through the scene, see
//! [`Scene::world_matrix`](crate::scene::Scene::world_matrix).

use crate::foundation::math::{utils, Mat4, Quat, Vec3};
use crate::scene::Component;

/// Local placement of a game object relative to its parent
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Component for Transform {}

impl Transform {
    /// Identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform placed at `position`
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Local rotation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Local scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the local position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Move by `offset` in parent space
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Set the local rotation
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Rotate by Euler angles in degrees, applied about the local axes
    pub fn rotate_by(&mut self, x: f32, y: f32, z: f32) {
        let delta = Quat::from_euler_angles(
            utils::deg_to_rad(x),
            utils::deg_to_rad(y),
            utils::deg_to_rad(z),
        );
        self.rotation *= delta;
    }

    /// Set the local scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Local-to-parent matrix, translation * rotation * scale
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}
