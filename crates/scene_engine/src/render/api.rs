//! Renderer trait consumed by the scene core

use serde::{Deserialize, Serialize};

use crate::foundation::collections::MeshHandle;
use crate::foundation::math::Mat4;

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque green, used for idle collider wireframes
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque red, used for touching collider wireframes
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Opaque color from red, green and blue
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Rendering functionality provided by the platform layer
///
/// Calls arrive during the post-update phase of a frame, after
/// [`on_start_rendering_frame`](Renderer::on_start_rendering_frame).
pub trait Renderer {
    /// Called by the engine before any draw call of a frame
    fn on_start_rendering_frame(&mut self) {}

    /// Draw `mesh` placed by the world transformation `transformation`
    fn render(&mut self, mesh: MeshHandle, transformation: &Mat4);

    /// Draw `mesh` as a wireframe in `color`, used for debug visualization
    fn render_wireframe(&mut self, mesh: MeshHandle, color: Color, transformation: &Mat4);
}
