//! Renderable mesh component

use crate::foundation::collections::MeshHandle;
use crate::scene::{Component, Context};

/// Draws a named mesh with its object's world transform
#[derive(Debug, Clone)]
pub struct Model {
    mesh_name: String,
    mesh: Option<MeshHandle>,
}

impl Model {
    /// Model drawing the mesh registered under `mesh_name`
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self {
            mesh_name: mesh_name.into(),
            mesh: None,
        }
    }

    /// Name of the drawn mesh
    pub fn mesh_name(&self) -> &str {
        &self.mesh_name
    }

    /// Handle resolved on start
    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }
}

impl Component for Model {
    fn start(&mut self, ctx: &mut Context<'_>) {
        self.mesh = Some(ctx.services.meshes.mesh(&self.mesh_name));
    }

    fn post_update(&mut self, ctx: &mut Context<'_>) {
        let Some(mesh) = self.mesh else {
            return;
        };
        if let Some(transformation) = ctx.scene.rendering_matrix(ctx.game_object()) {
            ctx.services.renderer.render(mesh, &transformation);
        }
    }
}
