//! Box collider component

use crate::foundation::collections::MeshHandle;
use crate::foundation::math::{Mat4, Vec3};
use crate::physics::ColliderShape;
use crate::render::{Color, Primitives};
use crate::scene::{Collision, Component, Context};

/// Box-shaped collision volume following its object's transform
///
/// The collider registers itself with the collisions system when attached
/// and unregisters when finished. With collider drawing enabled it draws
/// its box as a wireframe, red while touching another collider.
#[derive(Debug, Clone)]
pub struct BoxCollider {
    shape: ColliderShape,
    mesh: Option<MeshHandle>,
    touching: usize,
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, 1.0))
    }
}

impl BoxCollider {
    /// Collider of the given size along the object's local axes
    pub fn new(size: Vec3) -> Self {
        Self {
            shape: ColliderShape { size, group: None },
            mesh: None,
            touching: 0,
        }
    }

    /// Put the collider in a group; colliders of one group ignore each other
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        let group = group.into();
        self.shape.group = (!group.is_empty()).then_some(group);
        self
    }

    /// Box size
    pub fn size(&self) -> Vec3 {
        self.shape.size
    }

    /// Collision group, if any
    pub fn group(&self) -> Option<&str> {
        self.shape.group.as_deref()
    }

    /// Number of colliders currently touching this one
    pub fn touching(&self) -> usize {
        self.touching
    }

    fn wireframe_color(&self) -> Color {
        if self.touching > 0 {
            Color::RED
        } else {
            Color::GREEN
        }
    }
}

impl Component for BoxCollider {
    fn start(&mut self, ctx: &mut Context<'_>) {
        self.mesh = Some(ctx.services.meshes.mesh(Primitives::CUBE));
        let id = ctx.component();
        if !ctx.register_collider(id, self.shape.clone()) {
            log::warn!("Collider {:?} was already registered", id);
        }
    }

    fn post_update(&mut self, ctx: &mut Context<'_>) {
        if !ctx.services.debug.draw_colliders {
            return;
        }
        let (Some(mesh), Some(world)) = (self.mesh, ctx.scene.rendering_matrix(ctx.game_object())) else {
            return;
        };
        let transformation = world * Mat4::new_nonuniform_scaling(&self.shape.size);
        ctx.services
            .renderer
            .render_wireframe(mesh, self.wireframe_color(), &transformation);
    }

    fn finish(&mut self, ctx: &mut Context<'_>) {
        let id = ctx.component();
        ctx.unregister_collider(id);
        self.touching = 0;
    }

    fn on_collision_detected(&mut self, ctx: &mut Context<'_>, collision: &Collision) {
        if collision.collider == ctx.component() {
            self.touching += 1;
        }
    }

    fn on_collision_ended(&mut self, ctx: &mut Context<'_>, collision: &Collision) {
        if collision.collider == ctx.component() {
            self.touching = self.touching.saturating_sub(1);
        }
    }
}
