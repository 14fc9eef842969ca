//! Cubes demo application
//!
//! Builds a rotatable cloud of cubes, an FPS reporter, and a projectile that
//! flies into a target which removes itself on impact.

use scene_engine::prelude::*;

use crate::components::{CubesGenerator, DestroyOnCollision, FpsReport, FpsReporter, TouchRotationController};

const PROJECTILE_SPEED: f32 = 4.0;
const PROJECTILE_START: f32 = -8.0;

/// Demo state kept by the host between frames
pub struct CubesApp {
    layers: u32,
    projectile: Option<GameObjectId>,
    target: Option<GameObjectId>,
    last_fps: Option<f32>,
}

impl CubesApp {
    /// Demo generating `layers` layers of cubes
    pub fn new(layers: u32) -> Self {
        Self {
            layers,
            projectile: None,
            target: None,
            last_fps: None,
        }
    }

    /// Latest frame rate reported by the scene
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }

    /// Whether the target is still in the scene
    pub fn target_alive(&self, engine: &Engine) -> bool {
        self.target.map_or(false, |target| engine.scene().contains(target))
    }
}

impl Application for CubesApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing cubes demo...");
        let mut ctx = engine.context();
        let root = ctx.scene.root();

        let cloud = ctx.create_object(root)?;
        ctx.add_component(cloud, CubesGenerator::new(self.layers))?;
        ctx.add_component(cloud, TouchRotationController::new())?;

        let stats = ctx.create_object(root)?;
        ctx.add_component(stats, FpsReporter::new())?;

        let target = ctx.create_object(root)?;
        ctx.add_component(target, Model::new(Primitives::CUBE))?;
        ctx.add_component(target, BoxCollider::default())?;
        ctx.add_component(target, DestroyOnCollision::new())?;

        let projectile = ctx.create_object(root)?;
        if let Some(transform) = ctx.scene.transform_mut(projectile) {
            transform.set_position(Vec3::new(PROJECTILE_START, 0.0, 0.0));
            transform.set_scale(Vec3::new(0.5, 0.5, 0.5));
        }
        ctx.add_component(projectile, Model::new(Primitives::CUBE))?;
        ctx.add_component(projectile, BoxCollider::default())?;

        self.target = Some(target);
        self.projectile = Some(projectile);
        log::info!("Scene ready with {} objects", ctx.scene.object_count());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        for FpsReport(fps) in engine.services_mut().messenger.take_messages::<FpsReport>() {
            log::debug!("FPS: {:.1}", fps);
            self.last_fps = Some(fps);
        }

        let Some(projectile) = self.projectile else {
            return Ok(());
        };
        match engine.scene().transform(projectile).map(|transform| transform.position().x) {
            Some(x) if x < -PROJECTILE_START => {
                if let Some(transform) = engine.scene_mut().transform_mut(projectile) {
                    transform.translate(Vec3::new(PROJECTILE_SPEED * delta_time, 0.0, 0.0));
                }
            }
            Some(_) => {
                engine.context().destroy(projectile)?;
                self.projectile = None;
                log::info!("Projectile left the scene");
            }
            None => self.projectile = None,
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Cubes demo finished: {} objects, target {}",
            engine.scene().object_count(),
            if self.target_alive(engine) { "intact" } else { "destroyed" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_destroys_target() {
        let config = EngineConfig::default().with_fixed_time_step(0.1);
        let mut engine = Engine::headless(config).unwrap();
        let mut app = CubesApp::new(1);

        engine.run(&mut app, Some(40)).unwrap();

        assert!(!app.target_alive(&engine));
        assert!(app.last_fps().is_some());
        // Teardown leaves only the root
        assert_eq!(engine.scene().object_count(), 1);
    }
}
