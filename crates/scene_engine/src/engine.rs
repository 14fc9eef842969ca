//! Frame driver
//!
//! The engine owns the scene, the collisions system, any extra systems and
//! the shared services, and advances them one frame at a time:
//!
//! 1. frame time advances, input and renderer start a new frame
//! 2. update phase: extra systems, then every component in the scene
//! 3. post-update phase: every component, the collision pass, then extra
//!    systems

use crate::{
    application::Application,
    config::ConfigError,
    core::EngineConfig,
    foundation::time::Timer,
    input::TouchInput,
    physics::CollisionsSystem,
    render::Renderer,
    scene::{Context, Phase, Scene, SceneError},
    services::Services,
    systems::System,
};
use thiserror::Error;

/// Main engine struct
pub struct Engine {
    scene: Scene,
    collisions: CollisionsSystem,
    systems: Vec<Box<dyn System>>,
    services: Services,

    /// Engine configuration
    config: EngineConfig,

    /// Real-time frame timing, used without a fixed time step
    timer: Timer,

    /// Whether the engine should continue running
    running: bool,

    /// Set once the scene has been torn down
    shut_down: bool,
}

impl Engine {
    /// Create an engine drawing through `renderer` and reading `input`
    pub fn new(
        config: EngineConfig,
        renderer: Box<dyn Renderer>,
        input: Box<dyn TouchInput>,
    ) -> Result<Self, EngineError> {
        let services = Services::new(&config, renderer, input);
        Self::with_services(config, services)
    }

    /// Create an engine with no renderer output and no input
    pub fn headless(config: EngineConfig) -> Result<Self, EngineError> {
        let services = Services::headless(&config);
        Self::with_services(config, services)
    }

    fn with_services(config: EngineConfig, services: Services) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        Ok(Self {
            scene: Scene::new(),
            collisions: CollisionsSystem::new(),
            systems: Vec::new(),
            services,
            config,
            timer: Timer::new(),
            running: true,
            shut_down: false,
        })
    }

    /// Append a system; systems run in insertion order
    pub fn add_system(&mut self, system: impl System + 'static) {
        log::debug!("Added system {}", system.name());
        self.systems.push(Box::new(system));
    }

    /// Context for lifecycle operations from outside any hook
    pub fn context(&mut self) -> Context<'_> {
        Context::new(&mut self.scene, &mut self.collisions, &mut self.services)
    }

    /// The scene graph
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene graph
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The collisions system
    pub fn collisions(&self) -> &CollisionsSystem {
        &self.collisions
    }

    /// Shared services
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Mutable access to shared services
    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one frame that lasted `delta_time` seconds
    pub fn frame(&mut self, delta_time: f32) {
        self.services.time.advance(delta_time);
        self.services.input.begin_frame();
        self.services.renderer.on_start_rendering_frame();
        log::trace!("Frame {} ({:.4}s)", self.services.time.frame_count(), delta_time);

        for system in &mut self.systems {
            system.update(&mut self.scene, &mut self.services);
        }
        self.collisions.update();
        self.context().update_scene(Phase::Update);

        let mut context = self.context();
        context.update_scene(Phase::PostUpdate);
        context.run_collision_pass();
        for system in &mut self.systems {
            system.post_update(&mut self.scene, &mut self.services);
        }
    }

    /// Drive `app` until it quits or `frames` frames have run
    ///
    /// Without an explicit count the configured frame limit applies; with
    /// neither the loop runs until [`quit`](Self::quit) is called. The scene
    /// is torn down after `cleanup`.
    pub fn run<A: Application>(&mut self, app: &mut A, frames: Option<u64>) -> Result<(), EngineError> {
        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        let limit = frames.or(self.config.frame_limit);
        let mut frame = 0_u64;
        self.timer = Timer::new();
        log::info!("Starting main loop...");

        while self.running && limit.map_or(true, |limit| frame < limit) {
            let delta_time = match self.config.fixed_time_step {
                Some(step) => step,
                None => self.timer.update(),
            };

            app.update(self, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
            self.frame(delta_time);
            frame += 1;
        }

        app.cleanup(self);
        self.shutdown();
        log::info!("Engine shutdown complete after {} frames", frame);
        Ok(())
    }

    /// Request the main loop to stop after the current frame
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop keeps running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tear down the scene, finishing every component exactly once
    ///
    /// Runs at most once; dropping the engine calls it too.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.running = false;
        self.context().clear();
        log::debug!("Scene torn down");
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Illegal scene operation
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
