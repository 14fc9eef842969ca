//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::scene::SceneError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive the engine from a host program.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Build the initial scene here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the engine's own phases.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Cleanup the application
    ///
    /// Called once after the last frame, before the scene is torn down.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Illegal scene operation
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
