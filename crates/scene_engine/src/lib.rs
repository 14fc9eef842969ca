//! # Scene Engine
//!
//! Runtime core of a small real-time 3D engine: a scene graph of game
//! objects carrying components, a two-phase frame loop and box collision
//! detection with enter/exit notifications.
//!
//! ## Features
//!
//! - **Scene graph**: generational arena of objects and components, safe to
//!   mutate from inside any component hook
//! - **Components**: optional `start`/`update`/`post_update`/`finish` hooks
//!   plus collision callbacks
//! - **Collisions**: oriented bounding boxes and separating axis tests
//! - **Headless services**: recording renderer and scripted touch input
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct Spinner;
//!
//! impl Component for Spinner {
//!     fn update(&mut self, ctx: &mut Context<'_>) {
//!         let me = ctx.game_object();
//!         let angle = 90.0 * ctx.time_delta();
//!         if let Some(transform) = ctx.scene.transform_mut(me) {
//!             transform.rotate_by(0.0, angle, 0.0);
//!         }
//!     }
//! }
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let mut ctx = engine.context();
//!         let root = ctx.scene.root();
//!         let cube = ctx.create_object(root)?;
//!         ctx.add_component(cube, Model::new(Primitives::CUBE))?;
//!         ctx.add_component(cube, Spinner)?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::headless(EngineConfig::default())?;
//!     engine.run(&mut MyApp, Some(60))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod components;
pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod services;
pub mod systems;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        components::{BoxCollider, Model, Transform},
        core::{Config, ConfigError, DebugSettings, Display, EngineConfig},
        foundation::{
            collections::{ComponentId, GameObjectId, MeshHandle},
            math::{Mat4, Quat, Vec3},
            time::{FrameTime, Timer},
        },
        input::{NoInput, ScriptedTouchInput, Touch, TouchInput, TouchState},
        physics::{ColliderShape, CollisionsSystem, Obb},
        render::{Color, NullRenderer, Primitives, RecordingRenderer, Renderer},
        scene::{Collision, Component, Context, Phase, Scene, SceneError},
        services::{Messenger, Services},
        systems::System,
        AppError, Application, Engine, EngineError,
    };
}
