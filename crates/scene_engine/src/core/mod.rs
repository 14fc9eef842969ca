//! # Core Engine Module
//!
//! Engine-wide configuration shared by the scene, the collision system and the
//! frame driver.

pub mod config;

pub use crate::config::{Config, ConfigError};
pub use config::{DebugSettings, Display, EngineConfig};
