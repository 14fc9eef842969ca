//! # Engine Configuration
//!
//! Core engine behavior configuration: logging, debug drawing, display
//! metrics and frame stepping. Loadable from TOML or RON through [`Config`].

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// Debug features toggled at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Draw every box collider as a wireframe
    pub draw_colliders: bool,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            draw_colliders: cfg!(debug_assertions),
        }
    }
}

/// Display metrics of the surface the engine renders into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixels per density-independent unit; touch deltas are divided by it
    pub density_scale_factor: f32,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            density_scale_factor: 1.0,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Debug features
    pub debug: DebugSettings,
    /// Display metrics
    pub display: Display,
    /// Fixed frame delta in seconds; `None` measures wall-clock time
    pub fixed_time_step: Option<f32>,
    /// Stop after this many frames; `None` runs until the application quits
    pub frame_limit: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug: DebugSettings::default(),
            display: Display::default(),
            fixed_time_step: None,
            frame_limit: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable or disable collider wireframes
    pub fn with_collider_drawing(mut self, enabled: bool) -> Self {
        self.debug.draw_colliders = enabled;
        self
    }

    /// Step every frame by a fixed delta
    pub fn with_fixed_time_step(mut self, seconds: f32) -> Self {
        self.fixed_time_step = Some(seconds);
        self
    }

    /// Stop after a number of frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(step) = self.fixed_time_step {
            if !(step.is_finite() && step > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "fixed_time_step must be positive, got {step}"
                )));
            }
        }
        if !(self.display.density_scale_factor.is_finite() && self.display.density_scale_factor > 0.0) {
            return Err(ConfigError::Invalid(
                "density_scale_factor must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            log_level = "debug"
            frame_limit = 10

            [debug]
            draw_colliders = true
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.frame_limit, Some(10));
        assert!(config.debug.draw_colliders);
        assert_eq!(config.display, Display::default());
    }

    #[test]
    fn test_ron_config_parses() {
        let config: EngineConfig =
            ron::from_str("(fixed_time_step: Some(0.016), display: (density_scale_factor: 2.0))")
                .unwrap();

        assert_eq!(config.fixed_time_step, Some(0.016));
        assert_eq!(config.display.density_scale_factor, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_step() {
        let config = EngineConfig::new().with_fixed_time_step(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("scene_engine_config_{}.toml", std::process::id()));
        let config = EngineConfig::new().with_frame_limit(3).with_collider_drawing(false);

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = EngineConfig::load_from_file("engine.yaml");
        assert!(result.is_err());
    }
}
