//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Arena handles for scene nodes and components
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
