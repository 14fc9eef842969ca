//! Scene graph: game objects, components and the hook context

pub mod component;
pub mod context;
pub mod error;
pub mod graph;

pub use component::{AsAny, Collision, Component};
pub use context::{Context, Phase};
pub use error::SceneError;
pub use graph::Scene;

#[cfg(test)]
mod tests;
