//! # Rendering contract
//!
//! The scene core never talks to a graphics API. It hands a mesh handle and a
//! world transformation matrix to whatever implements [`Renderer`]; the
//! platform layer owns the GPU side.
//!
//! - [`Renderer`]: the narrow draw interface consumed by components
//! - [`MeshRegistry`]: stable handles for named meshes (primitives or paths)
//! - [`NullRenderer`] / [`RecordingRenderer`]: headless implementations

mod api;
mod mesh_registry;
mod recording;

pub use api::{Color, Renderer};
pub use mesh_registry::{MeshRegistry, Primitives};
pub use recording::{DrawCall, NullRenderer, RecordingRenderer};
