//! Demo components

pub mod cubes_generator;
pub mod destroy_on_collision;
pub mod fps_reporter;
pub mod touch_rotation;

pub use cubes_generator::CubesGenerator;
pub use destroy_on_collision::DestroyOnCollision;
pub use fps_reporter::{FpsReport, FpsReporter};
pub use touch_rotation::TouchRotationController;
