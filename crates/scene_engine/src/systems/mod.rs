//! Frame systems
//!
//! A system is engine-level logic that runs once per phase, beside the
//! per-component hooks. The collisions system is driven by the engine
//! directly because its callbacks need the full hook context.

use crate::scene::Scene;
use crate::services::Services;

/// Engine subsystem updated every frame
///
/// Within a frame every system gets `update` before any gets `post_update`.
#[allow(unused_variables)]
pub trait System {
    /// Name used in log output
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Update phase
    fn update(&mut self, scene: &mut Scene, services: &mut Services) {}

    /// Post-update phase
    fn post_update(&mut self, scene: &mut Scene, services: &mut Services) {}
}
