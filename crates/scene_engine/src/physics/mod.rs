//! Collision detection between box colliders

pub mod collisions_system;
pub mod obb;

pub use collisions_system::{ColliderShape, CollisionEvent, CollisionEventKind, CollisionsSystem};
pub use obb::{test_overlap, Obb};
