//! Built-in components

pub mod box_collider;
pub mod model;
pub mod transform;

pub use box_collider::BoxCollider;
pub use model::Model;
pub use transform::Transform;
