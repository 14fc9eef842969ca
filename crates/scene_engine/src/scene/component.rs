//! Component trait
//!
//! A component is a unit of behavior attached to exactly one game object.
//! Every hook is optional; the engine calls them at these points:
//!
//! | hook                      | when                                               |
//! |---------------------------|----------------------------------------------------|
//! | `start`                   | once, right after attachment                       |
//! | `update` / `post_update`  | once per frame each, while attached                |
//! | `on_collision_*`          | when a collider on the same object changes contact |
//! | `finish`                  | once, on removal or when the object is destroyed   |
//!
//! Contact changes for a component whose own hook is running are queued and
//! delivered, in arrival order, as soon as that hook returns. After `finish`
//! the component is dropped by the scene, along with anything still queued.

use std::any::Any;
use std::collections::VecDeque;

use crate::foundation::collections::{ComponentId, GameObjectId};
use crate::physics::CollisionEventKind;

use super::context::Context;

/// Upcast helper so components can be looked up by concrete type
pub trait AsAny {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Contact change reported to the components of a collider's object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// Collider on the receiving object
    pub collider: ComponentId,
    /// Collider on the other side of the contact
    pub other: ComponentId,
    /// Object owning `other`, `None` if it was already destroyed
    pub other_object: Option<GameObjectId>,
}

/// Behavior attachable to a game object
///
/// `ctx.game_object()` and `ctx.component()` identify the receiver inside
/// every hook. Hooks may freely create or destroy objects and attach or
/// detach components, including the receiver itself.
#[allow(unused_variables)]
pub trait Component: AsAny + 'static {
    /// Called once when the component is attached
    fn start(&mut self, ctx: &mut Context<'_>) {}

    /// Called once per frame in the update phase
    fn update(&mut self, ctx: &mut Context<'_>) {}

    /// Called once per frame in the post-update phase
    fn post_update(&mut self, ctx: &mut Context<'_>) {}

    /// Called once when the component is detached or its object destroyed
    fn finish(&mut self, ctx: &mut Context<'_>) {}

    /// A collider on this object started touching another collider
    fn on_collision_detected(&mut self, ctx: &mut Context<'_>, collision: &Collision) {}

    /// A collider on this object stopped touching another collider
    fn on_collision_ended(&mut self, ctx: &mut Context<'_>, collision: &Collision) {}
}

/// Arena slot of an attached component
pub(crate) struct ComponentEntry {
    pub(crate) owner: GameObjectId,
    /// `None` while one of the component's own hooks is running
    pub(crate) component: Option<Box<dyn Component>>,
    /// Set once removal starts; `finish` is then pending or running
    pub(crate) detached: bool,
    /// Traversal pass during which the component was attached
    pub(crate) attached_pass: u64,
    /// Contact changes that arrived while one of its hooks was running
    pub(crate) pending: VecDeque<(CollisionEventKind, Collision)>,
}

impl ComponentEntry {
    pub(crate) fn new(owner: GameObjectId) -> Self {
        Self {
            owner,
            component: None,
            detached: false,
            attached_pass: 0,
            pending: VecDeque::new(),
        }
    }

    pub(crate) fn downcast_ref<T: Component>(&self) -> Option<&T> {
        let component: &dyn Component = self.component.as_deref()?;
        component.as_any().downcast_ref::<T>()
    }

    pub(crate) fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        let component: &mut dyn Component = self.component.as_deref_mut()?;
        component.as_any_mut().downcast_mut::<T>()
    }
}
