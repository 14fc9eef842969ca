//! Scene graph errors

use thiserror::Error;

use crate::foundation::collections::{ComponentId, GameObjectId};

/// Illegal scene graph operations
///
/// These report programmer errors. Operations that merely have nothing to do
/// (removing something already gone) return `false` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The object handle does not refer to a live object
    #[error("game object {0:?} does not exist")]
    ObjectNotFound(GameObjectId),

    /// Top-level objects can never be reparented
    #[error("cannot change parent of top level object {0:?}")]
    TopLevelReparent(GameObjectId),

    /// Top-level objects are only torn down by the engine
    #[error("cannot destroy top level object {0:?}")]
    TopLevelDestroy(GameObjectId),

    /// The new parent is the object itself or one of its descendants
    #[error("cannot parent {child:?} under its own subtree at {parent:?}")]
    CyclicParent {
        /// Object being moved
        child: GameObjectId,
        /// Requested parent
        parent: GameObjectId,
    },

    /// Mandatory components cannot be removed
    #[error("cannot remove mandatory component {0:?}")]
    MandatoryComponent(ComponentId),
}
