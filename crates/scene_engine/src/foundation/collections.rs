//! Arena handles
//!
//! Scene nodes and components live in `slotmap` arenas. Their keys are
//! generational, so a handle to a destroyed node never resolves to a node
//! created later in the same slot.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle of a node in the scene graph
    pub struct GameObjectId;

    /// Handle of a component attached to a scene node
    ///
    /// A `BoxCollider`'s component handle doubles as its collider id.
    pub struct ComponentId;

    /// Handle of a mesh known to the renderer
    pub struct MeshHandle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_does_not_alias() {
        let mut arena: SlotMap<GameObjectId, u32> = SlotMap::with_key();
        let first = arena.insert(1);
        arena.remove(first);
        let second = arena.insert(2);

        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second), Some(&2));
    }
}
