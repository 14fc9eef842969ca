//! Named mesh handles

use std::collections::HashMap;

use crate::foundation::collections::{MeshHandle, SlotMap};

/// Names of meshes every platform layer provides
pub struct Primitives;

impl Primitives {
    /// Unit cube centered at the origin (edge length 1)
    pub const CUBE: &'static str = "primitives/cube";
}

/// Maps mesh names to stable handles
///
/// The registry only hands out identities; turning a name into vertex data is
/// the platform layer's job, keyed by [`MeshRegistry::name`].
#[derive(Debug, Default)]
pub struct MeshRegistry {
    names: SlotMap<MeshHandle, String>,
    by_name: HashMap<String, MeshHandle>,
}

impl MeshRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle for `name`, creating one on first use
    pub fn mesh(&mut self, name: &str) -> MeshHandle {
        if let Some(handle) = self.by_name.get(name) {
            return *handle;
        }
        let handle = self.names.insert(name.to_string());
        self.by_name.insert(name.to_string(), handle);
        log::debug!("Registered mesh '{}'", name);
        handle
    }

    /// Name a handle was created for
    pub fn name(&self, handle: MeshHandle) -> Option<&str> {
        self.names.get(handle).map(String::as_str)
    }

    /// Number of distinct meshes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no mesh has been requested yet
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_handle() {
        let mut registry = MeshRegistry::new();
        let cube = registry.mesh(Primitives::CUBE);
        let diamond = registry.mesh("models/diamond.obj");

        assert_eq!(registry.mesh(Primitives::CUBE), cube);
        assert_ne!(cube, diamond);
        assert_eq!(registry.name(diamond), Some("models/diamond.obj"));
        assert_eq!(registry.len(), 2);
    }
}
