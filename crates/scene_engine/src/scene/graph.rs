//! Scene graph arena
//!
//! Nodes and components live in two generational arenas. A node refers to
//! its parent by handle only and owns the ordered handle lists of its
//! children and components. Operations here never run component hooks; the
//! ones that do live on [`Context`](super::Context).

use std::collections::HashSet;

use crate::components::Transform;
use crate::foundation::collections::{ComponentId, GameObjectId, SlotMap};
use crate::foundation::math::Mat4;

use super::component::{Component, ComponentEntry};
use super::error::SceneError;

/// Scene graph node
pub(crate) struct Node {
    pub(crate) parent: Option<GameObjectId>,
    pub(crate) children: Vec<GameObjectId>,
    /// Attachment order; the mandatory transform is always first
    pub(crate) components: Vec<ComponentId>,
    pub(crate) transform: ComponentId,
    /// Set once teardown of the node has started
    pub(crate) destroying: bool,
}

/// Hierarchy of game objects and their components
pub struct Scene {
    pub(crate) objects: SlotMap<GameObjectId, Node>,
    pub(crate) components: SlotMap<ComponentId, ComponentEntry>,
    root: GameObjectId,
    /// Number of the running (or last) traversal pass
    pub(crate) pass: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only the top-level root object
    pub fn new() -> Self {
        let mut scene = Self {
            objects: SlotMap::with_key(),
            components: SlotMap::with_key(),
            root: GameObjectId::default(),
            pass: 0,
        };
        scene.root = scene.insert_node(None);
        if let Some(transform) = scene.objects.get(scene.root).map(|node| node.transform) {
            scene.fill_slot(transform, Box::new(Transform::default()));
        }
        scene
    }

    /// Insert a node and reserve its transform slot
    ///
    /// The transform slot is left empty; the caller fills it, running
    /// `start` or not as appropriate.
    pub(crate) fn insert_node(&mut self, parent: Option<GameObjectId>) -> GameObjectId {
        let id = self.objects.insert(Node {
            parent,
            children: Vec::new(),
            components: Vec::new(),
            transform: ComponentId::default(),
            destroying: false,
        });
        let transform = self.reserve_slot(id);
        if let Some(node) = self.objects.get_mut(id) {
            node.transform = transform;
        }
        if let Some(parent) = parent.and_then(|parent| self.objects.get_mut(parent)) {
            parent.children.push(id);
        }
        id
    }

    /// Append an empty component slot to `owner`
    pub(crate) fn reserve_slot(&mut self, owner: GameObjectId) -> ComponentId {
        let mut entry = ComponentEntry::new(owner);
        entry.attached_pass = self.pass;
        let id = self.components.insert(entry);
        if let Some(node) = self.objects.get_mut(owner) {
            node.components.push(id);
        }
        id
    }

    pub(crate) fn fill_slot(&mut self, id: ComponentId, component: Box<dyn Component>) {
        if let Some(entry) = self.components.get_mut(id) {
            entry.component = Some(component);
        }
    }

    /// The engine-created top-level object
    pub fn root(&self) -> GameObjectId {
        self.root
    }

    /// Number of live objects, root included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether `id` refers to a live object
    pub fn contains(&self, id: GameObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Whether the object exists and is not being torn down
    pub(crate) fn is_alive(&self, id: GameObjectId) -> bool {
        self.objects.get(id).map_or(false, |node| !node.destroying)
    }

    /// Parent of the object, `None` for top-level or unknown objects
    pub fn parent(&self, id: GameObjectId) -> Option<GameObjectId> {
        self.objects.get(id).and_then(|node| node.parent)
    }

    /// Children of the object in insertion order
    pub fn children(&self, id: GameObjectId) -> &[GameObjectId] {
        self.objects.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Components of the object in attachment order
    pub fn components(&self, id: GameObjectId) -> &[ComponentId] {
        self.objects.get(id).map_or(&[], |node| node.components.as_slice())
    }

    /// Whether the component is attached and not being finished
    pub fn is_attached(&self, id: ComponentId) -> bool {
        self.components.get(id).map_or(false, |entry| !entry.detached)
    }

    /// Object the component is attached to
    pub fn owner(&self, id: ComponentId) -> Option<GameObjectId> {
        self.components.get(id).map(|entry| entry.owner)
    }

    /// Typed access to one component by handle
    ///
    /// `None` while the component's own hook is running.
    pub fn component<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.components.get(id)?.downcast_ref()
    }

    /// Typed mutable access to one component by handle
    pub fn component_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components.get_mut(id)?.downcast_mut()
    }

    /// First component of type `T` on the object
    pub fn get_component<T: Component>(&self, object: GameObjectId) -> Option<&T> {
        self.components(object)
            .iter()
            .find_map(|&id| self.component::<T>(id))
    }

    /// Every component of type `T` on the object, in attachment order
    pub fn get_components<T: Component>(&self, object: GameObjectId) -> Vec<&T> {
        self.components(object)
            .iter()
            .filter_map(|&id| self.component::<T>(id))
            .collect()
    }

    /// Handle of the first component of type `T` on the object
    pub fn find_component<T: Component>(&self, object: GameObjectId) -> Option<ComponentId> {
        self.components(object)
            .iter()
            .copied()
            .find(|&id| self.component::<T>(id).is_some())
    }

    /// Mutable access to the first component of type `T` on the object
    pub fn get_component_mut<T: Component>(&mut self, object: GameObjectId) -> Option<&mut T> {
        let id = self.find_component::<T>(object)?;
        self.component_mut(id)
    }

    /// Handle of the object's mandatory transform
    pub fn transform_id(&self, object: GameObjectId) -> Option<ComponentId> {
        self.objects.get(object).map(|node| node.transform)
    }

    /// The object's transform
    pub fn transform(&self, object: GameObjectId) -> Option<&Transform> {
        self.component(self.transform_id(object)?)
    }

    /// Mutable access to the object's transform
    pub fn transform_mut(&mut self, object: GameObjectId) -> Option<&mut Transform> {
        let id = self.transform_id(object)?;
        self.component_mut(id)
    }

    /// Move `child` under `parent`, appending it to the new parent's children
    ///
    /// Component state is untouched.
    ///
    /// # Errors
    ///
    /// Fails if either object is unknown, if `child` is top-level, or if
    /// `parent` is `child` itself or one of its descendants.
    pub fn set_parent(&mut self, child: GameObjectId, parent: GameObjectId) -> Result<(), SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::ObjectNotFound(parent));
        }
        let old_parent = self
            .objects
            .get(child)
            .ok_or(SceneError::ObjectNotFound(child))?
            .parent
            .ok_or(SceneError::TopLevelReparent(child))?;
        if self.is_in_subtree(parent, child) {
            return Err(SceneError::CyclicParent { child, parent });
        }

        if let Some(node) = self.objects.get_mut(old_parent) {
            node.children.retain(|&id| id != child);
        }
        if let Some(node) = self.objects.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.objects.get_mut(child) {
            node.parent = Some(parent);
        }
        log::trace!("Reparented {:?} from {:?} to {:?}", child, old_parent, parent);
        Ok(())
    }

    /// Whether `id` is `ancestor` or lies below it
    pub fn is_in_subtree(&self, id: GameObjectId, ancestor: GameObjectId) -> bool {
        let mut current = Some(id);
        let mut seen = HashSet::new();
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            if !seen.insert(node) {
                break;
            }
            current = self.parent(node);
        }
        false
    }

    /// Object-to-world matrix: parent world matrix times local matrix
    pub fn world_matrix(&self, object: GameObjectId) -> Option<Mat4> {
        let mut matrix = self.local_matrix(object)?;
        let mut current = self.parent(object);
        while let Some(parent) = current {
            matrix = self.local_matrix(parent)? * matrix;
            current = self.parent(parent);
        }
        Some(matrix)
    }

    /// Matrix the renderer should draw the object with
    pub fn rendering_matrix(&self, object: GameObjectId) -> Option<Mat4> {
        self.world_matrix(object)
    }

    fn local_matrix(&self, object: GameObjectId) -> Option<Mat4> {
        let node = self.objects.get(object)?;
        Some(
            self.component::<Transform>(node.transform)
                .map_or_else(Mat4::identity, Transform::local_matrix),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn child_of(scene: &mut Scene, parent: GameObjectId) -> GameObjectId {
        let id = scene.insert_node(Some(parent));
        let transform = scene.transform_id(id).unwrap();
        scene.fill_slot(transform, Box::new(Transform::default()));
        id
    }

    #[test]
    fn test_new_scene_has_root_with_transform() {
        let scene = Scene::new();
        let root = scene.root();

        assert_eq!(scene.object_count(), 1);
        assert!(scene.parent(root).is_none());
        assert_eq!(scene.components(root).len(), 1);
        assert!(scene.transform(root).is_some());
    }

    #[test]
    fn test_transform_is_first_component() {
        let mut scene = Scene::new();
        let root = scene.root();
        let object = child_of(&mut scene, root);

        assert_eq!(scene.components(object)[0], scene.transform_id(object).unwrap());
        assert_eq!(scene.children(root), &[object]);
    }

    #[test]
    fn test_set_parent_moves_child() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = child_of(&mut scene, root);
        let b = child_of(&mut scene, root);

        scene.set_parent(b, a).unwrap();

        assert_eq!(scene.children(root), &[a]);
        assert_eq!(scene.children(a), &[b]);
        assert_eq!(scene.parent(b), Some(a));
    }

    #[test]
    fn test_set_parent_rejects_top_level() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = child_of(&mut scene, root);

        assert_eq!(scene.set_parent(root, a), Err(SceneError::TopLevelReparent(root)));
    }

    #[test]
    fn test_set_parent_rejects_cycle() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = child_of(&mut scene, root);
        let b = child_of(&mut scene, a);

        assert_eq!(
            scene.set_parent(a, b),
            Err(SceneError::CyclicParent { child: a, parent: b })
        );
        assert_eq!(
            scene.set_parent(a, a),
            Err(SceneError::CyclicParent { child: a, parent: a })
        );
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let root = scene.root();
        let parent = child_of(&mut scene, root);
        let child = child_of(&mut scene, parent);

        scene.transform_mut(parent).unwrap().set_position(Vec3::new(1.0, 0.0, 0.0));
        scene.transform_mut(parent).unwrap().set_scale(Vec3::new(2.0, 2.0, 2.0));
        scene.transform_mut(child).unwrap().set_position(Vec3::new(0.0, 3.0, 0.0));

        let world = scene.world_matrix(child).unwrap();
        assert_relative_eq!(world[(0, 3)], 1.0);
        assert_relative_eq!(world[(1, 3)], 6.0);
        assert_relative_eq!(world[(0, 0)], 2.0);
    }
}
