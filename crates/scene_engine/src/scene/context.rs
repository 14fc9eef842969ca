//! Hook context and the lifecycle operations that run hooks
//!
//! Components live in the scene's arena but are moved out of it while one of
//! their own hooks runs, so the hook can take `&mut Context` and mutate the
//! whole scene, itself included. When the hook returns the component is put
//! back, unless it was detached meanwhile; its `finish` then runs right
//! away and the component is dropped. Contact changes addressed to a
//! component that is out of the arena wait on its entry until it is back.

use std::collections::HashSet;

use slotmap::Key;

use crate::components::Transform;
use crate::foundation::collections::{ComponentId, GameObjectId};
use crate::physics::{ColliderShape, CollisionEventKind, CollisionsSystem};
use crate::services::Services;

use super::component::{Collision, Component};
use super::error::SceneError;
use super::graph::Scene;

/// Per-frame traversal phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `Component::update`
    Update,
    /// `Component::post_update`
    PostUpdate,
}

#[derive(Clone, Copy)]
enum Hook<'c> {
    Start,
    Update,
    PostUpdate,
    Finish,
    CollisionDetected(&'c Collision),
    CollisionEnded(&'c Collision),
}

impl<'c> Hook<'c> {
    fn contact(kind: CollisionEventKind, collision: &'c Collision) -> Self {
        match kind {
            CollisionEventKind::Detected => Hook::CollisionDetected(collision),
            CollisionEventKind::Ended => Hook::CollisionEnded(collision),
        }
    }
}

impl From<Phase> for Hook<'_> {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Update => Hook::Update,
            Phase::PostUpdate => Hook::PostUpdate,
        }
    }
}

/// Everything a component hook may touch
pub struct Context<'a> {
    /// The scene graph
    pub scene: &'a mut Scene,
    /// Collider registry
    pub collisions: &'a mut CollisionsSystem,
    /// Shared application services
    pub services: &'a mut Services,
    game_object: GameObjectId,
    component: ComponentId,
}

impl<'a> Context<'a> {
    /// Context bound to the scene root, outside of any hook
    pub fn new(scene: &'a mut Scene, collisions: &'a mut CollisionsSystem, services: &'a mut Services) -> Self {
        let game_object = scene.root();
        Self {
            scene,
            collisions,
            services,
            game_object,
            component: ComponentId::null(),
        }
    }

    /// Object owning the running component, the root outside hooks
    pub fn game_object(&self) -> GameObjectId {
        self.game_object
    }

    /// The running component, null outside hooks
    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// Seconds elapsed since the previous frame
    pub fn time_delta(&self) -> f32 {
        self.services.time.time_delta()
    }

    /// Create a game object under `parent`
    ///
    /// # Errors
    ///
    /// [`SceneError::ObjectNotFound`] if `parent` is unknown or being destroyed.
    pub fn create_object(&mut self, parent: GameObjectId) -> Result<GameObjectId, SceneError> {
        if !self.scene.is_alive(parent) {
            return Err(SceneError::ObjectNotFound(parent));
        }
        let id = self.scene.insert_node(Some(parent));
        let transform = self.scene.transform_id(id).ok_or(SceneError::ObjectNotFound(id))?;
        self.scene.fill_slot(transform, Box::new(Transform::default()));
        self.run_hook(transform, Hook::Start);
        log::debug!("Created game object {:?} under {:?}", id, parent);
        Ok(id)
    }

    /// Attach `component` to `object` and run its `start`
    ///
    /// # Errors
    ///
    /// [`SceneError::ObjectNotFound`] if `object` is unknown or being destroyed.
    pub fn add_component<C: Component>(&mut self, object: GameObjectId, component: C) -> Result<ComponentId, SceneError> {
        self.add_boxed(object, Box::new(component))
    }

    /// Attach an already boxed component
    ///
    /// # Errors
    ///
    /// [`SceneError::ObjectNotFound`] if `object` is unknown or being destroyed.
    pub fn add_boxed(&mut self, object: GameObjectId, component: Box<dyn Component>) -> Result<ComponentId, SceneError> {
        if !self.scene.is_alive(object) {
            return Err(SceneError::ObjectNotFound(object));
        }
        let id = self.scene.reserve_slot(object);
        self.scene.fill_slot(id, component);
        self.run_hook(id, Hook::Start);
        Ok(id)
    }

    /// Run `finish` on a component and detach it
    ///
    /// Returns `Ok(false)` if the component is not attached. Removing a
    /// component whose hook is running defers its `finish` until that hook
    /// returns.
    ///
    /// # Errors
    ///
    /// [`SceneError::MandatoryComponent`] for an object's transform.
    pub fn remove_component(&mut self, id: ComponentId) -> Result<bool, SceneError> {
        let Some(owner) = self.scene.owner(id) else {
            return Ok(false);
        };
        if self.scene.transform_id(owner) == Some(id) {
            return Err(SceneError::MandatoryComponent(id));
        }
        Ok(self.detach_component(id))
    }

    /// Destroy `child` and its subtree if it is a child of `parent`
    ///
    /// Every component of the subtree is finished exactly once, depth-first,
    /// before `child` leaves `parent`'s children. Returns `Ok(false)` if
    /// `child` is not a child of `parent`.
    ///
    /// # Errors
    ///
    /// [`SceneError::ObjectNotFound`] if `parent` is unknown.
    pub fn remove_child(&mut self, parent: GameObjectId, child: GameObjectId) -> Result<bool, SceneError> {
        let node = self.scene.objects.get(parent).ok_or(SceneError::ObjectNotFound(parent))?;
        if !node.children.contains(&child) {
            return Ok(false);
        }
        Ok(self.destroy_subtree(child))
    }

    /// Destroy `object` and its subtree
    ///
    /// Returns `Ok(false)` if the object no longer exists or is already
    /// being destroyed.
    ///
    /// # Errors
    ///
    /// [`SceneError::TopLevelDestroy`] for the root.
    pub fn destroy(&mut self, object: GameObjectId) -> Result<bool, SceneError> {
        let Some(node) = self.scene.objects.get(object) else {
            return Ok(false);
        };
        let parent = node.parent;
        match parent {
            Some(parent) => self.remove_child(parent, object),
            None => Err(SceneError::TopLevelDestroy(object)),
        }
    }

    /// Register a collider component under its owner
    ///
    /// Returns `false` if already registered or if the component is unknown.
    pub fn register_collider(&mut self, collider: ComponentId, shape: ColliderShape) -> bool {
        let Some(owner) = self.scene.owner(collider) else {
            return false;
        };
        self.collisions.register_collider(collider, owner, shape)
    }

    /// Unregister a collider and deliver the resulting contact ends
    pub fn unregister_collider(&mut self, collider: ComponentId) -> bool {
        let unregistered = self.collisions.unregister_collider(collider);
        self.dispatch_collision_events();
        unregistered
    }

    /// Recompute every collider box and run the pairwise pass
    ///
    /// Contact changes are delivered as each pair is evaluated. Unregister
    /// requests made meanwhile are applied once the pass is over.
    pub fn run_collision_pass(&mut self) {
        if self.collisions.is_pass_active() {
            log::warn!("Collision pass requested while one is running, ignored");
            return;
        }
        let count = self.collisions.begin_pass(&*self.scene);
        for first in 0..count {
            for second in first + 1..count {
                if self.collisions.evaluate_pair(first, second) {
                    self.dispatch_collision_events();
                }
            }
        }
        self.collisions.end_pass();
        self.dispatch_collision_events();
    }

    /// Deliver queued contact changes to the components of each collider's owner
    pub fn dispatch_collision_events(&mut self) {
        while let Some(event) = self.collisions.pop_event() {
            let collision = Collision {
                collider: event.collider,
                other: event.other,
                other_object: self.scene.contains(event.other_owner).then_some(event.other_owner),
            };
            let hook = Hook::contact(event.kind, &collision);
            let receivers = self.scene.components(event.owner).to_vec();
            for receiver in receivers {
                self.run_hook(receiver, hook);
            }
        }
    }

    /// Run one phase over every object reachable from the root
    ///
    /// Lists are snapshotted when a node is visited. Components attached
    /// during the pass wait for the next one, objects are visited at most
    /// once even if reparented mid-pass.
    pub fn update_scene(&mut self, phase: Phase) {
        self.scene.pass += 1;
        let pass = self.scene.pass;
        let mut visited = HashSet::new();
        let root = self.scene.root();
        self.visit(root, phase, pass, &mut visited);
    }

    /// Destroy every object below the root and detach the root's components
    pub fn clear(&mut self) {
        let root = self.scene.root();
        for child in self.scene.children(root).to_vec() {
            self.destroy_subtree(child);
        }
        let transform = self.scene.transform_id(root);
        for component in self.scene.components(root).to_vec() {
            if Some(component) != transform {
                self.detach_component(component);
            }
        }
    }

    fn visit(&mut self, object: GameObjectId, phase: Phase, pass: u64, visited: &mut HashSet<GameObjectId>) {
        if !self.scene.is_alive(object) || !visited.insert(object) {
            return;
        }
        for component in self.scene.components(object).to_vec() {
            let fresh = self
                .scene
                .components
                .get(component)
                .map_or(true, |entry| entry.attached_pass == pass);
            if !fresh {
                self.run_hook(component, phase.into());
            }
        }
        for child in self.scene.children(object).to_vec() {
            self.visit(child, phase, pass, visited);
        }
    }

    fn destroy_subtree(&mut self, object: GameObjectId) -> bool {
        let Some(node) = self.scene.objects.get_mut(object) else {
            return false;
        };
        if node.destroying {
            return false;
        }
        node.destroying = true;
        let transform = node.transform;
        let components = node.components.clone();

        for component in components {
            if component == transform {
                self.run_hook(component, Hook::Finish);
            } else {
                self.detach_component(component);
            }
        }
        for child in self.scene.children(object).to_vec() {
            if self.scene.parent(child) == Some(object) {
                self.destroy_subtree(child);
            }
        }

        if let Some(node) = self.scene.objects.remove(object) {
            if let Some(parent) = node.parent.and_then(|parent| self.scene.objects.get_mut(parent)) {
                parent.children.retain(|&id| id != object);
            }
            self.scene.components.remove(node.transform);
        }
        log::debug!("Destroyed game object {:?}", object);
        true
    }

    fn detach_component(&mut self, id: ComponentId) -> bool {
        let Some(entry) = self.scene.components.get_mut(id) else {
            return false;
        };
        if entry.detached {
            return false;
        }
        entry.detached = true;
        let owner = entry.owner;
        let component = entry.component.take();
        if let Some(node) = self.scene.objects.get_mut(owner) {
            node.components.retain(|&attached| attached != id);
        }

        match component {
            Some(component) => self.finish(id, owner, component),
            None => log::trace!("Component {:?} detached while running, finish deferred", id),
        }
        true
    }

    fn finish(&mut self, id: ComponentId, owner: GameObjectId, mut component: Box<dyn Component>) {
        let previous = self.bind(owner, id);
        component.finish(self);
        self.bind(previous.0, previous.1);
        self.scene.components.remove(id);
        log::trace!("Finished component {:?} of {:?}", id, owner);
    }

    /// Run one hook of an attached component
    ///
    /// Skipped for detached components. A contact change for a component
    /// whose own hook is already running further up the stack is queued and
    /// delivered once that hook returns; other hooks are skipped.
    fn run_hook(&mut self, id: ComponentId, hook: Hook<'_>) -> bool {
        let Some(entry) = self.scene.components.get_mut(id) else {
            return false;
        };
        if entry.detached {
            return false;
        }
        let Some(mut component) = entry.component.take() else {
            match hook {
                Hook::CollisionDetected(collision) => {
                    entry.pending.push_back((CollisionEventKind::Detected, *collision));
                }
                Hook::CollisionEnded(collision) => {
                    entry.pending.push_back((CollisionEventKind::Ended, *collision));
                }
                _ => return false,
            }
            log::trace!("Component {:?} is running, contact change queued", id);
            return false;
        };
        let owner = entry.owner;

        let previous = self.bind(owner, id);
        match hook {
            Hook::Start => component.start(self),
            Hook::Update => component.update(self),
            Hook::PostUpdate => component.post_update(self),
            Hook::Finish => component.finish(self),
            Hook::CollisionDetected(collision) => component.on_collision_detected(self, collision),
            Hook::CollisionEnded(collision) => component.on_collision_ended(self, collision),
        }
        self.bind(previous.0, previous.1);

        match self.scene.components.get_mut(id) {
            Some(entry) if !entry.detached => {
                entry.component = Some(component);
                self.deliver_pending(id);
            }
            Some(_) => self.finish(id, owner, component),
            None => log::warn!("Component {:?} vanished while running", id),
        }
        true
    }

    /// Deliver queued contact changes while the component stays attached
    fn deliver_pending(&mut self, id: ComponentId) {
        loop {
            let Some(entry) = self.scene.components.get_mut(id) else {
                return;
            };
            if entry.detached || entry.component.is_none() {
                return;
            }
            let Some((kind, collision)) = entry.pending.pop_front() else {
                return;
            };
            self.run_hook(id, Hook::contact(kind, &collision));
        }
    }

    fn bind(&mut self, object: GameObjectId, component: ComponentId) -> (GameObjectId, ComponentId) {
        let previous = (self.game_object, self.component);
        self.game_object = object;
        self.component = component;
        previous
    }
}
