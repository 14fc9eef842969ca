//! Collider registry and pairwise overlap detection
//!
//! The registry keeps three co-indexed collections: registered colliders,
//! their boxes for the current frame and the colliders each one currently
//! overlaps. Overlap links are symmetric.
//!
//! Contact changes are queued as [`CollisionEvent`]s and delivered to
//! components by [`Context`](crate::scene::Context). While the pairwise pass
//! runs, unregister requests are queued and applied in request order once
//! the pass is over, so callbacks may remove colliders freely.

use std::collections::VecDeque;

use crate::foundation::collections::{ComponentId, GameObjectId};
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::Scene;

use super::obb::{test_overlap, Obb};

/// Geometry and filtering of a registered collider
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderShape {
    /// Box size along the owner's local axes
    pub size: Vec3,
    /// Colliders sharing a group never collide with each other
    pub group: Option<String>,
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self {
            size: Vec3::new(1.0, 1.0, 1.0),
            group: None,
        }
    }
}

impl ColliderShape {
    /// Whether both shapes carry the same non-empty group
    pub fn shares_group(&self, other: &Self) -> bool {
        match (self.group.as_deref(), other.group.as_deref()) {
            (Some(a), Some(b)) => !a.is_empty() && a == b,
            _ => false,
        }
    }
}

/// Kind of contact change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEventKind {
    /// Colliders started overlapping
    Detected,
    /// Colliders stopped overlapping
    Ended,
}

/// Contact change addressed to one side of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// What changed
    pub kind: CollisionEventKind,
    /// Collider whose owner is notified
    pub collider: ComponentId,
    /// Object owning `collider`
    pub owner: GameObjectId,
    /// Collider on the other side
    pub other: ComponentId,
    /// Object owning `other`
    pub other_owner: GameObjectId,
}

#[derive(Debug, Clone)]
struct Registration {
    id: ComponentId,
    owner: GameObjectId,
    shape: ColliderShape,
    unregistering: bool,
}

/// Detects overlaps between registered box colliders
#[derive(Debug, Default)]
pub struct CollisionsSystem {
    colliders: Vec<Registration>,
    obbs: Vec<Obb>,
    colliding: Vec<Vec<ComponentId>>,

    pass_active: bool,
    pending_unregister: VecDeque<ComponentId>,
    events: VecDeque<CollisionEvent>,
}

impl CollisionsSystem {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider owned by `owner`
    ///
    /// Returns `false` if the collider is already registered. A collider
    /// registered while the pairwise pass runs takes part from the next pass.
    pub fn register_collider(&mut self, collider: ComponentId, owner: GameObjectId, shape: ColliderShape) -> bool {
        if self.index_of(collider).is_some() {
            return false;
        }
        self.colliders.push(Registration {
            id: collider,
            owner,
            shape,
            unregistering: false,
        });
        self.obbs.push(Obb::default());
        self.colliding.push(Vec::new());
        log::debug!("Registered collider {:?} of {:?}", collider, owner);
        true
    }

    /// Unregister a collider, ending every overlap it takes part in
    ///
    /// Returns `false` if the collider is not registered. During the
    /// pairwise pass the request is queued and applied after the pass.
    pub fn unregister_collider(&mut self, collider: ComponentId) -> bool {
        let Some(index) = self.index_of(collider) else {
            return false;
        };
        if self.pass_active {
            let registration = &mut self.colliders[index];
            if !registration.unregistering {
                registration.unregistering = true;
                self.pending_unregister.push_back(collider);
                log::trace!("Deferred unregistering of collider {:?}", collider);
            }
            return true;
        }

        let registration = self.colliders.remove(index);
        self.obbs.remove(index);
        let partners = self.colliding.remove(index);
        for partner in partners {
            let Some(partner_index) = self.index_of(partner) else {
                continue;
            };
            self.colliding[partner_index].retain(|&id| id != collider);
            let partner_owner = self.colliders[partner_index].owner;
            self.push_pair(
                CollisionEventKind::Ended,
                (collider, registration.owner),
                (partner, partner_owner),
            );
        }
        log::debug!("Unregistered collider {:?}", collider);
        true
    }

    /// Whether the collider is registered (a pending unregister still counts)
    pub fn is_registered(&self, collider: ComponentId) -> bool {
        self.index_of(collider).is_some()
    }

    /// Number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Colliders currently overlapping `collider`
    pub fn colliding_with(&self, collider: ComponentId) -> &[ComponentId] {
        self.index_of(collider)
            .map_or(&[], |index| self.colliding[index].as_slice())
    }

    /// Box computed for the collider in the latest pass
    pub fn obb(&self, collider: ComponentId) -> Option<&Obb> {
        self.index_of(collider).map(|index| &self.obbs[index])
    }

    /// Whether the pairwise pass is running
    pub fn is_pass_active(&self) -> bool {
        self.pass_active
    }

    /// Reserved for broad-phase work; all detection happens in the post-update pass
    pub fn update(&mut self) {}

    /// Recompute every box from its owner's world transform and open the pass
    ///
    /// Returns the number of colliders taking part in the pass.
    pub(crate) fn begin_pass(&mut self, scene: &Scene) -> usize {
        for (registration, obb) in self.colliders.iter().zip(self.obbs.iter_mut()) {
            match scene.world_matrix(registration.owner) {
                Some(world) => {
                    let matrix = world * Mat4::new_nonuniform_scaling(&registration.shape.size);
                    *obb = Obb::from_matrix(&matrix);
                }
                None => obb.reset(),
            }
        }
        self.pass_active = true;
        self.colliders.len()
    }

    /// Test pair `(first, second)` and queue events if its state changed
    ///
    /// Returns whether events were queued.
    pub(crate) fn evaluate_pair(&mut self, first: usize, second: usize) -> bool {
        let (a, b) = (&self.colliders[first], &self.colliders[second]);
        if a.unregistering || b.unregistering {
            return false;
        }
        let colliding = !a.shape.shares_group(&b.shape) && test_overlap(&self.obbs[first], &self.obbs[second]);
        let (a, b) = ((a.id, a.owner), (b.id, b.owner));
        let were_colliding = self.colliding[first].contains(&b.0);

        if colliding && !were_colliding {
            self.colliding[first].push(b.0);
            self.colliding[second].push(a.0);
            self.push_pair(CollisionEventKind::Detected, a, b);
            true
        } else if !colliding && were_colliding {
            self.colliding[first].retain(|&id| id != b.0);
            self.colliding[second].retain(|&id| id != a.0);
            self.push_pair(CollisionEventKind::Ended, a, b);
            true
        } else {
            false
        }
    }

    /// Close the pass and apply queued unregister requests in order
    pub(crate) fn end_pass(&mut self) {
        self.pass_active = false;
        while let Some(collider) = self.pending_unregister.pop_front() {
            self.unregister_collider(collider);
        }
    }

    pub(crate) fn pop_event(&mut self) -> Option<CollisionEvent> {
        self.events.pop_front()
    }

    /// Number of contact changes not yet delivered
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn push_pair(
        &mut self,
        kind: CollisionEventKind,
        (first, first_owner): (ComponentId, GameObjectId),
        (second, second_owner): (ComponentId, GameObjectId),
    ) {
        self.events.push_back(CollisionEvent {
            kind,
            collider: first,
            owner: first_owner,
            other: second,
            other_owner: second_owner,
        });
        self.events.push_back(CollisionEvent {
            kind,
            collider: second,
            owner: second_owner,
            other: first,
            other_owner: first_owner,
        });
    }

    fn index_of(&self, collider: ComponentId) -> Option<usize> {
        self.colliders.iter().position(|registration| registration.id == collider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Transform;
    use slotmap::{Key, KeyData};

    fn object_at(scene: &mut Scene, position: Vec3) -> GameObjectId {
        let root = scene.root();
        let id = scene.insert_node(Some(root));
        let transform = scene.transform_id(id).unwrap();
        let mut component = Transform::default();
        component.set_position(position);
        scene.fill_slot(transform, Box::new(component));
        id
    }

    fn collider(n: u64) -> ComponentId {
        ComponentId::from(KeyData::from_ffi((1 << 32) | n))
    }

    fn run_pass(system: &mut CollisionsSystem, scene: &Scene) -> Vec<CollisionEvent> {
        let count = system.begin_pass(scene);
        for i in 0..count {
            for j in i + 1..count {
                system.evaluate_pair(i, j);
            }
        }
        system.end_pass();
        std::iter::from_fn(|| system.pop_event()).collect()
    }

    #[test]
    fn test_register_twice_fails() {
        let mut system = CollisionsSystem::new();
        let owner = GameObjectId::null();

        assert!(system.register_collider(collider(1), owner, ColliderShape::default()));
        assert!(!system.register_collider(collider(1), owner, ColliderShape::default()));
        assert_eq!(system.collider_count(), 1);
    }

    #[test]
    fn test_unregister_unknown_fails() {
        let mut system = CollisionsSystem::new();
        assert!(!system.unregister_collider(collider(7)));
    }

    #[test]
    fn test_enter_and_exit_events() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, Vec3::zeros());
        let b = object_at(&mut scene, Vec3::zeros());
        let mut system = CollisionsSystem::new();
        system.register_collider(collider(1), a, ColliderShape::default());
        system.register_collider(collider(2), b, ColliderShape::default());

        let events = run_pass(&mut system, &scene);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, CollisionEventKind::Detected);
        assert_eq!(events[0].collider, collider(1));
        assert_eq!(events[1].collider, collider(2));
        assert_eq!(system.colliding_with(collider(1)), &[collider(2)]);

        scene.transform_mut(b).unwrap().set_position(Vec3::new(10.0, 0.0, 0.0));
        let events = run_pass(&mut system, &scene);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| event.kind == CollisionEventKind::Ended));
        assert!(system.colliding_with(collider(2)).is_empty());

        assert!(run_pass(&mut system, &scene).is_empty());
    }

    #[test]
    fn test_shared_group_never_collides() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, Vec3::zeros());
        let b = object_at(&mut scene, Vec3::zeros());
        let shape = ColliderShape {
            group: Some("cubes".to_string()),
            ..ColliderShape::default()
        };
        let mut system = CollisionsSystem::new();
        system.register_collider(collider(1), a, shape.clone());
        system.register_collider(collider(2), b, shape);

        assert!(run_pass(&mut system, &scene).is_empty());
    }

    #[test]
    fn test_empty_group_is_no_group() {
        let empty = ColliderShape {
            group: Some(String::new()),
            ..ColliderShape::default()
        };
        assert!(!empty.shares_group(&empty.clone()));
    }

    #[test]
    fn test_unregister_ends_overlaps() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, Vec3::zeros());
        let b = object_at(&mut scene, Vec3::new(0.5, 0.0, 0.0));
        let c = object_at(&mut scene, Vec3::new(-0.5, 0.0, 0.0));
        let mut system = CollisionsSystem::new();
        system.register_collider(collider(1), a, ColliderShape::default());
        system.register_collider(collider(2), b, ColliderShape::default());
        system.register_collider(collider(3), c, ColliderShape::default());
        run_pass(&mut system, &scene);

        assert!(system.unregister_collider(collider(1)));
        let events: Vec<_> = std::iter::from_fn(|| system.pop_event()).collect();

        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|event| event.kind == CollisionEventKind::Ended));
        assert!(!system.is_registered(collider(1)));
        assert!(!system.colliding_with(collider(2)).contains(&collider(1)));
        assert!(!system.colliding_with(collider(3)).contains(&collider(1)));
    }

    #[test]
    fn test_unregister_during_pass_is_deferred() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, Vec3::zeros());
        let b = object_at(&mut scene, Vec3::zeros());
        let mut system = CollisionsSystem::new();
        system.register_collider(collider(1), a, ColliderShape::default());
        system.register_collider(collider(2), b, ColliderShape::default());

        system.begin_pass(&scene);
        assert!(system.unregister_collider(collider(2)));
        assert!(system.unregister_collider(collider(2)));
        assert!(system.is_registered(collider(2)));
        assert!(!system.evaluate_pair(0, 1));
        system.end_pass();

        assert!(!system.is_registered(collider(2)));
        assert_eq!(system.collider_count(), 1);
        assert_eq!(system.pending_events(), 0);
    }

    #[test]
    fn test_obb_follows_owner_and_size() {
        let mut scene = Scene::new();
        let a = object_at(&mut scene, Vec3::new(1.0, 2.0, 3.0));
        let mut system = CollisionsSystem::new();
        let shape = ColliderShape {
            size: Vec3::new(2.0, 4.0, 6.0),
            group: None,
        };
        system.register_collider(collider(1), a, shape);
        run_pass(&mut system, &scene);

        let obb = system.obb(collider(1)).unwrap();
        assert_eq!(obb.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(obb.half_extents, [1.0, 2.0, 3.0]);
    }
}
