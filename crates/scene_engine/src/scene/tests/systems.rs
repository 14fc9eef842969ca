use super::*;
use crate::scene::Scene;
use crate::services::Services;
use crate::systems::System;

/// Writes each phase it runs to the journal, along with the live object count
struct JournalSystem {
    name: &'static str,
    journal: Journal,
    seen_objects: Rc<RefCell<Vec<usize>>>,
}

impl JournalSystem {
    fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
            seen_objects: Rc::default(),
        }
    }
}

impl System for JournalSystem {
    fn name(&self) -> &str {
        self.name
    }

    fn update(&mut self, scene: &mut Scene, _services: &mut Services) {
        self.journal.record(format!("{}:update", self.name));
        self.seen_objects.borrow_mut().push(scene.object_count());
    }

    fn post_update(&mut self, _scene: &mut Scene, services: &mut Services) {
        self.journal.record(format!("{}:post_update", self.name));
        services.messenger.send_message(self.name);
    }
}

#[test]
fn test_systems_wrap_component_phases_and_collision_pass() {
    let mut engine = engine();
    let journal = Journal::default();
    collider_object(&mut engine, "a", Vec3::zeros(), &journal);
    collider_object(&mut engine, "b", Vec3::zeros(), &journal);
    engine.add_system(JournalSystem::new("s1", &journal));
    engine.add_system(JournalSystem::new("s2", &journal));
    journal.clear();

    engine.frame(0.016);

    assert_eq!(journal.entries(), vec![
        "s1:update",
        "s2:update",
        "a:update",
        "b:update",
        "a:post_update",
        "b:post_update",
        "a:detected",
        "b:detected",
        "s1:post_update",
        "s2:post_update",
    ]);
    assert_eq!(engine.services_mut().messenger.take_messages::<&str>(), vec!["s1", "s2"]);
}

#[test]
fn test_systems_see_scene_changes_from_previous_frame() {
    let mut engine = engine();
    let journal = Journal::default();
    let system = JournalSystem::new("counter", &journal);
    let seen_objects = system.seen_objects.clone();
    engine.add_system(system);

    engine.frame(0.016);
    traced_object(&mut engine, "late", &journal);
    engine.frame(0.016);

    assert_eq!(*seen_objects.borrow(), vec![1, 2]);
    assert_eq!(journal.count("counter:update"), 2);
    assert_eq!(journal.count("counter:post_update"), 2);
}

#[test]
fn test_default_system_name_is_type_name() {
    struct Idle;
    impl System for Idle {}

    assert!(Idle.name().ends_with("Idle"));
}
