//! Lifecycle, collision and system scenarios driven through the engine

mod systems;

use std::cell::RefCell;
use std::rc::Rc;

use crate::components::BoxCollider;
use crate::core::EngineConfig;
use crate::engine::Engine;
use crate::foundation::collections::{ComponentId, GameObjectId};
use crate::foundation::math::Vec3;
use crate::scene::{Collision, Component, Context};

/// Hook calls recorded by tracers, shared between test and components
#[derive(Clone, Default)]
pub(super) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(super) fn record(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub(super) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(super) fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|recorded| *recorded == entry).count()
    }

    pub(super) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Records every hook it receives as `name:hook`
pub(super) struct Tracer {
    name: &'static str,
    journal: Journal,
}

impl Tracer {
    pub(super) fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
        }
    }

    fn record(&self, hook: &str) {
        self.journal.record(format!("{}:{}", self.name, hook));
    }
}

impl Component for Tracer {
    fn start(&mut self, _ctx: &mut Context<'_>) {
        self.record("start");
    }

    fn update(&mut self, _ctx: &mut Context<'_>) {
        self.record("update");
    }

    fn post_update(&mut self, _ctx: &mut Context<'_>) {
        self.record("post_update");
    }

    fn finish(&mut self, _ctx: &mut Context<'_>) {
        self.record("finish");
    }

    fn on_collision_detected(&mut self, _ctx: &mut Context<'_>, _collision: &Collision) {
        self.record("detected");
    }

    fn on_collision_ended(&mut self, _ctx: &mut Context<'_>, _collision: &Collision) {
        self.record("ended");
    }
}

pub(super) fn engine() -> Engine {
    Engine::headless(EngineConfig::default()).unwrap()
}

/// Object under the root carrying a tracer
pub(super) fn traced_object(engine: &mut Engine, name: &'static str, journal: &Journal) -> GameObjectId {
    let mut ctx = engine.context();
    let root = ctx.scene.root();
    let object = ctx.create_object(root).unwrap();
    ctx.add_component(object, Tracer::new(name, journal)).unwrap();
    object
}

/// Object under the root at `position` with a unit collider and a tracer
pub(super) fn collider_object(
    engine: &mut Engine,
    name: &'static str,
    position: Vec3,
    journal: &Journal,
) -> (GameObjectId, ComponentId) {
    let mut ctx = engine.context();
    let root = ctx.scene.root();
    let object = ctx.create_object(root).unwrap();
    ctx.scene.transform_mut(object).unwrap().set_position(position);
    let collider = ctx.add_component(object, BoxCollider::default()).unwrap();
    ctx.add_component(object, Tracer::new(name, journal)).unwrap();
    (object, collider)
}
