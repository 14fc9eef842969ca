//! Removes its object from the scene on the first contact

use scene_engine::prelude::*;

/// Destroys its object as soon as one of its colliders touches another
///
/// Colliders in the same group as `ignore_group` do not count.
#[derive(Debug, Clone, Default)]
pub struct DestroyOnCollision {
    ignore_group: Option<String>,
}

impl DestroyOnCollision {
    /// Destroy on any contact
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore contacts with colliders of `group`
    pub fn ignoring(group: impl Into<String>) -> Self {
        Self {
            ignore_group: Some(group.into()),
        }
    }
}

impl Component for DestroyOnCollision {
    fn on_collision_detected(&mut self, ctx: &mut Context<'_>, collision: &Collision) {
        if let Some(group) = self.ignore_group.as_deref() {
            let other_group = ctx
                .scene
                .component::<BoxCollider>(collision.other)
                .and_then(BoxCollider::group);
            if other_group == Some(group) {
                return;
            }
        }

        let me = ctx.game_object();
        match ctx.destroy(me) {
            Ok(true) => log::debug!("{:?} destroyed by contact with {:?}", me, collision.other_object),
            Ok(false) => {}
            Err(e) => log::warn!("Cannot destroy {:?}: {}", me, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_destroyed_when_hit() {
        let mut engine = Engine::headless(EngineConfig::default()).unwrap();
        let mut ctx = engine.context();
        let root = ctx.scene.root();
        let target = ctx.create_object(root).unwrap();
        ctx.add_component(target, BoxCollider::default()).unwrap();
        ctx.add_component(target, DestroyOnCollision::new()).unwrap();
        let projectile = ctx.create_object(root).unwrap();
        ctx.scene
            .transform_mut(projectile)
            .unwrap()
            .set_position(Vec3::new(3.0, 0.0, 0.0));
        ctx.add_component(projectile, BoxCollider::default()).unwrap();

        engine.frame(0.016);
        assert!(engine.scene().contains(target));

        engine
            .scene_mut()
            .transform_mut(projectile)
            .unwrap()
            .set_position(Vec3::new(0.5, 0.0, 0.0));
        engine.frame(0.016);

        assert!(!engine.scene().contains(target));
        assert!(engine.scene().contains(projectile));
        assert_eq!(engine.collisions().collider_count(), 1);
    }

    #[test]
    fn test_ignored_group_survives() {
        let mut engine = Engine::headless(EngineConfig::default()).unwrap();
        let mut ctx = engine.context();
        let root = ctx.scene.root();
        let target = ctx.create_object(root).unwrap();
        ctx.add_component(target, BoxCollider::default()).unwrap();
        ctx.add_component(target, DestroyOnCollision::ignoring("friendly")).unwrap();
        let friend = ctx.create_object(root).unwrap();
        ctx.add_component(friend, BoxCollider::default().with_group("friendly")).unwrap();

        engine.frame(0.016);

        assert!(engine.scene().contains(target));
    }
}
