//! Rotates its object by dragging a finger across the screen

use scene_engine::prelude::*;

const FACTOR: f32 = 0.1;

/// Turns drags into rotation about the object's local x and y axes
///
/// Follows one touch at a time. Movement is scaled by the display density
/// since touch coordinates are in screen pixels.
#[derive(Debug, Clone, Default)]
pub struct TouchRotationController {
    tracked: Option<u32>,
    last_x: f32,
    last_y: f32,
}

impl TouchRotationController {
    /// Controller not tracking any touch yet
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for TouchRotationController {
    fn update(&mut self, ctx: &mut Context<'_>) {
        let touches = ctx.services.input.touches();
        let Some(touch) = self
            .tracked
            .and_then(|id| touches.iter().find(|touch| touch.id == id))
            .or_else(|| touches.first())
            .copied()
        else {
            return;
        };

        if touch.state != TouchState::Began && Some(touch.id) == self.tracked {
            let factor = FACTOR / ctx.services.display.density_scale_factor;
            let me = ctx.game_object();
            if let Some(transform) = ctx.scene.transform_mut(me) {
                transform.rotate_by(
                    -(touch.y - self.last_y) * factor,
                    -(touch.x - self.last_x) * factor,
                    0.0,
                );
            }
        }

        self.tracked = (touch.state != TouchState::Ended).then_some(touch.id);
        self.last_x = touch.x;
        self.last_y = touch.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::foundation::math::utils;

    #[test]
    fn test_horizontal_drag_turns_about_y() {
        let config = EngineConfig::default().with_fixed_time_step(0.016);
        // Drag 900 pixels right over 3 frames: 90 degrees at density 1
        let input = ScriptedTouchInput::drag(0, (0.0, 0.0), (900.0, 0.0), 3);
        let mut engine = Engine::new(config, Box::new(NullRenderer), Box::new(input)).unwrap();
        let mut ctx = engine.context();
        let root = ctx.scene.root();
        let object = ctx.create_object(root).unwrap();
        ctx.add_component(object, TouchRotationController::new()).unwrap();

        for _ in 0..5 {
            engine.frame(0.016);
        }

        let transform = engine.scene().transform(object).unwrap();
        let forward = utils::transform_vector(&transform.local_matrix(), Vec3::x());
        assert_relative_eq!(forward, Vec3::z(), epsilon = 1e-4);
    }
}
