//! Frame rate reporting through the messenger

use scene_engine::prelude::*;

const AVERAGING_FACTOR: u32 = 5;

/// Frames per second averaged over the last few frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsReport(pub f32);

/// Sends an [`FpsReport`] to the host every five frames
#[derive(Debug, Clone, Default)]
pub struct FpsReporter {
    frame_count: u32,
    frame_time_sum: f32,
}

impl FpsReporter {
    /// Reporter with no frames counted
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for FpsReporter {
    fn update(&mut self, ctx: &mut Context<'_>) {
        self.frame_time_sum += ctx.time_delta();
        self.frame_count += 1;

        if self.frame_count == AVERAGING_FACTOR {
            if self.frame_time_sum > 0.0 {
                let fps = self.frame_count as f32 / self.frame_time_sum;
                ctx.services.messenger.send_message(FpsReport(fps));
            }
            self.frame_count = 0;
            self.frame_time_sum = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reports_every_five_frames() {
        let mut engine = Engine::headless(EngineConfig::default()).unwrap();
        let mut ctx = engine.context();
        let root = ctx.scene.root();
        let object = ctx.create_object(root).unwrap();
        ctx.add_component(object, FpsReporter::new()).unwrap();

        for _ in 0..4 {
            engine.frame(0.02);
        }
        assert!(engine.services_mut().messenger.take_messages::<FpsReport>().is_empty());

        engine.frame(0.02);
        let reports = engine.services_mut().messenger.take_messages::<FpsReport>();
        assert_eq!(reports.len(), 1);
        assert_relative_eq!(reports[0].0, 50.0, epsilon = 1e-3);
    }
}
