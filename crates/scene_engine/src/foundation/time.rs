//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }
}

/// Per-frame time as seen by components
///
/// Owned by the engine's services and advanced once at the start of every
/// frame, so every hook within one frame observes the same delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTime {
    delta: f32,
    total: f32,
    frame: u64,
}

impl FrameTime {
    /// Start a new frame that lasted `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta.max(0.0);
        self.total += self.delta;
        self.frame += 1;
    }

    /// Seconds elapsed since the previous frame
    pub fn time_delta(&self) -> f32 {
        self.delta
    }

    /// Seconds elapsed since the first frame
    pub fn total_time(&self) -> f32 {
        self.total
    }

    /// Number of the current frame, starting at 1 for the first frame
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_time_accumulates() {
        let mut time = FrameTime::default();
        time.advance(0.25);
        time.advance(0.5);

        assert_relative_eq!(time.time_delta(), 0.5);
        assert_relative_eq!(time.total_time(), 0.75);
        assert_eq!(time.frame_count(), 2);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut time = FrameTime::default();
        time.advance(-1.0);
        assert_relative_eq!(time.time_delta(), 0.0);
    }
}
