//! Touch input contract
//!
//! Device polling belongs to the platform layer. The engine asks its
//! [`TouchInput`] to advance once per frame and components read the touches
//! of the current frame.

use std::collections::VecDeque;

/// Phase of a touch within its gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchState {
    /// Finger went down this frame
    Began,
    /// Finger is still down
    Moved,
    /// Finger was lifted this frame
    Ended,
}

/// A single touch point in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Identifier stable for the whole gesture
    pub id: u32,
    /// Horizontal position in pixels
    pub x: f32,
    /// Vertical position in pixels
    pub y: f32,
    /// Gesture phase
    pub state: TouchState,
}

impl Touch {
    /// Create a touch
    pub fn new(id: u32, x: f32, y: f32, state: TouchState) -> Self {
        Self { id, x, y, state }
    }
}

/// Source of touch events
pub trait TouchInput {
    /// Called by the engine at the start of every frame
    fn begin_frame(&mut self) {}

    /// Touches active in the current frame
    fn touches(&self) -> &[Touch];
}

/// Input source that never reports touches
#[derive(Debug, Default)]
pub struct NoInput;

impl TouchInput for NoInput {
    fn touches(&self) -> &[Touch] {
        &[]
    }
}

/// Replays a prepared sequence of frames, one per engine frame
///
/// Once the script is exhausted every later frame has no touches.
#[derive(Debug, Default)]
pub struct ScriptedTouchInput {
    pending: VecDeque<Vec<Touch>>,
    current: Vec<Touch>,
}

impl ScriptedTouchInput {
    /// Create an input replaying `frames` in order
    pub fn new(frames: impl IntoIterator<Item = Vec<Touch>>) -> Self {
        Self {
            pending: frames.into_iter().collect(),
            current: Vec::new(),
        }
    }

    /// Append a frame to the script
    pub fn push_frame(&mut self, touches: Vec<Touch>) {
        self.pending.push_back(touches);
    }

    /// A single-finger drag from `from` to `to` spread over `steps` move frames
    pub fn drag(id: u32, from: (f32, f32), to: (f32, f32), steps: u32) -> Self {
        let steps = steps.max(1);
        let mut frames = vec![vec![Touch::new(id, from.0, from.1, TouchState::Began)]];
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            let state = if step == steps { TouchState::Ended } else { TouchState::Moved };
            frames.push(vec![Touch::new(id, x, y, state)]);
        }
        Self::new(frames)
    }
}

impl TouchInput for ScriptedTouchInput {
    fn begin_frame(&mut self) {
        self.current = self.pending.pop_front().unwrap_or_default();
    }

    fn touches(&self) -> &[Touch] {
        &self.current
    }
}
