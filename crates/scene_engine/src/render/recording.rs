//! Headless renderers

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::collections::MeshHandle;
use crate::foundation::math::Mat4;

use super::api::{Color, Renderer};

/// Renderer that drops every draw call
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, mesh: MeshHandle, _transformation: &Mat4) {
        log::trace!("render {:?}", mesh);
    }

    fn render_wireframe(&mut self, mesh: MeshHandle, color: Color, _transformation: &Mat4) {
        log::trace!("render_wireframe {:?} {:?}", mesh, color);
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Mesh drawn
    pub mesh: MeshHandle,
    /// World transformation used
    pub transformation: Mat4,
    /// Wireframe color, `None` for a regular draw
    pub wireframe: Option<Color>,
}

#[derive(Debug, Default)]
struct DrawLog {
    frames: u64,
    calls: Vec<DrawCall>,
}

/// Renderer that keeps the draw calls of the current frame
///
/// Clones share the same log, so the host can keep one clone for inspection
/// and hand the other to the engine.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    log: Rc<RefCell<DrawLog>>,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls issued since the last frame start
    pub fn calls(&self) -> Vec<DrawCall> {
        self.log.borrow().calls.clone()
    }

    /// Number of frames started
    pub fn frames(&self) -> u64 {
        self.log.borrow().frames
    }
}

impl Renderer for RecordingRenderer {
    fn on_start_rendering_frame(&mut self) {
        let mut log = self.log.borrow_mut();
        log.frames += 1;
        log.calls.clear();
    }

    fn render(&mut self, mesh: MeshHandle, transformation: &Mat4) {
        self.log.borrow_mut().calls.push(DrawCall {
            mesh,
            transformation: *transformation,
            wireframe: None,
        });
    }

    fn render_wireframe(&mut self, mesh: MeshHandle, color: Color, transformation: &Mat4) {
        self.log.borrow_mut().calls.push(DrawCall {
            mesh,
            transformation: *transformation,
            wireframe: Some(color),
        });
    }
}
