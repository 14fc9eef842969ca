//! Headless cubes demo
//!
//! Usage: `cubes_demo [config.toml|config.ron]`
//!
//! Runs the demo scene for the configured number of frames with a recording
//! renderer and a scripted drag gesture, then prints what the last frame drew.

mod app;
mod components;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use thiserror::Error;

use app::CubesApp;

const DEFAULT_FRAMES: u64 = 240;
const CUBE_LAYERS: u32 = 3;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn main() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default().with_fixed_time_step(1.0 / 60.0),
    };
    logging::init_with_level(&config.log_level);
    log::info!("Starting cubes demo with {:?}", config);

    let frames = config.frame_limit.unwrap_or(DEFAULT_FRAMES);
    let renderer = RecordingRenderer::new();
    let input = ScriptedTouchInput::drag(0, (400.0, 300.0), (700.0, 450.0), 30);
    let mut engine = Engine::new(config, Box::new(renderer.clone()), Box::new(input))?;

    let mut app = CubesApp::new(CUBE_LAYERS);
    engine.run(&mut app, Some(frames))?;

    let calls = renderer.calls();
    let wireframes = calls.iter().filter(|call| call.wireframe.is_some()).count();
    println!(
        "{} frames rendered, last frame: {} meshes, {} collider wireframes, fps {:?}",
        renderer.frames(),
        calls.len() - wireframes,
        wireframes,
        app.last_fps()
    );
    Ok(())
}
