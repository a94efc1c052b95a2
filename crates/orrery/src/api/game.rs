use crate::api::types::GameEvent;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::RenderBuffer;
use crate::config::SimConfig;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of orbit-trace vertices (default: 8192).
    pub max_line_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_instances: 512,
            max_line_vertices: 8192,
            max_events: 32,
        }
    }
}

/// Contract between a concrete scene and the frame runner.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame. Drain input, advance the simulation, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub events: Vec<GameEvent>,
    /// Host wall-clock timestamp of the current frame, in milliseconds.
    pub now_ms: f64,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera3D::new(&SimConfig::default()),
            events: Vec::new(),
            now_ms: 0.0,
        }
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}
