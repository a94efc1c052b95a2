use orrery::systems::render::build_render_buffer;
use orrery::{EngineContext, Game, GameConfig, InputEvent, InputQueue, RenderBuffer, RenderContext};

/// Generic game runner that wires up the frame loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    config: GameConfig,
    initialized: bool,
    /// Instances and line strips cut by the last rebuild.
    dropped: (usize, usize),
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let mut ctx = EngineContext::new();
        ctx.camera
            .resize(config.viewport_width as f64, config.viewport_height as f64);

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            config,
            initialized: false,
            dropped: (0, 0),
        }
    }

    /// Initialize the game at host time `now_ms`. Call once after construction.
    pub fn init(&mut self, now_ms: f64) {
        self.ctx.now_ms = now_ms;
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_render_buffer();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at host time `now_ms`: update the game once, then rebuild the render buffer.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.now_ms = now_ms;

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        if self.ctx.events.len() > self.config.max_events {
            log::warn!("dropping {} game events over capacity", self.ctx.events.len() - self.config.max_events);
            self.ctx.events.truncate(self.config.max_events);
        }

        self.rebuild_render_buffer();
    }

    fn rebuild_render_buffer(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &self.ctx.camera, &mut self.render_buffer);

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        let instances = self.render_buffer.instances.len();
        let dropped_instances = instances.saturating_sub(self.config.max_instances);
        self.render_buffer.instances.truncate(self.config.max_instances);

        let mut dropped_strips = 0usize;
        if self.render_buffer.line_vertices.len() > self.config.max_line_vertices {
            // Keep whole strips only.
            let mut kept = 0usize;
            let mut strips = 0usize;
            for &len in &self.render_buffer.line_strips {
                if kept + len as usize > self.config.max_line_vertices {
                    break;
                }
                kept += len as usize;
                strips += 1;
            }
            dropped_strips = self.render_buffer.line_strips.len() - strips;
            self.render_buffer.line_vertices.truncate(kept);
            self.render_buffer.line_strips.truncate(strips);
        }

        // Warn when the overflow changes, not on every frame it persists.
        let dropped = (dropped_instances, dropped_strips);
        if dropped != self.dropped {
            if dropped_instances > 0 {
                log::warn!(
                    "render buffer full: dropping {dropped_instances} of {instances} instances (max_instances {})",
                    self.config.max_instances
                );
            }
            if dropped_strips > 0 {
                log::warn!(
                    "render buffer full: dropping {dropped_strips} line strips (max_line_vertices {})",
                    self.config.max_line_vertices
                );
            }
            self.dropped = dropped;
        }
    }

    /// Instances and line strips cut from the last frame for lack of capacity.
    pub fn dropped_by_capacity(&self) -> (usize, usize) {
        self.dropped
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    // ---- Pointer accessors for zero-copy reads from JS ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.render_buffer.line_vertices_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.render_buffer.line_vertex_count()
    }

    pub fn line_strips_ptr(&self) -> *const u32 {
        self.render_buffer.line_strips_ptr()
    }

    pub fn line_strip_count(&self) -> u32 {
        self.render_buffer.line_strips.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.render_buffer.camera_ptr()
    }

    pub fn labels_json(&self) -> String {
        match self.render_buffer.labels_json() {
            Ok(json) => json,
            Err(err) => {
                log::warn!("label serialization failed: {err}");
                "[]".to_string()
            }
        }
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.config.max_line_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
