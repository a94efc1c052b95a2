pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// This macro generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery::Game` and has `new()`
/// - `$game_name`: A string literal used in the initialization log message
///
/// Calls made before `game_init()` are ignored; accessors then return zero or null.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: called before game_init()", $game_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init(now_ms: f64) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init(now_ms));
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(now_ms: f64) {
            with_runner(|r| r.tick(now_ms));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_motion(dx: f32, dy: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMotion { dx, dy }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_capture(captured: bool) {
            with_runner(|r| r.push_input(InputEvent::PointerCapture { captured }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_line_vertices_ptr() -> *const f32 {
            with_runner(|r| r.line_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_line_vertex_count() -> u32 {
            with_runner(|r| r.line_vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_line_strips_ptr() -> *const u32 {
            with_runner(|r| r.line_strips_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_line_strip_count() -> u32 {
            with_runner(|r| r.line_strip_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_labels_json() -> String {
            with_runner(|r| r.labels_json()).unwrap_or_else(|| "[]".to_string())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_line_vertices() -> u32 {
            with_runner(|r| r.max_line_vertices()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }
    };
}
