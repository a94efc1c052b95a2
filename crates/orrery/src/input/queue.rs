/// Input event types the engine understands.
/// Generic, no game-specific semantics. Pointer positions are CSS pixels
/// relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A primary press (click/tap) at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The primary press ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// Relative motion while the pointer is captured.
    PointerMotion { dx: f32, dy: f32 },
    /// Exclusive pointer capture was acquired or lost.
    PointerCapture { captured: bool },
    /// Scroll wheel. Positive is away from the user.
    Wheel { delta_y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The canvas changed size.
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer (control panel, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events in arrival order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
