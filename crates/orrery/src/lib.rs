pub mod api;
pub mod camera;
pub mod components;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod orbit;
pub mod renderer;
pub mod sim;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig, RenderContext};
pub use api::types::{BodyId, EntityId, GameEvent, RingId, SatelliteId};
pub use camera::{CameraMode, CameraModeController, FollowOrbitRig, ModeChange, PrimaryAction};
pub use components::entity::{Entity, Label};
pub use components::mesh::{Color, MeshComponent, Shape};
pub use config::{NewBodyConfig, SimConfig};
pub use crate::core::clock::OrbitClock;
pub use crate::core::rng::Rng;
pub use crate::core::scene::Scene;
pub use error::{OrreryError, Result};
pub use input::queue::{InputEvent, InputQueue};
pub use orbit::{
    orbit_trace, Attachment, Body, BodyDesc, BodyRegistry, Orbit, Placement, PlacementResolver, Ring,
    Satellite, SatelliteDesc, TRACE_SAMPLES,
};
pub use renderer::{Camera3D, CameraUniform, LabelInstance, LineVertex, Ray, RenderBoundary, RenderBuffer, RenderInstance, SpawnRequest};
pub use sim::{NewBodyParams, PlacementOutcome, SimEvent, Simulation};
pub use systems::render::build_render_buffer;
