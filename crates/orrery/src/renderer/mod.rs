pub mod camera;
pub mod instance;
pub mod ray;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{Camera3D, CameraUniform};
pub use instance::{LabelInstance, LineVertex, RenderBuffer, RenderInstance};
pub use ray::Ray;
pub use traits::{Hit, RenderBoundary, SpawnRequest};
