use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::renderer::camera::CameraUniform;

/// Per-instance render data read by the host renderer straight out of WASM memory.
/// Must match the host protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// World position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation quaternion (x, y, z, w).
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    /// `Shape::kind()`: 0 = sphere, 1 = ring.
    pub kind: f32,
    /// Sphere radius, or ring inner radius.
    pub param_a: f32,
    /// Ring outer radius (0 for spheres).
    pub param_b: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub emissive: f32,
    pub opacity: f32,
    pub _pad: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One vertex of a polyline (orbit traces). 6 floats: position then colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 6;
}

/// Text label positioned in world space. Sent to the host as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelInstance {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Everything the host needs to draw one frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    /// Vertices of every polyline, back to back.
    pub line_vertices: Vec<LineVertex>,
    /// Vertex count of each polyline, in `line_vertices` order.
    pub line_strips: Vec<u32>,
    pub labels: Vec<LabelInstance>,
    pub camera: CameraUniform,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
            line_vertices: Vec::with_capacity(1024),
            line_strips: Vec::with_capacity(16),
            labels: Vec::with_capacity(16),
            camera: CameraUniform::zeroed(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.line_vertices.clear();
        self.line_strips.clear();
        self.labels.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    /// Append a polyline. Empty strips are dropped.
    pub fn push_strip(&mut self, vertices: impl IntoIterator<Item = LineVertex>) {
        let before = self.line_vertices.len();
        self.line_vertices.extend(vertices);
        let count = self.line_vertices.len() - before;
        if count > 0 {
            self.line_strips.push(count as u32);
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.line_vertices.len() as u32
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn line_vertices_ptr(&self) -> *const f32 {
        self.line_vertices.as_ptr() as *const f32
    }

    pub fn line_strips_ptr(&self) -> *const u32 {
        self.line_strips.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn labels_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.labels)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
