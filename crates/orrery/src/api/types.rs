use bytemuck::{Pod, Zeroable};

/// Opaque handle for an entity owned by the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Index of a planet-like body in the `BodyRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Index of a satellite (moon) in the `BodyRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SatelliteId(pub u32);

/// Index of a ring in the `BodyRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingId(pub u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
