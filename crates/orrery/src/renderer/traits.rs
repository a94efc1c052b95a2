//! Contract between the kinematics core and whatever draws the scene.
//!
//! The core never touches meshes, textures or the scene graph directly. It asks
//! the boundary to create drawables, pushes transforms every tick, and asks it
//! which drawable a pointer ray hits. `Scene` is the in-process implementation
//! whose contents are flattened into the render buffer for the host renderer.

use glam::{DQuat, DVec3};

use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;
use crate::renderer::ray::Ray;

/// Creation event for one drawable.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub tag: String,
    pub mesh: MeshComponent,
    pub position: DVec3,
    pub rotation: DQuat,
}

impl SpawnRequest {
    pub fn new(tag: impl Into<String>, mesh: MeshComponent) -> Self {
        Self {
            tag: tag.into(),
            mesh,
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }

    pub fn at(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: DQuat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// A ray hit reported by the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub entity: EntityId,
    pub distance: f64,
}

pub trait RenderBoundary {
    /// Create a drawable and return the handle the core stores for it.
    fn spawn(&mut self, request: SpawnRequest) -> EntityId;

    /// Place an existing drawable. Unknown handles are ignored.
    fn set_transform(&mut self, entity: EntityId, position: DVec3, rotation: DQuat);

    /// Nearest drawable hit by `ray` among those accepted by `pickable`.
    fn hit_test(&self, ray: &Ray, pickable: &dyn Fn(EntityId) -> bool) -> Option<Hit>;
}
