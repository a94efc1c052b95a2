use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Text anchored above an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Height above the entity origin, in world units.
    pub offset: f32,
}

/// Fat Entity: the rendering boundary's view of one drawable object.
/// Positions are f32 here; the kinematics core keeps f64 and converts on sync.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by rendering and hit-testing.
    pub active: bool,
    pub pos: Vec3,
    pub rotation: Quat,
    pub mesh: Option<MeshComponent>,
    pub label: Option<Label>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            mesh: None,
            label: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_label(mut self, text: impl Into<String>, offset: f32) -> Self {
        self.label = Some(Label { text: text.into(), offset });
        self
    }
}
