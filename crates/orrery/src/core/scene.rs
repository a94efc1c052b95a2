use glam::{DQuat, DVec3};

use crate::api::types::EntityId;
use crate::components::entity::{Entity, Label};
use crate::components::mesh::Shape;
use crate::renderer::ray::Ray;
use crate::renderer::traits::{Hit, RenderBoundary, SpawnRequest};

/// Simple entity storage using a flat Vec.
/// Designed for small entity counts (a star, planets, moons, rings, orbit traces).
pub struct Scene {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene.
    pub fn spawn_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Attach (or replace) a text label. Returns false for unknown IDs.
    pub fn attach_label(&mut self, id: EntityId, text: impl Into<String>, offset: f32) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.label = Some(Label { text: text.into(), offset });
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBoundary for Scene {
    fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        let id = self.next_id();
        self.spawn_entity(
            Entity::new(id)
                .with_tag(request.tag)
                .with_pos(request.position.as_vec3())
                .with_rotation(request.rotation.as_quat())
                .with_mesh(request.mesh),
        );
        id
    }

    fn set_transform(&mut self, entity: EntityId, position: DVec3, rotation: DQuat) {
        if let Some(e) = self.get_mut(entity) {
            e.pos = position.as_vec3();
            e.rotation = rotation.as_quat();
        }
    }

    fn hit_test(&self, ray: &Ray, pickable: &dyn Fn(EntityId) -> bool) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for entity in self.entities.iter().filter(|e| e.active && pickable(e.id)) {
            let Some(mesh) = &entity.mesh else { continue };
            let center = entity.pos.as_dvec3();
            let distance = match &mesh.shape {
                Shape::Sphere { radius } => ray.intersect_sphere(center, *radius as f64),
                Shape::Ring { inner_radius, outer_radius } => {
                    let normal = entity.rotation.as_dquat() * DVec3::Z;
                    ray.intersect_annulus(center, normal, *inner_radius as f64, *outer_radius as f64)
                }
                Shape::Path { .. } => None,
            };
            if let Some(distance) = distance {
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(Hit { entity: entity.id, distance });
                }
            }
        }
        best
    }
}
