use glam::Vec3;

use crate::components::entity::Entity;
use crate::components::mesh::Shape;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::{LabelInstance, LineVertex, RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Spheres and rings become instances, paths become line strips, and labels are
/// lifted `offset` units above their entity.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &Camera3D,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();
    buffer.camera = camera.uniform();

    for entity in entities {
        if !entity.active {
            continue;
        }

        if let Some(label) = &entity.label {
            buffer.labels.push(LabelInstance {
                text: label.text.clone(),
                x: entity.pos.x,
                y: entity.pos.y + label.offset,
                z: entity.pos.z,
            });
        }

        let Some(mesh) = &entity.mesh else { continue };
        let (param_a, param_b) = match &mesh.shape {
            Shape::Sphere { radius } => (*radius, 0.0),
            Shape::Ring { inner_radius, outer_radius } => (*inner_radius, *outer_radius),
            Shape::Path { points } => {
                let color = mesh.color;
                buffer.push_strip(points.iter().map(|p| {
                    let world: Vec3 = entity.rotation * *p + entity.pos;
                    LineVertex {
                        x: world.x,
                        y: world.y,
                        z: world.z,
                        r: color.r,
                        g: color.g,
                        b: color.b,
                    }
                }));
                continue;
            }
        };

        let q = entity.rotation;
        buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
            kind: mesh.shape.kind(),
            param_a,
            param_b,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            emissive: mesh.emissive,
            opacity: mesh.opacity,
            _pad: 0.0,
        });
    }
}
