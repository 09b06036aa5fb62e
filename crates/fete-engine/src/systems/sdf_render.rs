use crate::components::entity::Entity;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Build the SDF instance buffer from entities with mesh components.
///
/// Each active mesh is projected through `camera`; culled points are dropped.
/// Instances come out sorted back-to-front.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &PerspectiveCamera,
    buffer: &mut SDFBuffer,
) {
    buffer.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        let projected = match camera.project(entity.pos) {
            Some(p) => p,
            None => continue,
        };
        let (radius, height) = mesh.primitive.extents();
        let size = entity.scale * projected.units_to_ndc;
        buffer.push(SDFInstance {
            x: projected.ndc.x,
            y: projected.ndc.y,
            depth: projected.depth,
            radius: radius * size,
            height: height * size,
            rotation: entity.rotation,
            kind: mesh.primitive.kind(),
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            alpha: entity.alpha * mesh.color.a,
            shininess: mesh.shininess,
            emissive: mesh.emissive,
            distort: mesh.distort,
            _pad0: 0.0,
            _pad1: 0.0,
        });
    }
    buffer.sort_back_to_front();
}
