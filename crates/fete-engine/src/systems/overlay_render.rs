use crate::components::entity::Entity;
use crate::renderer::overlay_instance::{OverlayBuffer, OverlayInstance};

/// Build the overlay transform buffer from entities with overlay components.
pub fn build_overlay_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut OverlayBuffer) {
    buffer.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let overlay = match &entity.overlay {
            Some(o) => o,
            None => continue,
        };
        buffer.push(OverlayInstance {
            element: overlay.element.0 as f32,
            x: entity.pos.x,
            y: entity.pos.y,
            scale: entity.scale,
            rotation: entity.rotation.to_degrees(),
            alpha: entity.alpha.clamp(0.0, 1.0),
            _pad0: 0.0,
            _pad1: 0.0,
        });
    }
}
