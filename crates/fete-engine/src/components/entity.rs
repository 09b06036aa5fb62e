use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;
use crate::components::overlay::OverlayComponent;

/// Fat Entity — a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by every buffer builder.
    pub active: bool,
    /// Position in world space (meshes) or CSS pixel offset (overlays).
    pub pos: Vec3,
    /// Roll around the view axis, in radians.
    pub rotation: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Opacity, 0.0 to 1.0.
    pub alpha: f32,
    pub mesh: Option<MeshComponent>,
    pub overlay: Option<OverlayComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: 0.0,
            scale: 1.0,
            alpha: 1.0,
            mesh: None,
            overlay: None,
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

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayComponent) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.active = false;
        self
    }
}
