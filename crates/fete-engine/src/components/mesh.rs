use crate::components::color::Color;

/// SDF primitive. Dimensions are in world units before entity scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere { radius: f32 },
    /// Upright cylinder centred on the entity position.
    Cylinder { radius: f32, height: f32 },
    /// Upright cone, apex up, centred on the entity position.
    Cone { radius: f32, height: f32 },
}

impl Primitive {
    /// Wire tag read by the host shader.
    pub fn kind(&self) -> f32 {
        match self {
            Primitive::Sphere { .. } => 0.0,
            Primitive::Cylinder { .. } => 1.0,
            Primitive::Cone { .. } => 2.0,
        }
    }

    /// (radius, height) in world units. Spheres report their diameter as height.
    pub fn extents(&self) -> (f32, f32) {
        match *self {
            Primitive::Sphere { radius } => (radius, radius * 2.0),
            Primitive::Cylinder { radius, height } | Primitive::Cone { radius, height } => {
                (radius, height)
            }
        }
    }
}

/// Component for SDF-rendered meshes (raymarched primitives).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub primitive: Primitive,
    pub color: Color,
    /// Phong specular exponent (default: 32.0).
    pub shininess: f32,
    /// HDR glow multiplier (default: 0.0).
    pub emissive: f32,
    /// Surface wobble amplitude applied by the shader (default: 0.0).
    pub distort: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            primitive: Primitive::Sphere { radius: 0.5 },
            color: Color::WHITE,
            shininess: 32.0,
            emissive: 0.0,
            distort: 0.0,
        }
    }
}

impl MeshComponent {
    pub fn new(primitive: Primitive, color: Color) -> Self {
        Self {
            primitive,
            color,
            ..Default::default()
        }
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_distort(mut self, distort: f32) -> Self {
        self.distort = distort;
        self
    }
}
