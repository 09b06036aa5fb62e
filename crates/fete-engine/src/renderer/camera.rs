use glam::{Mat4, Vec2, Vec3};

/// Perspective camera for the decorative 3D scenes.
///
/// Projection happens on the CPU: the host receives primitives already in
/// normalized device coordinates and only raymarches them.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// A world point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Normalized device coordinates, [-1, 1] on both axes, Y up.
    pub ndc: Vec2,
    /// Depth in [0, 1], larger is farther.
    pub depth: f32,
    /// NDC-height units covered by one world unit at this distance.
    pub units_to_ndc: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            fov_y: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl PerspectiveCamera {
    /// Camera on the +Z axis looking at the origin.
    pub fn looking_at_origin(distance: f32, fov_y: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, distance),
            fov_y,
            ..Default::default()
        }
    }

    /// Match the viewport aspect ratio.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            self.aspect = viewport_width / viewport_height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn focal_length(&self) -> f32 {
        1.0 / (self.fov_y.to_radians() * 0.5).tan()
    }

    /// Project a world point. Returns `None` for points at or behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Projected {
            ndc: Vec2::new(ndc.x, ndc.y),
            depth: ndc.z,
            units_to_ndc: self.focal_length() / clip.w,
        })
    }
}
