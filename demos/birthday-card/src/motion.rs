//! Time-keyed motion shared by the 3D scenes.
//!
//! Every function here maps (parameters, elapsed seconds) to a pose. Nothing
//! accumulates between frames, so a pose never drifts and can be recomputed
//! for any instant.

use fete_engine::{Color, EntityId, MeshComponent, PageContext, Primitive, Rng, Scene};
use glam::{Quat, Vec3};

/// Gentle hover applied to a whole group: small vertical bob plus roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Phase in seconds, randomized once per instance.
    pub offset: f32,
}

impl Hover {
    pub fn new(speed: f32, rotation_intensity: f32, float_intensity: f32, rng: &mut Rng) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            offset: rng.range(0.0, 1.0e3),
        }
    }

    /// (vertical offset, roll) at time `t`.
    pub fn at(&self, t: f32) -> (f32, f32) {
        let phase = ((t + self.offset) / 4.0 * self.speed).sin();
        (
            phase / 10.0 * self.float_intensity,
            phase / 20.0 * self.rotation_intensity,
        )
    }
}

/// Which axis a point cloud spins around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Y,
    Z,
}

/// Background cloud of tiny glowing spheres.
///
/// Base positions are drawn once at spawn. Each frame the cloud spins as a
/// whole and every point bobs by `sin(t * bob_rate + i) * bob_height`.
pub struct PointCloud {
    points: Vec<(EntityId, Vec3)>,
    spin: Spin,
    spin_rate: f32,
    bob_rate: f32,
    bob_height: f32,
}

impl PointCloud {
    pub fn spawn(
        ctx: &mut PageContext,
        tag: &str,
        bases: Vec<(Vec3, Color)>,
        radius: f32,
        alpha: f32,
    ) -> Self {
        let points = bases
            .into_iter()
            .map(|(base, color)| {
                let mesh = MeshComponent::new(Primitive::Sphere { radius }, color).with_emissive(1.0);
                let id = ctx.spawn(|e| e.with_tag(tag).with_pos(base).with_alpha(alpha).with_mesh(mesh));
                (id, base)
            })
            .collect();
        Self {
            points,
            spin: Spin::Y,
            spin_rate: 0.0,
            bob_rate: 0.0,
            bob_height: 0.0,
        }
    }

    pub fn with_spin(mut self, spin: Spin, rate: f32) -> Self {
        self.spin = spin;
        self.spin_rate = rate;
        self
    }

    pub fn with_bob(mut self, rate: f32, height: f32) -> Self {
        self.bob_rate = rate;
        self.bob_height = height;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of point `i` at time `t`.
    pub fn position(&self, i: usize, t: f32) -> Option<Vec3> {
        let &(_, base) = self.points.get(i)?;
        let bobbed = base + Vec3::Y * (t * self.bob_rate + i as f32).sin() * self.bob_height;
        let angle = t * self.spin_rate;
        let rotation = match self.spin {
            Spin::Y => Quat::from_rotation_y(angle),
            Spin::Z => Quat::from_rotation_z(angle),
        };
        Some(rotation * bobbed)
    }

    pub fn update(&self, scene: &mut Scene, t: f32) {
        for (i, &(id, _)) in self.points.iter().enumerate() {
            if let (Some(entity), Some(pos)) = (scene.get_mut(id), self.position(i, t)) {
                entity.pos = pos;
            }
        }
    }

    pub fn despawn(&mut self, scene: &mut Scene) {
        for (id, _) in self.points.drain(..) {
            scene.despawn(id);
        }
    }
}

/// Uniform point in the box centred on the origin with the given extents.
pub fn scatter_box(rng: &mut Rng, extents: Vec3) -> Vec3 {
    Vec3::new(rng.centered(extents.x * 0.5), rng.centered(extents.y * 0.5), rng.centered(extents.z * 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_is_bounded_and_pure() {
        let mut rng = Rng::new(5);
        let hover = Hover::new(1.0, 0.2, 0.3, &mut rng);
        for step in 0..600 {
            let t = step as f32 * 0.1;
            let (dy, roll) = hover.at(t);
            assert!(dy.abs() <= 0.03 + 1e-6);
            assert!(roll.abs() <= 0.01 + 1e-6);
            assert_eq!(hover.at(t), (dy, roll));
        }
    }

    #[test]
    fn cloud_positions_do_not_drift() {
        let mut ctx = PageContext::default();
        let cloud = PointCloud::spawn(&mut ctx, "p", vec![(Vec3::new(1.0, 0.0, 0.0), Color::WHITE)], 0.03, 0.8)
            .with_spin(Spin::Y, 0.05)
            .with_bob(1.0, 0.12);

        let period = std::f32::consts::TAU;
        let a = cloud.position(0, 0.0).unwrap();
        // Bob period is 2π; spin has moved on, but height has returned.
        let b = cloud.position(0, period).unwrap();
        assert!((a.y - b.y).abs() < 1e-4);
        assert_eq!(cloud.position(1, 0.0), None);
    }

    #[test]
    fn cloud_update_moves_entities() {
        let mut ctx = PageContext::default();
        let cloud = PointCloud::spawn(&mut ctx, "p", vec![(Vec3::new(0.0, 1.0, 0.0), Color::WHITE)], 0.03, 0.8)
            .with_spin(Spin::Z, std::f32::consts::FRAC_PI_2);
        cloud.update(&mut ctx.scene, 1.0);
        let pos = ctx.scene.find_by_tag("p").unwrap().pos;
        assert!((pos - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn scatter_stays_in_box() {
        let mut rng = Rng::new(9);
        for _ in 0..100 {
            let p = scatter_box(&mut rng, Vec3::new(10.0, 8.0, 4.0));
            assert!(p.x.abs() <= 5.0 && p.y.abs() <= 4.0 && p.z.abs() <= 2.0);
        }
    }
}
