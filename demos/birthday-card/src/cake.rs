//! Hero scene of the birthday page: a three-tier cake with candles, floating
//! hearts and a glowing particle field.

use fete_engine::{
    Color, EntityId, MeshComponent, OverlayComponent, PageContext, PerspectiveCamera, Primitive,
    Rng, Scene,
};
use glam::{Quat, Vec2, Vec3};

use crate::elements;
use crate::motion::{scatter_box, Hover, PointCloud, Spin};

const TAG: &str = "cake";

/// The hero canvas covers this share of the viewport height.
pub const HERO_FRACTION: f32 = 0.6;

const CAMERA_DISTANCE: f32 = 7.0;
const CAMERA_FOV: f32 = 50.0;

const GROUP_ORIGIN: Vec3 = Vec3::new(0.0, -1.5, 0.0);
const SWAY_RATE: f32 = 0.3;
const SWAY: f32 = 0.15;

/// (radius, height, centre y, color) from the bottom tier up.
const TIERS: [(f32, f32, f32, u32); 3] = [
    (1.2, 0.8, 0.0, 0xff85a2),
    (0.9, 0.6, 0.7, 0xffb6c1),
    (0.6, 0.5, 1.25, 0xff69b4),
];

const DRIP_COUNT: usize = 6;
const DRIP_RING: f32 = 1.2;
const DRIP_TOP: f32 = 0.2;
const DRIP_JITTER: f32 = 0.3;

const CANDLE_XS: [f32; 3] = [-0.3, 0.0, 0.3];
const CANDLE_Y: f32 = 1.75;
const FLAME_LIFT: f32 = 0.3;

pub const HEART_COUNT: usize = 12;
const HEART_BOB: f32 = 0.5;
const HEART_SWAY: f32 = 0.3;

pub const GLOW_COUNT: usize = 50;
const GLOW_DRIFT: f32 = 0.36;

/// Anchor of the headline above the cake.
const TITLE_ANCHOR: Vec3 = Vec3::new(0.0, 1.5, 0.0);

struct Heart {
    id: EntityId,
    base: Vec3,
    speed: f32,
    offset: f32,
}

impl Heart {
    fn pose(&self, t: f32) -> (Vec3, f32) {
        let y = self.base.y + (t * self.speed + self.offset).sin() * HEART_BOB;
        let roll = (t * 0.5 + self.offset).sin() * HEART_SWAY;
        (Vec3::new(self.base.x, y, self.base.z), roll)
    }
}

pub struct CakeScene {
    /// Cake parts with their offsets inside the swaying group.
    parts: Vec<(EntityId, Vec3)>,
    hover: Hover,
    hearts: Vec<Heart>,
    glow: PointCloud,
    title: EntityId,
    title_hover: Hover,
}

impl CakeScene {
    pub fn camera(viewport: [f32; 2]) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::looking_at_origin(CAMERA_DISTANCE, CAMERA_FOV);
        camera.resize(viewport[0], viewport[1] * HERO_FRACTION);
        camera
    }

    pub fn spawn(ctx: &mut PageContext) -> Self {
        let mut rng = ctx.effects.rng.fork();
        let mut parts = Vec::new();

        for (radius, height, y, color) in TIERS {
            let mesh = MeshComponent::new(Primitive::Cylinder { radius, height }, Color::hex(color)).with_shininess(0.5);
            parts.push((spawn_mesh(ctx, mesh), Vec3::new(0.0, y, 0.0)));
        }

        // Drip heights are jittered once here, never per frame.
        for i in 0..DRIP_COUNT {
            let angle = (i as f32 * 60.0).to_radians();
            let offset = Vec3::new(
                angle.cos() * DRIP_RING,
                DRIP_TOP - rng.range(0.0, DRIP_JITTER),
                angle.sin() * DRIP_RING,
            );
            let mesh = MeshComponent::new(Primitive::Sphere { radius: 0.12 }, Color::hex(0xffd700)).with_shininess(0.7);
            parts.push((spawn_mesh(ctx, mesh), offset));
        }

        for (i, x) in CANDLE_XS.into_iter().enumerate() {
            let wax = if i == 1 { 0xffd700 } else { 0xff69b4 };
            let candle = MeshComponent::new(Primitive::Cylinder { radius: 0.04, height: 0.4 }, Color::hex(wax));
            parts.push((spawn_mesh(ctx, candle), Vec3::new(x, CANDLE_Y, 0.0)));

            let flame = MeshComponent::new(Primitive::Sphere { radius: 0.06 }, Color::hex(0xffd700)).with_emissive(2.0);
            parts.push((spawn_mesh(ctx, flame), Vec3::new(x, CANDLE_Y + FLAME_LIFT, 0.0)));
        }

        let hearts = (0..HEART_COUNT).map(|i| spawn_heart(ctx, &mut rng, i)).collect();

        let glow_bases = (0..GLOW_COUNT)
            .map(|_| (scatter_box(&mut rng, Vec3::new(12.0, 10.0, 8.0)), Color::hex(0xffd700)))
            .collect();
        let glow = PointCloud::spawn(ctx, TAG, glow_bases, 0.04, 0.7)
            .with_spin(Spin::Y, 0.02)
            .with_bob(0.5, GLOW_DRIFT);

        let title = ctx.spawn(|e| e.with_tag(TAG).with_overlay(OverlayComponent::new(elements::HERO_TITLE)));

        log::debug!("cake scene: {} parts, {} hearts, {} glow", parts.len(), HEART_COUNT, glow.len());
        Self {
            parts,
            hover: Hover::new(1.0, 0.2, 0.3, &mut rng),
            hearts,
            glow,
            title,
            title_hover: Hover::new(2.0, 0.1, 0.3, &mut rng),
        }
    }

    /// World position of a cake part offset at time `t`.
    fn place(&self, offset: Vec3, t: f32) -> (Vec3, f32) {
        let (lift, roll) = self.hover.at(t);
        let yaw = (t * SWAY_RATE).sin() * SWAY;
        let pos = GROUP_ORIGIN + Vec3::Y * lift + Quat::from_rotation_y(yaw) * offset;
        (pos, roll)
    }

    /// Headline offset in CSS pixels from the hero centre, and its roll.
    pub fn title_offset(&self, camera: &PerspectiveCamera, viewport: [f32; 2], t: f32) -> Option<(Vec2, f32)> {
        let (lift, roll) = self.title_hover.at(t);
        let projected = camera.project(TITLE_ANCHOR + Vec3::Y * lift)?;
        let half = Vec2::new(viewport[0], viewport[1] * HERO_FRACTION) * 0.5;
        Some((Vec2::new(projected.ndc.x * half.x, -projected.ndc.y * half.y), roll))
    }

    pub fn update(&self, scene: &mut Scene, camera: &PerspectiveCamera, viewport: [f32; 2], t: f32) {
        for &(id, offset) in &self.parts {
            let (pos, roll) = self.place(offset, t);
            if let Some(entity) = scene.get_mut(id) {
                entity.pos = pos;
                entity.rotation = roll;
            }
        }
        for heart in &self.hearts {
            let (pos, roll) = heart.pose(t);
            if let Some(entity) = scene.get_mut(heart.id) {
                entity.pos = pos;
                entity.rotation = roll;
            }
        }
        self.glow.update(scene, t);

        if let (Some((offset, roll)), Some(entity)) =
            (self.title_offset(camera, viewport, t), scene.get_mut(self.title))
        {
            entity.pos = offset.extend(0.0);
            entity.rotation = roll;
        }
    }

    pub fn despawn(mut self, scene: &mut Scene) {
        for (id, _) in self.parts.drain(..) {
            scene.despawn(id);
        }
        for heart in self.hearts.drain(..) {
            scene.despawn(heart.id);
        }
        self.glow.despawn(scene);
        scene.despawn(self.title);
    }
}

fn spawn_mesh(ctx: &mut PageContext, mesh: MeshComponent) -> EntityId {
    ctx.spawn(|e| e.with_tag(TAG).with_mesh(mesh))
}

fn spawn_heart(ctx: &mut PageContext, rng: &mut Rng, i: usize) -> Heart {
    let base = Vec3::new(rng.centered(5.0), rng.centered(4.0), -2.0 - rng.range(0.0, 5.0));
    let scale = rng.range(0.1, 0.3);
    let color = if i % 2 == 0 { 0xff69b4 } else { 0xff1493 };
    let mesh = MeshComponent::new(Primitive::Sphere { radius: 0.5 }, Color::hex(color))
        .with_shininess(0.6)
        .with_distort(0.4);
    let id = ctx.spawn(|e| e.with_tag(TAG).with_pos(base).with_scale(scale).with_mesh(mesh));
    Heart {
        id,
        base,
        speed: rng.range(0.3, 0.8),
        offset: rng.range(0.0, std::f32::consts::TAU),
    }
}
