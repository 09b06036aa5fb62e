//! Balloon scene behind the quiz gate.

use fete_engine::{Color, EntityId, MeshComponent, PageContext, Primitive, Rng, Scene};
use glam::Vec3;

use crate::motion::{scatter_box, Hover, PointCloud, Spin};

const TAG: &str = "balloons";

/// One authored balloon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalloonConfig {
    pub position: [f32; 3],
    pub color: u32,
    pub scale: f32,
    pub speed: f32,
}

const fn balloon(position: [f32; 3], color: u32, scale: f32, speed: f32) -> BalloonConfig {
    BalloonConfig { position, color, scale, speed }
}

pub const BALLOONS: [BalloonConfig; 12] = [
    balloon([-3.0, 2.0, -2.0], 0xff69b4, 1.1, 0.8),
    balloon([2.5, 1.0, -1.0], 0xff1493, 0.9, 1.2),
    balloon([-1.0, 3.0, -3.0], 0xffd700, 1.3, 0.6),
    balloon([3.5, 2.5, -2.0], 0xff85a2, 1.0, 1.0),
    balloon([0.0, 1.5, -1.0], 0xffb6c1, 0.8, 1.4),
    balloon([-2.5, 0.0, -2.0], 0xff4081, 1.2, 0.9),
    balloon([1.0, 3.5, -3.0], 0xffc107, 1.0, 0.7),
    balloon([-4.0, 1.0, -4.0], 0xe91e63, 0.7, 1.1),
    balloon([4.0, 0.0, -3.0], 0xff69b4, 0.85, 1.3),
    balloon([0.0, -1.0, -2.0], 0xffd700, 1.1, 0.5),
    balloon([-1.5, -2.0, -1.0], 0xff85a2, 0.75, 1.0),
    balloon([2.0, -1.5, -2.0], 0xff1493, 0.95, 0.8),
];

const BALLOON_RADIUS: f32 = 0.6;
const BOB_HEIGHT: f32 = 0.5;
const SWAY: f32 = 0.1;
const KNOT_DROP: f32 = 0.65;
const STRING_DROP: f32 = 1.2;

pub const SPARKLE_COUNT: usize = 60;
const SPARKLE_COLORS: [u32; 4] = [0xff69b4, 0xffd700, 0xff1493, 0xffffff];
const SPARKLE_DRIFT: f32 = 0.12;
pub const STAR_COUNT: usize = 150;

struct Balloon {
    config: BalloonConfig,
    phase: f32,
    hover: Hover,
    body: EntityId,
    knot: EntityId,
    string: EntityId,
}

/// Pose of a balloon body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalloonPose {
    pub center: Vec3,
    pub roll: f32,
}

impl Balloon {
    fn pose(&self, t: f32) -> BalloonPose {
        let [x, y, z] = self.config.position;
        let (hover_y, hover_roll) = self.hover.at(t);
        let bob = (t * self.config.speed + self.phase).sin() * BOB_HEIGHT;
        BalloonPose {
            center: Vec3::new(x, y + bob + hover_y, z),
            roll: (t * 0.5 + self.phase).sin() * SWAY + hover_roll,
        }
    }
}

/// Twelve bobbing balloons over a slowly turning field of sparkles and stars.
pub struct BalloonScene {
    balloons: Vec<Balloon>,
    sparkles: PointCloud,
    stars: PointCloud,
}

impl BalloonScene {
    pub fn spawn(ctx: &mut PageContext) -> Self {
        let mut rng = ctx.effects.rng.fork();

        let balloons = BALLOONS
            .iter()
            .map(|&config| spawn_balloon(ctx, config, &mut rng))
            .collect();

        let sparkle_bases = (0..SPARKLE_COUNT)
            .map(|_| {
                let pos = scatter_box(&mut rng, Vec3::new(15.0, 15.0, 10.0));
                let color = SPARKLE_COLORS[rng.next_int(SPARKLE_COLORS.len() as u32) as usize];
                (pos, Color::hex(color))
            })
            .collect();
        let sparkles = PointCloud::spawn(ctx, TAG, sparkle_bases, 0.03, 0.8)
            .with_spin(Spin::Y, 0.05)
            .with_bob(1.0, SPARKLE_DRIFT);

        let star_bases = (0..STAR_COUNT)
            .map(|_| {
                let pos = Vec3::new(rng.centered(15.0), rng.centered(15.0), -5.0 - rng.range(0.0, 15.0));
                (pos, Color::hex(0xffd700))
            })
            .collect();
        let stars = PointCloud::spawn(ctx, TAG, star_bases, 0.015, 0.6).with_spin(Spin::Z, 0.01);

        log::debug!(
            "balloon scene: {} balloons, {} sparkles, {} stars",
            BALLOONS.len(),
            sparkles.len(),
            stars.len()
        );
        Self { balloons, sparkles, stars }
    }

    pub fn balloon_pose(&self, i: usize, t: f32) -> Option<BalloonPose> {
        self.balloons.get(i).map(|b| b.pose(t))
    }

    pub fn update(&self, scene: &mut Scene, t: f32) {
        for balloon in &self.balloons {
            let pose = balloon.pose(t);
            let scale = balloon.config.scale;
            let parts = [
                (balloon.body, 0.0, pose.roll),
                (balloon.knot, KNOT_DROP * scale, pose.roll),
                (balloon.string, STRING_DROP * scale, 0.0),
            ];
            for (id, drop, roll) in parts {
                if let Some(entity) = scene.get_mut(id) {
                    entity.pos = pose.center - Vec3::Y * drop;
                    entity.rotation = roll;
                }
            }
        }
        self.sparkles.update(scene, t);
        self.stars.update(scene, t);
    }

    pub fn despawn(mut self, scene: &mut Scene) {
        for balloon in self.balloons.drain(..) {
            for id in [balloon.body, balloon.knot, balloon.string] {
                scene.despawn(id);
            }
        }
        self.sparkles.despawn(scene);
        self.stars.despawn(scene);
    }
}

fn spawn_balloon(ctx: &mut PageContext, config: BalloonConfig, rng: &mut Rng) -> Balloon {
    let color = Color::hex(config.color);
    let scale = config.scale;
    let [x, y, z] = config.position;
    let at = Vec3::new(x, y, z);

    let body = ctx.spawn(|e| {
        e.with_tag(TAG).with_pos(at).with_scale(scale).with_mesh(
            MeshComponent::new(Primitive::Sphere { radius: BALLOON_RADIUS }, color)
                .with_shininess(0.8)
                .with_distort(0.15),
        )
    });
    let knot = ctx.spawn(|e| {
        e.with_tag(TAG)
            .with_pos(at - Vec3::Y * KNOT_DROP * scale)
            .with_scale(scale * 0.15)
            .with_mesh(MeshComponent::new(Primitive::Cone { radius: 0.5, height: 1.0 }, color))
    });
    let string = ctx.spawn(|e| {
        e.with_tag(TAG)
            .with_pos(at - Vec3::Y * STRING_DROP * scale)
            .with_alpha(0.6)
            .with_mesh(MeshComponent::new(
                Primitive::Cylinder { radius: 0.008, height: 1.5 * scale },
                Color::WHITE,
            ))
    });

    Balloon {
        config,
        phase: rng.range(0.0, std::f32::consts::TAU),
        hover: Hover::new(config.speed, 0.3, 0.5, rng),
        body,
        knot,
        string,
    }
}
