//! Decorative parameters for the celebration splash.
//!
//! Every random value is drawn once per activation from a seeded `Rng`.
//! Animation afterwards is a function of elapsed time only.

use fete_engine::{Color, Easing, Envelope, Particle, ParticleShape, Rng};
use glam::Vec2;

pub const CONFETTI_COUNT: usize = 80;

pub const CONFETTI_PALETTE: [u32; 8] = [
    0xff69b4, 0xffd700, 0xff1493, 0xff85a2, 0xffc107, 0xe91e63, 0xffb6c1, 0xff4081,
];

pub const FIREWORK_PALETTE: [u32; 5] = [0xff69b4, 0xffd700, 0xff1493, 0xff85a2, 0xffc107];

/// Burst centres as (x %, y %, delay s).
pub const FIREWORKS: [(f32, f32, f32); 5] = [
    (20.0, 25.0, 0.3),
    (80.0, 20.0, 0.6),
    (50.0, 15.0, 0.9),
    (15.0, 50.0, 1.2),
    (85.0, 45.0, 1.5),
];

pub const SPARKS_PER_BURST: usize = 12;
const SPARK_SIZE: f32 = 6.0;
const SPARK_DURATION: f32 = 1.2;
const SPARK_PEAK_SCALE: f32 = 1.5;

pub const SPARKLE_COUNT: usize = 8;
const SPARKLE_DURATION: f32 = 1.5;
const SPARKLE_REST: f32 = 1.0;

/// Confetti enters just above the viewport and leaves below it.
const CONFETTI_START_Y: f32 = -20.0;
const CONFETTI_END_FRACTION: f32 = 1.1;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal start, percent of viewport width.
    pub x: f32,
    pub color: Color,
    pub delay: f32,
    /// Degrees; the piece spins through three times this while falling.
    pub rotation: f32,
    /// Width in pixels; height is 60% of it.
    pub size: f32,
    pub duration: f32,
}

impl ConfettiPiece {
    fn generate(rng: &mut Rng) -> Self {
        Self {
            x: rng.range(0.0, 100.0),
            color: Color::hex(CONFETTI_PALETTE[rng.next_int(CONFETTI_PALETTE.len() as u32) as usize]),
            delay: rng.range(0.0, 0.8),
            rotation: rng.range(0.0, 360.0),
            size: rng.range(6.0, 16.0),
            duration: rng.range(2.0, 4.0),
        }
    }

    /// Large pieces are drawn round.
    pub fn is_round(&self) -> bool {
        self.size > 10.0
    }

    pub fn particle(&self, viewport: [f32; 2]) -> Particle {
        let x = self.x / 100.0 * viewport[0];
        let shape = if self.is_round() {
            ParticleShape::Circle
        } else {
            ParticleShape::Rect { aspect: 0.6 }
        };
        Particle::new(
            Vec2::new(x, CONFETTI_START_Y),
            Vec2::new(x, viewport[1] * CONFETTI_END_FRACTION),
            self.duration,
        )
        .with_delay(self.delay)
        .with_spin((self.rotation * 3.0).to_radians())
        .with_size(self.size)
        .with_color(self.color)
        .with_shape(shape)
        .with_envelope(Envelope::FadeOut)
    }
}

/// One spark of a firework burst.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub burst: usize,
    /// Travel from the burst centre, in pixels.
    pub offset: Vec2,
    pub color: Color,
}

impl Spark {
    pub fn particle(&self, viewport: [f32; 2]) -> Particle {
        let (x, y, delay) = FIREWORKS[self.burst % FIREWORKS.len()];
        let origin = Vec2::new(x / 100.0 * viewport[0], y / 100.0 * viewport[1]);
        Particle::new(origin, origin + self.offset, SPARK_DURATION)
            .with_delay(delay)
            .with_easing(Easing::QuadOut)
            .with_size(SPARK_SIZE)
            .with_color(self.color)
            .with_shape(ParticleShape::Circle)
            .with_envelope(Envelope::Pulse { peak_scale: SPARK_PEAK_SCALE })
    }
}

/// Twinkling star around the headline, repeating forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    /// Percent of viewport width.
    pub left: f32,
    /// Percent of viewport height.
    pub top: f32,
    pub delay: f32,
}

/// Visual state of a sparkle at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparklePose {
    pub opacity: f32,
    pub scale: f32,
    /// Radians.
    pub rotation: f32,
}

impl Sparkle {
    /// `None` before the first cycle and during the rest between cycles.
    pub fn pose(&self, t: f32) -> Option<SparklePose> {
        let local = t - self.delay;
        if local < 0.0 {
            return None;
        }
        let phase = local % (SPARKLE_DURATION + SPARKLE_REST);
        if phase > SPARKLE_DURATION {
            return None;
        }
        let p = phase / SPARKLE_DURATION;
        let peak = 1.0 - (2.0 * p - 1.0).abs();
        Some(SparklePose {
            opacity: peak,
            scale: peak,
            rotation: p * std::f32::consts::TAU,
        })
    }
}

/// Expanding glow ring behind the headline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub mid_diameter: f32,
    pub end_diameter: f32,
    pub delay: f32,
    pub duration: f32,
    pub color: u32,
}

pub const RINGS: [Ring; 2] = [
    Ring { mid_diameter: 400.0, end_diameter: 600.0, delay: 0.5, duration: 2.0, color: 0xff69b4 },
    Ring { mid_diameter: 300.0, end_diameter: 500.0, delay: 0.8, duration: 2.0, color: 0xffd700 },
];

const RING_PEAK_OPACITY: f32 = 0.5;

impl Ring {
    /// (radius px, opacity) while the ring is animating.
    pub fn pose(&self, t: f32) -> Option<(f32, f32)> {
        let local = t - self.delay;
        if local < 0.0 || local > self.duration {
            return None;
        }
        let e = Easing::QuadOut.apply(local / self.duration);
        let diameter = if e < 0.5 {
            self.mid_diameter * e * 2.0
        } else {
            self.mid_diameter + (self.end_diameter - self.mid_diameter) * (e - 0.5) * 2.0
        };
        let opacity = RING_PEAK_OPACITY * (1.0 - (2.0 * e - 1.0).abs());
        Some((diameter * 0.5, opacity))
    }
}

/// Everything the splash scatters, generated together.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub confetti: Vec<ConfettiPiece>,
    pub sparks: Vec<Spark>,
    pub sparkles: Vec<Sparkle>,
}

impl Burst {
    pub fn generate(rng: &mut Rng) -> Self {
        let confetti = (0..CONFETTI_COUNT).map(|_| ConfettiPiece::generate(rng)).collect();

        let mut sparks = Vec::with_capacity(FIREWORKS.len() * SPARKS_PER_BURST);
        for burst in 0..FIREWORKS.len() {
            for i in 0..SPARKS_PER_BURST {
                let angle = i as f32 / SPARKS_PER_BURST as f32 * std::f32::consts::TAU;
                let distance = rng.range(60.0, 100.0);
                let color = FIREWORK_PALETTE[rng.next_int(FIREWORK_PALETTE.len() as u32) as usize];
                sparks.push(Spark {
                    burst,
                    offset: Vec2::from_angle(angle) * distance,
                    color: Color::hex(color),
                });
            }
        }

        let sparkles = (0..SPARKLE_COUNT)
            .map(|i| Sparkle {
                left: rng.range(20.0, 80.0),
                top: rng.range(20.0, 80.0),
                delay: 0.5 + i as f32 * 0.2,
            })
            .collect();

        log::debug!("burst: {} confetti, {} sparks", CONFETTI_COUNT, sparks.len());
        Self { confetti, sparks, sparkles }
    }

    /// Confetti then firework sparks as engine particles for this viewport.
    pub fn particles(&self, viewport: [f32; 2]) -> Vec<Particle> {
        self.confetti
            .iter()
            .map(|c| c.particle(viewport))
            .chain(self.sparks.iter().map(|s| s.particle(viewport)))
            .collect()
    }
}
