//! Keyframed particles for celebratory effects.
//!
//! A particle is fully described at spawn: where it starts, where it ends,
//! when it starts and how long it takes. Per-frame state is just its age,
//! so every visual property is a pure function of time.

use glam::Vec2;
use crate::components::color::Color;
use crate::extensions::easing::Easing;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Outline used when drawing a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleShape {
    /// Rectangle `size` wide and `size * aspect` tall.
    Rect { aspect: f32 },
    Circle,
}

/// Opacity/scale curve over a particle's active lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// Fully opaque for the first half, then fades to zero.
    FadeOut,
    /// Opacity 0 → 1 → 0 and scale 0 → `peak_scale` → 0.
    Pulse { peak_scale: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub from: Vec2,
    pub to: Vec2,
    /// Seconds before the particle starts moving (and becomes visible).
    pub delay: f32,
    /// Seconds from start to arrival.
    pub duration: f32,
    pub easing: Easing,
    /// Total rotation over the lifetime, in radians.
    pub spin: f32,
    pub size: f32,
    pub color: Color,
    pub shape: ParticleShape,
    pub envelope: Envelope,
    age: f32,
}

impl Particle {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration,
            easing: Easing::Linear,
            spin: 0.0,
            size: 6.0,
            color: Color::WHITE,
            shape: ParticleShape::Circle,
            envelope: Envelope::FadeOut,
            age: 0.0,
        }
    }

    // -- Builder pattern --

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Advance by `dt`. Returns false once the particle has finished.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.age += dt.max(0.0);
        self.age < self.delay + self.duration
    }

    /// Normalized progress, or `None` while still waiting out the delay.
    pub fn progress(&self) -> Option<f32> {
        if self.age < self.delay {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(((self.age - self.delay) / self.duration).clamp(0.0, 1.0))
    }

    pub fn position(&self) -> Vec2 {
        let t = self.progress().unwrap_or(0.0);
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn rotation(&self) -> f32 {
        self.spin * self.progress().unwrap_or(0.0)
    }

    pub fn opacity(&self) -> f32 {
        let Some(t) = self.progress() else {
            return 0.0;
        };
        match self.envelope {
            Envelope::FadeOut => {
                if t < 0.5 {
                    1.0
                } else {
                    (2.0 - 2.0 * t).max(0.0)
                }
            }
            Envelope::Pulse { .. } => triangle(t),
        }
    }

    pub fn scale(&self) -> f32 {
        match (self.envelope, self.progress()) {
            (_, None) => 0.0,
            (Envelope::FadeOut, Some(_)) => 1.0,
            (Envelope::Pulse { peak_scale }, Some(t)) => peak_scale * triangle(t),
        }
    }

    /// Tessellate the particle at its current state.
    #[cfg(feature = "vectors")]
    pub fn draw(&self, vectors: &mut VectorState) {
        let alpha = self.opacity();
        let size = self.size * self.scale();
        if alpha <= 0.0 || size <= 0.0 {
            return;
        }
        let color = self.color.with_alpha(self.color.a * alpha);
        let center = self.position();
        match self.shape {
            ParticleShape::Rect { aspect } => {
                vectors.fill_quad(center, Vec2::new(size, size * aspect), self.rotation(), color);
            }
            ParticleShape::Circle => vectors.fill_circle(center, size * 0.5, color),
        }
    }
}

/// 0 → 1 → 0 over [0, 1].
fn triangle(t: f32) -> f32 {
    1.0 - (2.0 * t - 1.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_delay_elapses() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(0.0, 100.0), 2.0).with_delay(0.5);
        assert!(p.tick(0.25));
        assert_eq!(p.progress(), None);
        assert_eq!(p.opacity(), 0.0);
        assert!(p.tick(0.5));
        assert!(p.progress().unwrap() > 0.0);
    }

    #[test]
    fn moves_linearly_by_default() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(0.0, 100.0), 2.0).with_spin(2.0);
        p.tick(1.0);
        assert!((p.position().y - 50.0).abs() < 1e-4);
        assert!((p.rotation() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn expires_after_delay_plus_duration() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ONE, 1.0).with_delay(0.5);
        assert!(p.tick(1.4));
        assert!(!p.tick(0.2));
    }

    #[test]
    fn fade_out_holds_then_fades() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ONE, 1.0);
        p.tick(0.25);
        assert_eq!(p.opacity(), 1.0);
        p.tick(0.5);
        assert!((p.opacity() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn pulse_peaks_mid_flight() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ONE, 1.2)
            .with_envelope(Envelope::Pulse { peak_scale: 1.5 });
        p.tick(0.6);
        assert!((p.opacity() - 1.0).abs() < 1e-5);
        assert!((p.scale() - 1.5).abs() < 1e-5);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn draws_only_while_visible() {
        let mut vectors = VectorState::new();
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(0.0, 50.0), 1.0)
            .with_delay(1.0)
            .with_shape(ParticleShape::Rect { aspect: 0.6 });
        p.draw(&mut vectors);
        assert_eq!(vectors.vertex_count(), 0);
        p.tick(1.2);
        p.draw(&mut vectors);
        assert_eq!(vectors.vertex_count(), 6);
    }
}
