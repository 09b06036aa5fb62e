// extensions/easing.rs
//
// Easing curves for reveals, bursts and floating motion.
// Pure math; nothing here touches Entity or Scene.

use std::f32::consts::PI;

use glam::Vec3;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end. The burst and spark default.
    QuadOut,
    QuadInOut,
    /// Stronger slow end, used for ring expansion.
    CubicOut,
    /// Smooth both ends, used for floats and sways.
    SineInOut,
    /// Overshoot then settle. Springy text and card reveals.
    BackOut,
    /// Elastic spring.
    ElasticOut,
}

impl Easing {
    /// Apply the curve to a normalized time `t` in [0, 1].
    /// Back and Elastic can leave [0, 1] mid-curve.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),

            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }

            Easing::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicOut,
        Easing::SineInOut,
        Easing::BackOut,
        Easing::ElasticOut,
    ];

    #[test]
    fn every_curve_hits_its_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-5, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{:?} at 1", easing);
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::QuadOut.apply(-2.0), 0.0);
        assert_eq!(Easing::QuadOut.apply(3.0), 1.0);
    }

    #[test]
    fn quad_out_faster_start() {
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn back_overshoots() {
        let peak = (1..20).map(|i| Easing::BackOut.apply(i as f32 / 20.0)).fold(0.0, f32::max);
        assert!(peak > 1.0, "BackOut should overshoot");
    }

    #[test]
    fn ease_vec3_interpolates() {
        let v = ease_vec3(Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0), 0.5, Easing::Linear);
        assert!((v - Vec3::new(1.0, 2.0, -3.0)).length() < 1e-5);
        assert!((ease(100.0, 200.0, 0.5, Easing::Linear) - 150.0).abs() < 0.001);
    }
}
