//! Deterministic placement of the floating hearts behind the timeline.
//!
//! Each placement is an affine-modulo function of its index, so positions are
//! identical on every call and never shift between renders.

use serde::Serialize;

/// Default number of background hearts.
pub const DECOR_COUNT: usize = 20;

/// Vertical drift amplitude in pixels and the opacity range of the pulse.
const DRIFT_PX: f32 = 10.0;
const MIN_OPACITY: f32 = 0.3;
const MAX_OPACITY: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Percent of the section width.
    pub left: f32,
    /// Percent of the section height.
    pub top: f32,
    /// Seconds per drift cycle.
    pub duration: f32,
    /// Seconds before the first cycle starts.
    pub delay: f32,
}

/// Placement for index `i`, taken modulo `count`.
pub fn placement(i: usize, count: usize) -> Placement {
    let i = if count == 0 { 0 } else { (i % count) as u64 };
    let term = |a: u64, b: u64, m: u64| ((i * a + b) % m) as f32;

    Placement {
        left: term(37, 17, 100) + term(29, 11, 100) / 100.0,
        top: term(53, 23, 100) + term(31, 7, 100) / 100.0,
        duration: 3.0 + term(17, 5, 20) / 10.0,
        delay: term(11, 3, 20) / 10.0,
    }
}

/// All placements for a section with `count` hearts.
pub fn scatter(count: usize) -> Vec<Placement> {
    (0..count).map(|i| placement(i, count)).collect()
}

impl Placement {
    /// Drift offset (px) and opacity at time `t`: -10 → 10 → -10, 0.3 → 0.7 → 0.3.
    pub fn pose(&self, t: f32) -> (f32, f32) {
        let local = t - self.delay;
        if local <= 0.0 || self.duration <= 0.0 {
            return (-DRIFT_PX, MIN_OPACITY);
        }
        let phase = (local / self.duration).fract();
        // Smooth 0 → 1 → 0 over one cycle.
        let w = 0.5 - 0.5 * (phase * std::f32::consts::TAU).cos();
        (
            -DRIFT_PX + 2.0 * DRIFT_PX * w,
            MIN_OPACITY + (MAX_OPACITY - MIN_OPACITY) * w,
        )
    }
}
