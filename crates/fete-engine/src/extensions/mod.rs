// extensions/mod.rs
//
// Optional extension modules for FeteEngine.
// These are decoupled from core Entity/Scene — pages opt-in by creating these systems.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use tween::{TweenState, Tween, TweenTarget};
