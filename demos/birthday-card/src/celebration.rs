//! Celebration splash shown between a correct answer and the birthday page.
//!
//! Activation starts confetti, firework bursts and the headline reveal, and
//! arms a 4.5 s completion timer. The timer lives inside the sequencer, so
//! deactivating drops it and a completion can never arrive late.

use std::f32::consts::PI;

use fete_engine::{
    Color, Easing, EntityId, OneShot, OverlayComponent, PageContext, RenderContext, Tween,
    TweenState,
};
use glam::Vec2;

use crate::burst::{Burst, RINGS};
use crate::elements;

/// Time from activation to completion.
pub const SPLASH_MS: u32 = 4500;

const TAG: &str = "splash";

const BACKDROP_FADE: f32 = 0.5;
const HEADLINE_DURATION: f32 = 0.8;
const FIRST_LINE_DELAY: f32 = 0.2;
const SECOND_LINE_DELAY: f32 = 0.6;
const SUBTITLE_DELAY: f32 = 1.2;
const SUBTITLE_RISE_PX: f32 = 30.0;

const RING_STROKE: f32 = 2.0;
const RING_ALPHA: f32 = 0.3;
const SPARKLE_OUTER: f32 = 10.0;
const SPARKLE_INNER: f32 = 3.54;
const SPARKLE_COLOR: u32 = 0xffd700;

/// The splash ran its full course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complete;

#[derive(Default)]
pub struct Celebration {
    timer: Option<OneShot>,
    confetti_active: bool,
    elapsed: f32,
    burst: Option<Burst>,
    tweens: TweenState,
    overlays: Vec<EntityId>,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.burst.is_some()
    }

    pub fn confetti_active(&self) -> bool {
        self.confetti_active
    }

    /// Seconds since activation.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn burst(&self) -> Option<&Burst> {
        self.burst.as_ref()
    }

    /// Start the splash. Activating an active splash does nothing.
    pub fn activate(&mut self, ctx: &mut PageContext) {
        if self.is_active() {
            return;
        }
        let burst = Burst::generate(&mut ctx.effects.rng);
        ctx.effects.extend(burst.particles(ctx.viewport()));

        self.burst = Some(burst);
        self.confetti_active = true;
        self.elapsed = 0.0;
        self.timer = Some(OneShot::from_millis(SPLASH_MS));
        self.spawn_headline(ctx);
        log::info!("celebration: active");
    }

    /// Stop the splash, cancelling the pending completion and clearing confetti.
    pub fn deactivate(&mut self, ctx: &mut PageContext) {
        if !self.is_active() {
            return;
        }
        self.timer = None;
        self.confetti_active = false;
        self.burst = None;
        self.tweens.clear();
        ctx.effects.clear();
        for id in self.overlays.drain(..) {
            ctx.scene.despawn(id);
        }
        log::info!("celebration: inactive");
    }

    /// Advance the splash. Yields `Complete` on the single step the timer expires.
    pub fn tick(&mut self, ctx: &mut PageContext, dt: f32) -> Option<Complete> {
        if !self.is_active() {
            return None;
        }
        self.elapsed += dt;
        self.tweens.tick(dt, &mut ctx.scene);

        let timer = self.timer.as_mut()?;
        if !timer.tick(dt) {
            return None;
        }
        self.timer = None;
        log::info!("celebration: complete after {:.2}s", self.elapsed);
        Some(Complete)
    }

    fn spawn_headline(&mut self, ctx: &mut PageContext) {
        let backdrop = ctx.spawn(|e| {
            e.with_tag(TAG)
                .with_alpha(0.0)
                .with_overlay(OverlayComponent::new(elements::SPLASH))
        });
        self.tweens.add(backdrop, Tween::fade_in(BACKDROP_FADE, Easing::Linear));

        for (element, spin, delay) in [
            (elements::SPLASH_FIRST_LINE, -PI, FIRST_LINE_DELAY),
            (elements::SPLASH_SECOND_LINE, PI, SECOND_LINE_DELAY),
        ] {
            let id = ctx.spawn(|e| {
                e.with_tag(TAG)
                    .with_scale(0.0)
                    .with_rotation(spin)
                    .with_overlay(OverlayComponent::new(element))
            });
            self.tweens.add(
                id,
                Tween::scale(0.0, 1.0, HEADLINE_DURATION, Easing::BackOut).with_delay(delay),
            );
            self.tweens.add(
                id,
                Tween::rotation(spin, 0.0, HEADLINE_DURATION, Easing::BackOut).with_delay(delay),
            );
            self.overlays.push(id);
        }

        let subtitle = ctx.spawn(|e| {
            e.with_tag(TAG)
                .with_alpha(0.0)
                .with_pos(glam::Vec3::new(0.0, SUBTITLE_RISE_PX, 0.0))
                .with_overlay(OverlayComponent::new(elements::SPLASH_SUBTITLE))
        });
        self.tweens.add(
            subtitle,
            Tween::fade_in(HEADLINE_DURATION, Easing::QuadOut).with_delay(SUBTITLE_DELAY),
        );
        self.tweens.add(
            subtitle,
            Tween::position_y(SUBTITLE_RISE_PX, 0.0, HEADLINE_DURATION, Easing::QuadOut)
                .with_delay(SUBTITLE_DELAY),
        );

        self.overlays.push(backdrop);
        self.overlays.push(subtitle);
    }

    /// Glow rings around the headline and the twinkling sparkle stars.
    pub fn render(&self, ctx: &mut RenderContext) {
        let Some(burst) = &self.burst else {
            return;
        };
        let [w, h] = ctx.viewport;
        let center = Vec2::new(w, h) * 0.5;

        for ring in &RINGS {
            if let Some((radius, opacity)) = ring.pose(self.elapsed) {
                let color = Color::hex(ring.color).with_alpha(RING_ALPHA * opacity);
                ctx.vectors.stroke_circle(center, radius, RING_STROKE, color);
            }
        }

        for sparkle in &burst.sparkles {
            let Some(pose) = sparkle.pose(self.elapsed) else {
                continue;
            };
            if pose.scale <= 0.0 {
                continue;
            }
            let at = Vec2::new(sparkle.left / 100.0 * w, sparkle.top / 100.0 * h);
            ctx.vectors.fill_star(
                at,
                SPARKLE_OUTER * pose.scale,
                SPARKLE_INNER * pose.scale,
                4,
                pose.rotation,
                Color::hex(SPARKLE_COLOR).with_alpha(pose.opacity),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::CONFETTI_COUNT;

    const DT: f32 = 1.0 / 60.0;

    fn run(celebration: &mut Celebration, ctx: &mut PageContext, seconds: f32) -> usize {
        let steps = (seconds / DT).round() as usize;
        (0..steps)
            .filter(|_| celebration.tick(ctx, DT).is_some())
            .count()
    }

    #[test]
    fn completes_once_after_splash() {
        let mut ctx = PageContext::default();
        let mut celebration = Celebration::new();
        celebration.activate(&mut ctx);

        assert_eq!(run(&mut celebration, &mut ctx, 4.4), 0);
        assert_eq!(run(&mut celebration, &mut ctx, 0.1), 1);
        assert_eq!(run(&mut celebration, &mut ctx, 5.0), 0);
    }

    #[test]
    fn deactivating_cancels_completion() {
        let mut ctx = PageContext::default();
        let mut celebration = Celebration::new();
        celebration.activate(&mut ctx);
        run(&mut celebration, &mut ctx, 3.0);

        celebration.deactivate(&mut ctx);
        assert!(!celebration.is_active());
        assert!(!celebration.confetti_active());
        assert!(ctx.effects.is_empty());
        assert_eq!(ctx.scene.count_tagged(TAG), 0);
        assert_eq!(run(&mut celebration, &mut ctx, 5.0), 0);
    }

    #[test]
    fn activation_starts_confetti() {
        let mut ctx = PageContext::default();
        let mut celebration = Celebration::new();
        assert!(!celebration.confetti_active());
        celebration.activate(&mut ctx);

        assert!(celebration.confetti_active());
        let burst = celebration.burst().unwrap();
        assert_eq!(burst.confetti.len(), CONFETTI_COUNT);
        assert_eq!(ctx.effects.len(), burst.confetti.len() + burst.sparks.len());
        assert_eq!(ctx.scene.count_tagged(TAG), 4);
    }

    #[test]
    fn activate_twice_keeps_the_first_timer() {
        let mut ctx = PageContext::default();
        let mut celebration = Celebration::new();
        celebration.activate(&mut ctx);
        run(&mut celebration, &mut ctx, 4.0);
        celebration.activate(&mut ctx);
        assert_eq!(run(&mut celebration, &mut ctx, 0.5), 1);
    }

    #[test]
    fn reactivation_restarts_the_full_splash() {
        let mut ctx = PageContext::default();
        let mut celebration = Celebration::new();
        celebration.activate(&mut ctx);
        run(&mut celebration, &mut ctx, 4.0);
        celebration.deactivate(&mut ctx);

        celebration.activate(&mut ctx);
        assert_eq!(run(&mut celebration, &mut ctx, 4.0), 0);
        assert_eq!(run(&mut celebration, &mut ctx, 0.5), 1);
    }

    #[test]
    fn headline_springs_into_place() {
        let mut ctx = PageContext::default();
        let mut celebration = Celebration::new();
        celebration.activate(&mut ctx);
        run(&mut celebration, &mut ctx, 2.5);

        for entity in ctx.scene.iter().filter(|e| e.tag == TAG) {
            assert!((entity.scale - 1.0).abs() < 1e-4);
            assert!(entity.rotation.abs() < 1e-4);
            assert!((entity.alpha - 1.0).abs() < 1e-4);
            assert!(entity.pos.y.abs() < 1e-4);
        }
    }

    #[test]
    fn renders_rings_and_sparkles_mid_splash() {
        let mut ctx = PageContext::default();
        let mut celebration = Celebration::new();
        celebration.activate(&mut ctx);
        run(&mut celebration, &mut ctx, 1.5);

        let mut overlays = fete_engine::OverlayBuffer::new();
        let mut vectors = fete_engine::VectorState::new();
        let mut rc = RenderContext {
            camera: &ctx.camera,
            overlays: &mut overlays,
            vectors: &mut vectors,
            viewport: ctx.viewport(),
            elapsed: celebration.elapsed(),
        };
        celebration.render(&mut rc);
        assert!(vectors.vertex_count() > 0);
    }
}
