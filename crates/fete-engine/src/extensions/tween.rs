// extensions/tween.rs
//
// Delayed, eased property animation keyed by EntityId.
// Drives reveals (text springs in, cards fade up) without the page
// tracking per-entity clocks.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(id, Tween::scale(0.0, 1.0, 0.6, Easing::BackOut).with_delay(0.2));
//   tweens.tick(dt, &mut ctx.scene);

use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use super::easing::{Easing, ease, ease_vec3};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    Position { from: Vec3, to: Vec3 },
    PositionY { from: f32, to: f32 },
    Rotation { from: f32, to: f32 },
    Scale { from: f32, to: f32 },
    Alpha { from: f32, to: f32 },
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    /// Seconds to hold at the start value before moving.
    pub delay: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    fn with_target(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            delay: 0.0,
            elapsed: 0.0,
            easing,
        }
    }

    pub fn position(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Position { from, to }, duration, easing)
    }

    pub fn position_y(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::PositionY { from, to }, duration, easing)
    }

    pub fn rotation(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Rotation { from, to }, duration, easing)
    }

    pub fn scale(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Scale { from, to }, duration, easing)
    }

    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::with_target(TweenTarget::Alpha { from, to }, duration, easing)
    }

    pub fn fade_in(duration: f32, easing: Easing) -> Self {
        Self::alpha(0.0, 1.0, duration, easing)
    }

    // -- Builder methods --

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Normalized progress [0, 1], zero while delayed.
    pub fn progress(&self) -> f32 {
        let moving = (self.elapsed - self.delay).max(0.0);
        if self.duration <= 0.0 {
            if self.elapsed >= self.delay { 1.0 } else { 0.0 }
        } else {
            (moving / self.duration).clamp(0.0, 1.0)
        }
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

/// Tweens in flight, applied in insertion order.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: Vec<(EntityId, Tween)>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) {
        self.tweens.push((entity, tween));
    }

    /// Advance all tweens and apply them to scene entities. Finished tweens
    /// write their end value once and are dropped.
    /// Returns the number of tweens that finished this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let before = self.tweens.len();

        self.tweens.retain_mut(|(entity_id, tween)| {
            tween.elapsed += dt.max(0.0);
            let t = tween.progress();

            if let Some(entity) = scene.get_mut(*entity_id) {
                match tween.target {
                    TweenTarget::Position { from, to } => {
                        entity.pos = ease_vec3(from, to, t, tween.easing);
                    }
                    TweenTarget::PositionY { from, to } => {
                        entity.pos.y = ease(from, to, t, tween.easing);
                    }
                    TweenTarget::Rotation { from, to } => {
                        entity.rotation = ease(from, to, t, tween.easing);
                    }
                    TweenTarget::Scale { from, to } => {
                        entity.scale = ease(from, to, t, tween.easing);
                    }
                    TweenTarget::Alpha { from, to } => {
                        entity.alpha = ease(from, to, t, tween.easing).clamp(0.0, 1.0);
                    }
                }
            }

            !tween.finished()
        });

        before - self.tweens.len()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    fn scene_with(id: EntityId) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(id));
        scene
    }

    #[test]
    fn tween_position() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::position(Vec3::ZERO, Vec3::new(100.0, 0.0, -4.0), 1.0, Easing::Linear));

        tweens.tick(0.5, &mut scene);
        let e = scene.get(id).unwrap();
        assert!((e.pos.x - 50.0).abs() < 0.01);
        assert!((e.pos.z + 2.0).abs() < 0.01);

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 100.0).abs() < 0.01);
        assert!(tweens.is_empty());
    }

    #[test]
    fn delay_holds_the_start_value() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::scale(0.0, 1.0, 1.0, Easing::Linear).with_delay(0.6));

        tweens.tick(0.5, &mut scene);
        assert_eq!(scene.get(id).unwrap().scale, 0.0);

        tweens.tick(0.6, &mut scene);
        assert!((scene.get(id).unwrap().scale - 0.5).abs() < 0.01);
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn finished_tween_lands_on_target_and_drops() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::fade_in(0.5, Easing::QuadOut));
        tweens.add(id, Tween::rotation(1.0, 0.0, 2.0, Easing::Linear));

        assert_eq!(tweens.tick(1.0, &mut scene), 1);
        assert_eq!(scene.get(id).unwrap().alpha, 1.0);
        assert_eq!(tweens.len(), 1);
        assert_eq!(tweens.tick(1.0, &mut scene), 1);
        assert_eq!(scene.get(id).unwrap().rotation, 0.0);
    }

    #[test]
    fn later_tween_wins_on_shared_property() {
        let id = EntityId(1);
        let mut scene = scene_with(id);
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::position(Vec3::ZERO, Vec3::new(0.0, 8.0, 0.0), 1.0, Easing::Linear));
        tweens.add(id, Tween::position_y(20.0, 0.0, 1.0, Easing::Linear));

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.y - 10.0).abs() < 0.01);
    }

    #[test]
    fn missing_entity_still_expires() {
        let mut scene = Scene::new();
        let mut tweens = TweenState::new();
        tweens.add(EntityId(7), Tween::alpha(0.0, 1.0, 0.2, Easing::Linear));
        tweens.tick(0.3, &mut scene);
        assert!(tweens.is_empty());
    }
}
