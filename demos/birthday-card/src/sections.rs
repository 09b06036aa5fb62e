//! Scrolling content below the hero: photo collage, memories timeline,
//! closing card and the floating background hearts.
//!
//! The host reports each tracked element's layout box and every scroll
//! position. An element animates in once, the first time enough of it is on
//! screen, and never hides again.

use fete_engine::{Easing, EntityId, OverlayComponent, PageContext, Scene, Tween, TweenState};
use glam::Vec3;

use crate::content::Content;
use crate::decor::{self, Placement, DECOR_COUNT};
use crate::elements;

const TAG: &str = "sections";

/// Share of an element that must be visible before it reveals.
pub const HEADER_THRESHOLD: f32 = 0.0;
pub const PHOTO_GRID_THRESHOLD: f32 = 0.2;
pub const MEMORY_THRESHOLD: f32 = 0.3;

pub const PHOTO_STAGGER: f32 = 0.15;
const PHOTO_RISE_PX: f32 = 40.0;
const PHOTO_DURATION: f32 = 0.6;

const MEMORY_SLIDE_PX: f32 = 50.0;
const MEMORY_RISE_PX: f32 = 20.0;
const MEMORY_DURATION: f32 = 0.7;
const MEMORY_DELAY: f32 = 0.1;
const DOT_DURATION: f32 = 0.5;
const DOT_DELAY: f32 = 0.3;

const HEADER_RISE_PX: f32 = 30.0;
const HEADER_DURATION: f32 = 0.8;

const HINT_DELAY: f32 = 1.0;
const HINT_RISE_PX: f32 = 20.0;
const ARROW_BOB_PX: f32 = 8.0;
const ARROW_PERIOD: f32 = 1.5;

/// Fraction of `[top, top + height)` inside the viewport `[scroll, scroll + viewport)`.
pub fn visible_fraction(top: f32, height: f32, scroll: f32, viewport: f32) -> f32 {
    let overlap = (top + height).min(scroll + viewport) - top.max(scroll);
    if overlap <= 0.0 {
        return 0.0;
    }
    (overlap / height).min(1.0)
}

#[derive(Debug, Clone, Copy)]
struct Watched {
    element: u32,
    threshold: f32,
    layout: Option<(f32, f32)>,
    revealed: bool,
}

impl Watched {
    fn is_visible(&self, scroll: f32, viewport: f32) -> bool {
        let Some((top, height)) = self.layout else {
            return false;
        };
        let fraction = visible_fraction(top, height, scroll, viewport);
        if self.threshold <= 0.0 {
            fraction > 0.0
        } else {
            fraction >= self.threshold
        }
    }
}

/// Reveal-once bookkeeping for scroll-triggered entrances.
#[derive(Debug, Default)]
pub struct RevealTracker {
    watched: Vec<Watched>,
    scroll: f32,
    viewport: f32,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&mut self, element: u32, threshold: f32) {
        self.watched.push(Watched {
            element,
            threshold,
            layout: None,
            revealed: false,
        });
    }

    /// Record an element's document offset. Unknown elements are ignored.
    pub fn set_layout(&mut self, element: u32, top: f32, height: f32) -> bool {
        match self.watched.iter_mut().find(|w| w.element == element) {
            Some(watched) => {
                watched.layout = Some((top, height.max(0.0)));
                true
            }
            None => {
                log::debug!("reveal: layout for untracked element {}", element);
                false
            }
        }
    }

    pub fn set_scroll(&mut self, top: f32, viewport_height: f32) {
        self.scroll = top;
        self.viewport = viewport_height.max(0.0);
    }

    /// Elements that became visible since the last poll, in watch order.
    pub fn poll(&mut self) -> Vec<u32> {
        let (scroll, viewport) = (self.scroll, self.viewport);
        self.watched
            .iter_mut()
            .filter(|w| !w.revealed && w.is_visible(scroll, viewport))
            .map(|w| {
                w.revealed = true;
                w.element
            })
            .collect()
    }

    pub fn is_revealed(&self, element: u32) -> bool {
        self.watched.iter().any(|w| w.element == element && w.revealed)
    }
}

pub struct Sections {
    tracker: RevealTracker,
    tweens: TweenState,
    overlays: Vec<(u32, EntityId)>,
    photos: Vec<EntityId>,
    decor: Vec<(EntityId, Placement)>,
    arrow: Option<EntityId>,
    elapsed: f32,
}

impl Sections {
    pub fn spawn(ctx: &mut PageContext, content: &Content) -> Self {
        let mut sections = Self {
            tracker: RevealTracker::new(),
            tweens: TweenState::new(),
            overlays: Vec::new(),
            photos: Vec::new(),
            decor: Vec::new(),
            arrow: None,
            elapsed: 0.0,
        };

        let hint = sections.overlay(ctx, elements::SCROLL_HINT, |e| {
            e.with_alpha(0.0).with_pos(Vec3::Y * HINT_RISE_PX)
        });
        sections.tweens.add(hint, Tween::fade_in(HEADER_DURATION, Easing::QuadOut).with_delay(HINT_DELAY));
        sections.tweens.add(
            hint,
            Tween::position_y(HINT_RISE_PX, 0.0, HEADER_DURATION, Easing::QuadOut).with_delay(HINT_DELAY),
        );
        sections.arrow = Some(sections.overlay(ctx, elements::SCROLL_ARROW, |e| e));

        for element in [elements::PHOTOS_HEADER, elements::MEMORIES_HEADER] {
            sections.overlay(ctx, element, |e| e.with_alpha(0.0).with_pos(Vec3::Y * HEADER_RISE_PX));
            sections.tracker.watch(element, HEADER_THRESHOLD);
        }

        sections.tracker.watch(elements::PHOTO_GRID, PHOTO_GRID_THRESHOLD);
        for (i, photo) in content.photos.entries.iter().enumerate() {
            let rotation = photo.rotation.to_radians();
            let id = sections.overlay(ctx, elements::PHOTO_BASE + i as u32, |e| {
                e.with_alpha(0.0)
                    .with_pos(Vec3::Y * PHOTO_RISE_PX)
                    .with_scale(0.9)
                    .with_rotation(rotation)
            });
            sections.photos.push(id);
        }

        for i in 0..content.memories.entries.len() {
            let element = elements::MEMORY_BASE + i as u32;
            let from = memory_offset(i);
            sections.overlay(ctx, element, |e| e.with_alpha(0.0).with_pos(from));
            sections.overlay(ctx, elements::MEMORY_DOT_BASE + i as u32, |e| e.with_scale(0.0));
            sections.tracker.watch(element, MEMORY_THRESHOLD);
        }

        sections.overlay(ctx, elements::CLOSING, |e| e.with_alpha(0.0).with_scale(0.9));
        sections.tracker.watch(elements::CLOSING, HEADER_THRESHOLD);

        for (i, placement) in decor::scatter(DECOR_COUNT).into_iter().enumerate() {
            let id = sections.overlay(ctx, elements::DECOR_BASE + i as u32, |e| e);
            sections.decor.push((id, placement));
        }

        log::debug!(
            "sections: {} photos, {} memories, {} decor",
            content.photos.entries.len(),
            content.memories.entries.len(),
            sections.decor.len()
        );
        sections
    }

    fn overlay(
        &mut self,
        ctx: &mut PageContext,
        element: u32,
        build: impl FnOnce(fete_engine::Entity) -> fete_engine::Entity,
    ) -> EntityId {
        let id = ctx.spawn(|e| build(e.with_tag(TAG).with_overlay(OverlayComponent::new(element))));
        self.overlays.push((element, id));
        id
    }

    fn entity(&self, element: u32) -> Option<EntityId> {
        self.overlays.iter().find(|(e, _)| *e == element).map(|&(_, id)| id)
    }

    pub fn set_layout(&mut self, element: u32, top: f32, height: f32) -> bool {
        self.tracker.set_layout(element, top, height)
    }

    pub fn set_scroll(&mut self, top: f32, viewport_height: f32) {
        self.tracker.set_scroll(top, viewport_height);
    }

    pub fn is_revealed(&self, element: u32) -> bool {
        self.tracker.is_revealed(element)
    }

    pub fn update(&mut self, scene: &mut Scene, dt: f32) {
        self.elapsed += dt;

        for element in self.tracker.poll() {
            self.start_entrance(element);
        }
        self.tweens.tick(dt, scene);

        for &(id, placement) in &self.decor {
            let (y, opacity) = placement.pose(self.elapsed);
            if let Some(entity) = scene.get_mut(id) {
                entity.pos.y = y;
                entity.alpha = opacity;
            }
        }

        if let Some(arrow) = self.arrow.and_then(|id| scene.get_mut(id)) {
            let phase = (self.elapsed % ARROW_PERIOD) / ARROW_PERIOD;
            arrow.pos.y = (phase * std::f32::consts::PI).sin() * ARROW_BOB_PX;
        }
    }

    fn start_entrance(&mut self, element: u32) {
        log::debug!("sections: reveal {}", element);
        if element == elements::PHOTO_GRID {
            for (i, &id) in self.photos.iter().enumerate() {
                let delay = i as f32 * PHOTO_STAGGER;
                self.tweens.add(id, Tween::fade_in(PHOTO_DURATION, Easing::QuadOut).with_delay(delay));
                self.tweens.add(
                    id,
                    Tween::position_y(PHOTO_RISE_PX, 0.0, PHOTO_DURATION, Easing::BackOut).with_delay(delay),
                );
                self.tweens.add(id, Tween::scale(0.9, 1.0, PHOTO_DURATION, Easing::BackOut).with_delay(delay));
            }
            return;
        }

        let Some(id) = self.entity(element) else {
            return;
        };
        if element == elements::CLOSING {
            self.tweens.add(id, Tween::fade_in(HEADER_DURATION, Easing::QuadOut));
            self.tweens.add(id, Tween::scale(0.9, 1.0, HEADER_DURATION, Easing::QuadOut));
        } else if let Some(i) = memory_index(element) {
            self.tweens.add(id, Tween::fade_in(MEMORY_DURATION, Easing::QuadOut).with_delay(MEMORY_DELAY));
            self.tweens.add(
                id,
                Tween::position(memory_offset(i), Vec3::ZERO, MEMORY_DURATION, Easing::CubicOut)
                    .with_delay(MEMORY_DELAY),
            );
            if let Some(dot) = self.entity(elements::MEMORY_DOT_BASE + i as u32) {
                self.tweens.add(dot, Tween::scale(0.0, 1.0, DOT_DURATION, Easing::BackOut).with_delay(DOT_DELAY));
            }
        } else {
            self.tweens.add(id, Tween::fade_in(HEADER_DURATION, Easing::QuadOut));
            self.tweens.add(id, Tween::position_y(HEADER_RISE_PX, 0.0, HEADER_DURATION, Easing::QuadOut));
        }
    }

    pub fn despawn(mut self, scene: &mut Scene) {
        for (_, id) in self.overlays.drain(..) {
            scene.despawn(id);
        }
        self.tweens.clear();
    }
}

/// Even timeline entries enter from the left, odd ones from the right.
fn memory_offset(i: usize) -> Vec3 {
    let side = if i % 2 == 0 { -1.0 } else { 1.0 };
    Vec3::new(side * MEMORY_SLIDE_PX, MEMORY_RISE_PX, 0.0)
}

fn memory_index(element: u32) -> Option<usize> {
    (elements::MEMORY_BASE..elements::MEMORY_DOT_BASE)
        .contains(&element)
        .then(|| (element - elements::MEMORY_BASE) as usize)
}
