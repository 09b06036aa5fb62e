use fete_engine::*;
use serde::Serialize;

use crate::balloons::BalloonScene;
use crate::cake::{CakeScene, HERO_FRACTION};
use crate::celebration::Celebration;
use crate::content::{Closing, Content, HeroCopy, MemoryEntry, PhotoEntry, Section, SplashCopy};
use crate::decor::{self, Placement, DECOR_COUNT};
use crate::elements;
use crate::quiz::{Quiz, QuizView, Selection};
use crate::sections::Sections;

const FIXED_DT: f32 = 1.0 / 60.0;
const SEED: u64 = 0x6b69_6b75;

// Page event kinds (Rust → host)
pub const EVENT_READY: f32 = 1.0;
pub const EVENT_WRONG_ANSWER: f32 = 2.0;
pub const EVENT_SOLVED: f32 = 3.0;
pub const EVENT_NAVIGATE: f32 = 4.0;

// Custom event kinds (host → Rust)
pub const CUSTOM_SELECT_OPTION: u32 = 1;
pub const CUSTOM_LAYOUT: u32 = 2;
pub const CUSTOM_OPEN_BIRTHDAY: u32 = 3;

const CARD_RISE_PX: f32 = 50.0;
const CARD_ENTER: f32 = 0.8;
const ICON_WIGGLE_DEG: f32 = 10.0;
const ICON_WIGGLE_TIME: f32 = 2.0;
const ICON_WIGGLE_PERIOD: f32 = 5.0;

/// Which page the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Gate,
    Birthday,
}

impl Route {
    fn code(self) -> f32 {
        match self {
            Route::Gate => 0.0,
            Route::Birthday => 1.0,
        }
    }
}

pub struct BirthdayCard {
    content: Content,
    route: Route,
    quiz: Quiz,
    card: Option<EntityId>,
    icon: Option<EntityId>,
    card_tweens: TweenState,
    celebration: Celebration,
    balloons: Option<BalloonScene>,
    cake: Option<CakeScene>,
    sections: Option<Sections>,
    scroll: (f32, f32),
    ready_sent: bool,
}

impl BirthdayCard {
    pub fn new() -> Self {
        Self::with_content(bundled_content())
    }

    pub fn with_content(content: Content) -> Self {
        Self {
            quiz: Quiz::new(&content.question),
            content,
            route: Route::Gate,
            card: None,
            icon: None,
            card_tweens: TweenState::new(),
            celebration: Celebration::new(),
            balloons: None,
            cake: None,
            sections: None,
            scroll: (0.0, 0.0),
            ready_sent: false,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    fn spawn_gate(&mut self, ctx: &mut PageContext) {
        self.balloons = Some(BalloonScene::spawn(ctx));

        let card = ctx.spawn(|e| {
            e.with_tag("gate")
                .with_alpha(0.0)
                .with_pos(glam::Vec3::Y * CARD_RISE_PX)
                .with_overlay(OverlayComponent::new(elements::QUIZ_CARD))
        });
        self.card_tweens.add(card, Tween::fade_in(CARD_ENTER, Easing::QuadOut));
        self.card_tweens.add(card, Tween::position_y(CARD_RISE_PX, 0.0, CARD_ENTER, Easing::BackOut));
        self.card = Some(card);

        self.icon = Some(ctx.spawn(|e| e.with_tag("gate").with_overlay(OverlayComponent::new(elements::QUIZ_ICON))));
    }

    fn despawn_quiz_card(&mut self, ctx: &mut PageContext) {
        for id in [self.card.take(), self.icon.take()].into_iter().flatten() {
            ctx.scene.despawn(id);
        }
        self.card_tweens.clear();
    }

    fn select(&mut self, ctx: &mut PageContext, index: f32) {
        if self.route != Route::Gate || !index.is_finite() || index < 0.0 || index.fract() != 0.0 {
            log::warn!("select: ignored option {} on {:?}", index, self.route);
            return;
        }
        let index = index as usize;
        match self.quiz.select(index) {
            Selection::Correct => {
                ctx.emit_event(PageEvent::new(EVENT_SOLVED, index as f32, 0.0, 0.0));
                self.despawn_quiz_card(ctx);
                self.celebration.activate(ctx);
            }
            Selection::Wrong => {
                let wrong = self.quiz.wrong_attempts().len() as f32;
                let hint = if self.quiz.hint_visible() { 1.0 } else { 0.0 };
                ctx.emit_event(PageEvent::new(EVENT_WRONG_ANSWER, index as f32, wrong, hint));
            }
            Selection::Ignored => {}
        }
    }

    /// Leave the gate for the birthday page. Tears down everything the gate
    /// owns, including a pending celebration timer.
    fn open_birthday(&mut self, ctx: &mut PageContext) {
        if self.route == Route::Birthday {
            return;
        }
        self.celebration.deactivate(ctx);
        self.despawn_quiz_card(ctx);
        if let Some(balloons) = self.balloons.take() {
            balloons.despawn(&mut ctx.scene);
        }

        self.route = Route::Birthday;
        ctx.camera = CakeScene::camera(ctx.viewport());
        self.cake = Some(CakeScene::spawn(ctx));
        self.spawn_sections(ctx);
        ctx.emit_event(PageEvent::new(EVENT_NAVIGATE, Route::Birthday.code(), 0.0, 0.0));
        log::info!("route: birthday");
    }

    fn spawn_sections(&mut self, ctx: &mut PageContext) {
        if let Some(old) = self.sections.take() {
            old.despawn(&mut ctx.scene);
        }
        let mut sections = Sections::spawn(ctx, &self.content);
        sections.set_scroll(self.scroll.0, self.scroll.1);
        self.sections = Some(sections);
    }

    fn handle_input(&mut self, ctx: &mut PageContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Scroll { top, viewport_height } => {
                    self.scroll = (top, viewport_height);
                    if let Some(sections) = self.sections.as_mut() {
                        sections.set_scroll(top, viewport_height);
                    }
                }
                InputEvent::Custom { kind: CUSTOM_SELECT_OPTION, a, .. } => self.select(ctx, a),
                InputEvent::Custom { kind: CUSTOM_LAYOUT, a, b, c } => {
                    if let Some(sections) = self.sections.as_mut() {
                        sections.set_layout(a as u32, b, c);
                    }
                }
                InputEvent::Custom { kind: CUSTOM_OPEN_BIRTHDAY, .. } => self.open_birthday(ctx),
                InputEvent::Custom { kind, .. } => log::warn!("unknown custom event {}", kind),
                InputEvent::Resize { .. } => {}
            }
        }
    }

    fn update_gate(&mut self, ctx: &mut PageContext, t: f32) {
        if let Some(balloons) = &self.balloons {
            balloons.update(&mut ctx.scene, t);
        }

        self.quiz.tick(FIXED_DT);
        self.card_tweens.tick(FIXED_DT, &mut ctx.scene);
        if let Some(card) = self.card.and_then(|id| ctx.scene.get_mut(id)) {
            card.pos.x = self.quiz.shake_offset();
        }
        if let Some(icon) = self.icon.and_then(|id| ctx.scene.get_mut(id)) {
            icon.rotation = icon_wiggle(t);
        }

        if self.celebration.tick(ctx, FIXED_DT).is_some() {
            self.open_birthday(ctx);
        }
    }

    fn update_birthday(&mut self, ctx: &mut PageContext, t: f32) {
        let viewport = ctx.viewport();
        ctx.camera.resize(viewport[0], viewport[1] * HERO_FRACTION);
        if let Some(cake) = &self.cake {
            cake.update(&mut ctx.scene, &ctx.camera, viewport, t);
        }
        if let Some(sections) = self.sections.as_mut() {
            sections.update(&mut ctx.scene, FIXED_DT);
        }
    }
}

impl Default for BirthdayCard {
    fn default() -> Self {
        Self::new()
    }
}

/// The bundled content is validated by tests; a broken build still shows a page.
fn bundled_content() -> Content {
    match Content::bundled() {
        Ok(content) => content,
        Err(err) => {
            log::error!("bundled content invalid: {}", err);
            Content::fallback()
        }
    }
}

/// Icon rotation in radians: 0 → 10° → -10° → 0 over two seconds, every five.
fn icon_wiggle(t: f32) -> f32 {
    let local = t.rem_euclid(ICON_WIGGLE_PERIOD);
    if local >= ICON_WIGGLE_TIME {
        return 0.0;
    }
    let keys = [0.0, ICON_WIGGLE_DEG, -ICON_WIGGLE_DEG, 0.0];
    let segment = local / ICON_WIGGLE_TIME * 3.0;
    let i = (segment as usize).min(2);
    lerp(keys[i], keys[i + 1], segment - i as f32).to_radians()
}

#[derive(Serialize)]
struct SplashView<'a> {
    #[serde(flatten)]
    copy: &'a SplashCopy,
    active: bool,
    confetti: bool,
}

#[derive(Serialize)]
struct BirthdayView<'a> {
    hero: &'a HeroCopy,
    photos: &'a Section<PhotoEntry>,
    memories: &'a Section<MemoryEntry>,
    closing: &'a Closing,
    footer: &'a str,
    decor: Vec<Placement>,
}

#[derive(Serialize)]
struct UiState<'a> {
    route: Route,
    #[serde(skip_serializing_if = "Option::is_none")]
    quiz: Option<QuizView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    splash: Option<SplashView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthday: Option<BirthdayView<'a>>,
}

impl Page for BirthdayCard {
    fn config(&self) -> PageConfig {
        PageConfig {
            fixed_dt: FIXED_DT,
            max_overlays: elements::MAX_OVERLAYS,
            seed: SEED,
            ..PageConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut PageContext) {
        self.spawn_gate(ctx);
        log::info!("route: gate ({} options)", self.content.question.options.len());
    }

    fn update(&mut self, ctx: &mut PageContext, input: &InputQueue) {
        if !self.ready_sent {
            ctx.emit_event(PageEvent::signal(EVENT_READY));
            self.ready_sent = true;
        }

        self.handle_input(ctx, input);

        let t = ctx.clock.elapsed();
        match self.route {
            Route::Gate => self.update_gate(ctx, t),
            Route::Birthday => self.update_birthday(ctx, t),
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        if self.route == Route::Gate {
            self.celebration.render(ctx);
        }
    }

    fn ui_state(&self) -> Option<String> {
        let content = &self.content;
        let on_gate = self.route == Route::Gate;
        let state = UiState {
            route: self.route,
            quiz: (on_gate && !self.quiz.is_solved()).then(|| self.quiz.view(&content.question)),
            splash: on_gate.then(|| SplashView {
                copy: &content.splash,
                active: self.celebration.is_active(),
                confetti: self.celebration.confetti_active(),
            }),
            birthday: (!on_gate).then(|| BirthdayView {
                hero: &content.hero,
                photos: &content.photos,
                memories: &content.memories,
                closing: &content.closing,
                footer: &content.footer,
                decor: decor::scatter(DECOR_COUNT),
            }),
        };
        snapshot(&state)
    }

    fn load_content(&mut self, ctx: &mut PageContext, json: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = Content::from_json(json)?;
        self.content = content;
        match self.route {
            Route::Gate if !self.celebration.is_active() => {
                self.quiz = Quiz::new(&self.content.question);
            }
            Route::Gate => {}
            Route::Birthday => self.spawn_sections(ctx),
        }
        log::info!("content replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::OptionState;

    fn boot() -> (BirthdayCard, PageContext) {
        let mut page = BirthdayCard::new();
        let mut ctx = PageContext::new(&page.config());
        page.init(&mut ctx);
        (page, ctx)
    }

    /// One fixed step the way the runner drives it. Returns the events emitted.
    fn step(page: &mut BirthdayCard, ctx: &mut PageContext, events: &[InputEvent]) -> Vec<PageEvent> {
        let mut input = InputQueue::new();
        for event in events {
            input.push(event.clone());
        }
        ctx.clear_frame_data();
        ctx.clock.advance(FIXED_DT);
        page.update(ctx, &input);
        ctx.effects.tick(FIXED_DT);
        ctx.events.clone()
    }

    fn run(page: &mut BirthdayCard, ctx: &mut PageContext, seconds: f32) -> Vec<PageEvent> {
        let steps = (seconds / FIXED_DT).round() as usize;
        (0..steps).flat_map(|_| step(page, ctx, &[])).collect()
    }

    fn choose(index: usize) -> InputEvent {
        InputEvent::Custom { kind: CUSTOM_SELECT_OPTION, a: index as f32, b: 0.0, c: 0.0 }
    }

    fn kinds(events: &[PageEvent]) -> Vec<f32> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn first_update_reports_ready() {
        let (mut page, mut ctx) = boot();
        assert_eq!(kinds(&step(&mut page, &mut ctx, &[])), vec![EVENT_READY]);
        assert!(step(&mut page, &mut ctx, &[]).is_empty());
    }

    #[test]
    fn nickname_scenario_navigates_after_splash() {
        let (mut page, mut ctx) = boot();
        step(&mut page, &mut ctx, &[]);

        let events = step(&mut page, &mut ctx, &[choose(0)]);
        assert_eq!(events, vec![PageEvent::new(EVENT_WRONG_ANSWER, 0.0, 1.0, 0.0)]);
        assert!(!page.quiz().hint_visible());

        let events = step(&mut page, &mut ctx, &[choose(1)]);
        assert_eq!(events, vec![PageEvent::new(EVENT_WRONG_ANSWER, 1.0, 2.0, 1.0)]);
        assert_eq!(page.quiz().wrong_attempts(), &[0, 1]);
        assert!(page.quiz().hint_visible());

        let events = step(&mut page, &mut ctx, &[choose(3)]);
        assert_eq!(kinds(&events), vec![EVENT_SOLVED]);
        assert!(page.celebration().is_active());
        assert_eq!(page.quiz().option_state(3), OptionState::Correct);

        let early = run(&mut page, &mut ctx, 4.4);
        assert!(!kinds(&early).contains(&EVENT_NAVIGATE));
        assert_eq!(page.route(), Route::Gate);

        let late = run(&mut page, &mut ctx, 0.2);
        assert_eq!(kinds(&late), vec![EVENT_NAVIGATE]);
        assert_eq!(late[0].a, Route::Birthday.code());
        assert_eq!(page.route(), Route::Birthday);
        assert!(!page.celebration().is_active());

        assert!(!kinds(&run(&mut page, &mut ctx, 5.0)).contains(&EVENT_NAVIGATE));
    }

    #[test]
    fn repeated_wrong_choice_is_silent() {
        let (mut page, mut ctx) = boot();
        step(&mut page, &mut ctx, &[]);
        step(&mut page, &mut ctx, &[choose(2)]);
        run(&mut page, &mut ctx, 1.0);
        assert!(step(&mut page, &mut ctx, &[choose(2)]).is_empty());
        assert!(step(&mut page, &mut ctx, &[choose(9)]).is_empty());
        assert_eq!(page.quiz().wrong_attempts(), &[2]);
    }

    #[test]
    fn malformed_option_index_spends_no_attempt() {
        let (mut page, mut ctx) = boot();
        step(&mut page, &mut ctx, &[]);
        let bad = [f32::NAN, f32::INFINITY, -1.0, 1.9]
            .map(|a| InputEvent::Custom { kind: CUSTOM_SELECT_OPTION, a, b: 0.0, c: 0.0 });
        assert!(step(&mut page, &mut ctx, &bad).is_empty());
        assert!(page.quiz().wrong_attempts().is_empty());
        assert!(!page.quiz().hint_visible());
    }

    #[test]
    fn solved_quiz_reports_once() {
        let (mut page, mut ctx) = boot();
        step(&mut page, &mut ctx, &[]);
        let events = step(&mut page, &mut ctx, &[choose(3), choose(3), choose(0)]);
        assert_eq!(kinds(&events), vec![EVENT_SOLVED]);
        assert!(page.quiz().wrong_attempts().is_empty());
    }

    #[test]
    fn wrong_answer_shakes_the_card() {
        let (mut page, mut ctx) = boot();
        step(&mut page, &mut ctx, &[]);
        step(&mut page, &mut ctx, &[choose(0)]);
        run(&mut page, &mut ctx, 0.05);
        let card = page.card.and_then(|id| ctx.scene.get(id)).unwrap();
        assert!(card.pos.x != 0.0);

        run(&mut page, &mut ctx, 1.0);
        let card = page.card.and_then(|id| ctx.scene.get(id)).unwrap();
        assert_eq!(card.pos.x, 0.0);
        assert!((card.alpha - 1.0).abs() < 1e-4);
    }

    #[test]
    fn birthday_route_swaps_scenes() {
        let (mut page, mut ctx) = boot();
        let gate_entities = ctx.scene.len();
        assert!(ctx.scene.count_tagged("balloons") > 0);

        step(&mut page, &mut ctx, &[InputEvent::Custom { kind: CUSTOM_OPEN_BIRTHDAY, a: 0.0, b: 0.0, c: 0.0 }]);
        assert_eq!(page.route(), Route::Birthday);
        assert_eq!(ctx.scene.count_tagged("balloons"), 0);
        assert_eq!(ctx.scene.count_tagged("gate"), 0);
        assert!(ctx.scene.count_tagged("cake") > 0);
        assert!(ctx.scene.len() != gate_entities);
        assert!((ctx.camera.aspect - 1280.0 / (720.0 * HERO_FRACTION)).abs() < 1e-4);
    }

    #[test]
    fn layout_and_scroll_reveal_sections() {
        let (mut page, mut ctx) = boot();
        step(&mut page, &mut ctx, &[InputEvent::Custom { kind: CUSTOM_OPEN_BIRTHDAY, a: 0.0, b: 0.0, c: 0.0 }]);
        step(
            &mut page,
            &mut ctx,
            &[
                InputEvent::Custom {
                    kind: CUSTOM_LAYOUT,
                    a: elements::PHOTOS_HEADER as f32,
                    b: 900.0,
                    c: 120.0,
                },
                InputEvent::Scroll { top: 400.0, viewport_height: 720.0 },
            ],
        );
        let sections = page.sections.as_ref().unwrap();
        assert!(sections.is_revealed(elements::PHOTOS_HEADER));
        assert!(!sections.is_revealed(elements::CLOSING));
    }

    #[test]
    fn selection_after_leaving_gate_is_ignored() {
        let (mut page, mut ctx) = boot();
        step(&mut page, &mut ctx, &[InputEvent::Custom { kind: CUSTOM_OPEN_BIRTHDAY, a: 0.0, b: 0.0, c: 0.0 }]);
        assert!(step(&mut page, &mut ctx, &[choose(3)]).is_empty());
        assert!(!page.quiz().is_solved());
    }

    #[test]
    fn ui_state_follows_the_route() {
        let (mut page, mut ctx) = boot();
        let gate: serde_json::Value = serde_json::from_str(&page.ui_state().unwrap()).unwrap();
        assert_eq!(gate["route"], "gate");
        assert_eq!(gate["quiz"]["options"][3]["label"], "Kiku");
        assert_eq!(gate["quiz"]["options"][0]["letter"], "A");
        assert_eq!(gate["splash"]["first_line"], "Happy");
        assert_eq!(gate["splash"]["active"], false);
        assert!(gate.get("birthday").is_none());

        step(&mut page, &mut ctx, &[]);
        step(&mut page, &mut ctx, &[choose(3)]);
        let solved: serde_json::Value = serde_json::from_str(&page.ui_state().unwrap()).unwrap();
        assert!(solved.get("quiz").is_none());
        assert_eq!(solved["splash"]["confetti"], true);

        run(&mut page, &mut ctx, 4.6);
        let birthday: serde_json::Value = serde_json::from_str(&page.ui_state().unwrap()).unwrap();
        assert_eq!(birthday["route"], "birthday");
        assert_eq!(birthday["birthday"]["decor"].as_array().unwrap().len(), DECOR_COUNT);
        assert_eq!(birthday["birthday"]["memories"]["entries"][0]["icon"], "heart");
    }

    #[test]
    fn load_content_replaces_the_question() {
        let (mut page, mut ctx) = boot();
        let mut value: serde_json::Value = serde_json::from_str(include_str!("../content/birthday.json")).unwrap();
        value["question"]["options"] = serde_json::json!([
            { "label": "Yes", "correct": true },
            { "label": "No" }
        ]);
        page.load_content(&mut ctx, &value.to_string()).unwrap();
        step(&mut page, &mut ctx, &[]);
        assert_eq!(kinds(&step(&mut page, &mut ctx, &[choose(0)])), vec![EVENT_SOLVED]);
    }

    #[test]
    fn load_content_rejects_invalid_json() {
        let (mut page, mut ctx) = boot();
        assert!(page.load_content(&mut ctx, "{}").is_err());
        assert_eq!(page.content.question.options.len(), 4);
    }

    #[test]
    fn icon_wiggles_then_rests() {
        assert_eq!(icon_wiggle(0.0), 0.0);
        assert!((icon_wiggle(2.0 / 3.0) - 10f32.to_radians()).abs() < 1e-4);
        assert!((icon_wiggle(4.0 / 3.0) + 10f32.to_radians()).abs() < 1e-4);
        assert_eq!(icon_wiggle(3.0), 0.0);
        assert!((icon_wiggle(5.0 + 2.0 / 3.0) - 10f32.to_radians()).abs() < 1e-4);
    }
}
