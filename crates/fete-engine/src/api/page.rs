use serde::Serialize;

use crate::api::types::{EntityId, PageEvent};
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::core::time::Clock;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::overlay_instance::OverlayBuffer;
use crate::systems::effects::EffectsState;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the page.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Viewport width in CSS pixels. Vector effects are drawn in this space.
    pub viewport_width: f32,
    /// Viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of DOM overlay transforms (default: 64).
    pub max_overlays: usize,
    /// Maximum number of SDF instances (default: 512).
    pub max_sdf_instances: usize,
    /// Maximum number of vector vertices (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of page events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the effects RNG.
    pub seed: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_overlays: 64,
            max_sdf_instances: 512,
            max_vector_vertices: 65536,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every page must fulfill.
pub trait Page {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> PageConfig {
        PageConfig::default()
    }

    /// Setup initial state, spawn entities, position the camera.
    fn init(&mut self, ctx: &mut PageContext);

    /// One fixed step. React to input, advance state machines, move entities.
    fn update(&mut self, ctx: &mut PageContext, input: &InputQueue);

    /// Optional read-only pass for custom draw commands.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// JSON snapshot of the state the DOM host renders (text, buttons, flags).
    fn ui_state(&self) -> Option<String> {
        None
    }

    /// Replace authored content at runtime. Pages without content reject it.
    fn load_content(&mut self, _ctx: &mut PageContext, _json: &str) -> Result<(), Box<dyn std::error::Error>> {
        Err("page does not accept content".into())
    }
}

/// Serialize a UI snapshot, logging instead of failing.
pub fn snapshot<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(err) => {
            log::warn!("ui state serialization failed: {}", err);
            None
        }
    }
}

/// Mutable access to engine state, passed to Page::init and Page::update.
pub struct PageContext {
    pub scene: Scene,
    pub effects: EffectsState,
    pub camera: PerspectiveCamera,
    pub clock: Clock,
    pub events: Vec<PageEvent>,
    #[cfg(feature = "vectors")]
    pub vectors: VectorState,
    viewport: [f32; 2],
    next_id: u32,
}

impl PageContext {
    pub fn new(config: &PageConfig) -> Self {
        let mut camera = PerspectiveCamera::default();
        camera.resize(config.viewport_width, config.viewport_height);
        Self {
            scene: Scene::new(),
            effects: EffectsState::new(config.seed),
            camera,
            clock: Clock::new(),
            events: Vec::with_capacity(config.max_events),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            viewport: [config.viewport_width, config.viewport_height],
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate an id, attach it to the entity and add it to the scene.
    pub fn spawn(&mut self, build: impl FnOnce(Entity) -> Entity) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(build(Entity::new(id)));
        id
    }

    /// Emit a page event to be forwarded to the host.
    pub fn emit_event(&mut self, event: PageEvent) {
        self.events.push(event);
    }

    /// Current viewport size in CSS pixels.
    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    /// Track a host resize: camera aspect and vector space follow the viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = [width, height];
        self.camera.resize(width, height);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new(&PageConfig::default())
    }
}

/// Render context for optional custom draw commands.
pub struct RenderContext<'a> {
    pub camera: &'a PerspectiveCamera,
    pub overlays: &'a mut OverlayBuffer,
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
    pub viewport: [f32; 2],
    pub elapsed: f32,
}
