use fete_engine::bridge::protocol::{
    HEADER_ELAPSED, HEADER_EVENT_COUNT, HEADER_FLOATS, HEADER_FRAME_COUNTER,
    HEADER_OVERLAY_COUNT, HEADER_SDF_INSTANCE_COUNT, HEADER_VECTOR_VERTEX_COUNT,
    HEADER_VIEWPORT_HEIGHT, HEADER_VIEWPORT_WIDTH,
};
use fete_engine::{
    build_overlay_buffer, build_sdf_buffer, FixedTimestep, InputEvent, InputQueue,
    OverlayBuffer, Page, PageContext, ProtocolLayout, RenderContext, SDFBuffer,
};

/// Generic page runner that wires up the engine loop.
///
/// Each concrete page creates a `thread_local!` PageRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct PageRunner<P: Page> {
    page: P,
    ctx: PageContext,
    input: InputQueue,
    sdf_buffer: SDFBuffer,
    overlay_buffer: OverlayBuffer,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u64,
    initialized: bool,
    /// Last UI snapshot handed to the host; `None` until the page publishes one.
    ui_state: Option<String>,
}

impl<P: Page> PageRunner<P> {
    pub fn new(page: P) -> Self {
        let config = page.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            timestep: FixedTimestep::new(config.fixed_dt),
            ctx: PageContext::new(&config),
            input: InputQueue::new(),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            overlay_buffer: OverlayBuffer::with_capacity(config.max_overlays),
            header: layout.header(),
            layout,
            page,
            frame: 0,
            initialized: false,
            ui_state: None,
        }
    }

    /// Initialize the page. Call once after construction.
    pub fn init(&mut self) {
        self.page.init(&mut self.ctx);
        self.ui_state = self.page.ui_state();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Replace the page's authored content at runtime.
    pub fn load_content(&mut self, json: &str) -> bool {
        match self.page.load_content(&mut self.ctx, json) {
            Ok(()) => {
                self.ui_state = self.page.ui_state();
                true
            }
            Err(err) => {
                log::error!("content rejected: {}", err);
                false
            }
        }
    }

    /// Run one frame tick: update the page, then rebuild every output buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Resizes apply before the steps so the page sees the new viewport.
        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                self.ctx.resize(width, height);
            }
        }

        let steps = self.timestep.accumulate(dt);
        let step_dt = self.timestep.dt();
        for step in 0..steps {
            self.ctx.clock.advance(step_dt);
            // Input is seen by the first step only.
            if step == 0 {
                self.page.update(&mut self.ctx, &self.input);
            } else {
                self.page.update(&mut self.ctx, &InputQueue::new());
            }
            self.ctx.effects.tick(step_dt);
        }

        // Input that arrived during a zero-step frame waits for the next one.
        if steps > 0 {
            self.input.drain();
        }

        build_sdf_buffer(self.ctx.scene.iter(), &self.ctx.camera, &mut self.sdf_buffer);
        build_overlay_buffer(self.ctx.scene.iter(), &mut self.overlay_buffer);

        #[cfg(feature = "vectors")]
        self.ctx.vectors.clear();

        {
            let viewport = self.ctx.viewport();
            let elapsed = self.ctx.clock.elapsed();
            let mut render_ctx = RenderContext {
                camera: &self.ctx.camera,
                overlays: &mut self.overlay_buffer,
                #[cfg(feature = "vectors")]
                vectors: &mut self.ctx.vectors,
                viewport,
                elapsed,
            };
            self.page.render(&mut render_ctx);
        }

        #[cfg(feature = "vectors")]
        self.ctx.effects.draw(&mut self.ctx.vectors);

        if steps > 0 {
            self.ui_state = self.page.ui_state();
        }

        self.frame += 1;
        self.write_header();
    }

    fn write_header(&mut self) {
        let [width, height] = self.ctx.viewport();
        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_OVERLAY_COUNT] = self.overlay_count() as f32;
        self.header[HEADER_SDF_INSTANCE_COUNT] = self.sdf_instance_count() as f32;
        self.header[HEADER_VECTOR_VERTEX_COUNT] = self.vector_vertex_count() as f32;
        self.header[HEADER_EVENT_COUNT] = self.page_events_len() as f32;
        self.header[HEADER_VIEWPORT_WIDTH] = width;
        self.header[HEADER_VIEWPORT_HEIGHT] = height;
        self.header[HEADER_ELAPSED] = self.ctx.clock.elapsed();
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn overlays_ptr(&self) -> *const f32 {
        self.overlay_buffer.instances_ptr()
    }

    pub fn overlay_count(&self) -> u32 {
        self.overlay_buffer.instance_count() as u32
    }

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        #[cfg(feature = "vectors")]
        {
            self.ctx.vectors.vertex_count() as u32
        }
        #[cfg(not(feature = "vectors"))]
        {
            0
        }
    }

    pub fn page_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn page_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn ui_state(&self) -> String {
        self.ui_state.clone().unwrap_or_default()
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.viewport()[0]
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.viewport()[1]
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_overlays(&self) -> u32 {
        self.layout.max_overlays as u32
    }

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn page(&self) -> &P {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fete_engine::{Color, MeshComponent, OverlayComponent, PageEvent, Primitive};
    use glam::Vec3;

    #[derive(Default)]
    struct Probe {
        updates: u32,
        customs: Vec<u32>,
    }

    impl Page for Probe {
        fn init(&mut self, ctx: &mut PageContext) {
            ctx.spawn(|e| {
                e.with_pos(Vec3::ZERO)
                    .with_mesh(MeshComponent::new(Primitive::Sphere { radius: 0.5 }, Color::WHITE))
            });
            ctx.spawn(|e| e.with_overlay(OverlayComponent::new(3)));
        }

        fn update(&mut self, ctx: &mut PageContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                if let InputEvent::Custom { kind, .. } = *event {
                    self.customs.push(kind);
                    ctx.emit_event(PageEvent::signal(kind as f32));
                }
            }
        }

        fn render(&self, ctx: &mut RenderContext) {
            let [w, h] = ctx.viewport;
            ctx.vectors.fill_circle(glam::Vec2::new(w, h) * 0.5, 20.0, Color::WHITE);
        }

        fn ui_state(&self) -> Option<String> {
            Some(format!("{{\"updates\":{}}}", self.updates))
        }
    }

    #[test]
    fn tick_before_init_is_a_no_op() {
        let mut runner = PageRunner::new(Probe::default());
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.page().updates, 0);
        assert_eq!(runner.sdf_instance_count(), 0);
    }

    #[test]
    fn tick_fills_buffers_and_header() {
        let mut runner = PageRunner::new(Probe::default());
        runner.init();
        runner.tick(1.0 / 60.0);

        assert_eq!(runner.page().updates, 1);
        assert_eq!(runner.sdf_instance_count(), 1);
        assert_eq!(runner.overlay_count(), 1);
        assert_eq!(runner.header[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(runner.header[HEADER_SDF_INSTANCE_COUNT], 1.0);
        assert_eq!(runner.ui_state(), "{\"updates\":1}");
    }

    #[test]
    fn input_reaches_one_step_only() {
        let mut runner = PageRunner::new(Probe::default());
        runner.init();
        runner.push_input(InputEvent::Custom { kind: 5, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(3.0 / 60.0);

        assert_eq!(runner.page().updates, 3);
        assert_eq!(runner.page().customs, vec![5]);
        assert_eq!(runner.page_events_len(), 1);

        runner.tick(1.0 / 60.0);
        assert_eq!(runner.page().customs, vec![5]);
        assert_eq!(runner.page_events_len(), 0);
    }

    #[test]
    fn render_pass_draws_into_vectors() {
        let mut runner = PageRunner::new(Probe::default());
        runner.init();
        runner.push_input(InputEvent::Resize { width: 400.0, height: 300.0 });
        runner.tick(1.0 / 60.0);

        assert!(runner.vector_vertex_count() > 0);
        assert_eq!(runner.header[HEADER_VECTOR_VERTEX_COUNT], runner.vector_vertex_count() as f32);
        let first = &runner.ctx.vectors.as_slice()[..2];
        assert!((first[0] - 200.0).abs() <= 21.0 && (first[1] - 150.0).abs() <= 21.0);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut runner = PageRunner::new(Probe::default());
        runner.init();
        runner.push_input(InputEvent::Resize { width: 390.0, height: 844.0 });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.viewport_width(), 390.0);
        assert_eq!(runner.header[HEADER_VIEWPORT_HEIGHT], 844.0);
    }

    #[test]
    fn default_page_rejects_content() {
        let mut runner = PageRunner::new(Probe::default());
        runner.init();
        assert!(!runner.load_content("{}"));
    }
}
