pub mod runner;

pub use runner::PageRunner;

/// Generate all `#[wasm_bindgen]` exports for a page.
///
/// Generates:
/// - `thread_local!` storage for the PageRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (page_init, page_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use fete_engine::*;
///
/// mod app;
/// use app::MyPage;
///
/// fete_web::export_page!(MyPage, "my-page", vectors);
/// ```
///
/// # Arguments
///
/// - `$page_type`: The page struct type that implements `fete_engine::Page`
/// - `$page_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_page {
    ($page_type:ty, $page_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::PageRunner<$page_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::PageRunner<$page_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Page not initialized. Call page_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn page_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let page = <$page_type>::new();
            let runner = $crate::PageRunner::new(page);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $page_name);
        }

        #[wasm_bindgen]
        pub fn page_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn page_scroll(top: f32, viewport_height: f32) {
            with_runner(|r| r.push_input(InputEvent::Scroll { top, viewport_height }));
        }

        #[wasm_bindgen]
        pub fn page_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn page_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn page_load_content(json: &str) -> bool {
            with_runner(|r| r.load_content(json))
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_overlays_ptr() -> *const f32 {
            with_runner(|r| r.overlays_ptr())
        }

        #[wasm_bindgen]
        pub fn get_overlay_count() -> u32 {
            with_runner(|r| r.overlay_count())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instances_ptr() -> *const f32 {
            with_runner(|r| r.sdf_instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instance_count() -> u32 {
            with_runner(|r| r.sdf_instance_count())
        }

        #[wasm_bindgen]
        pub fn get_page_events_ptr() -> *const f32 {
            with_runner(|r| r.page_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_page_events_len() -> u32 {
            with_runner(|r| r.page_events_len())
        }

        #[wasm_bindgen]
        pub fn get_ui_state() -> String {
            with_runner(|r| r.ui_state())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width())
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_overlays() -> u32 {
            with_runner(|r| r.max_overlays())
        }

        #[wasm_bindgen]
        pub fn get_max_sdf_instances() -> u32 {
            with_runner(|r| r.max_sdf_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };

    // Variant with vectors feature
    ($page_type:ty, $page_name:literal, vectors) => {
        $crate::export_page!($page_type, $page_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(|r| r.max_vector_vertices())
        }
    };
}
