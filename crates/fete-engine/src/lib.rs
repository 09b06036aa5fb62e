pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::page::{Page, PageConfig, PageContext, RenderContext, snapshot};
pub use api::types::{EntityId, PageEvent};
pub use components::color::Color;
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, Primitive};
pub use components::overlay::{OverlayComponent, OverlayId};
pub use core::scene::Scene;
pub use core::time::{Clock, FixedTimestep};
pub use core::timer::OneShot;
pub use renderer::camera::{PerspectiveCamera, Projected};
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use renderer::overlay_instance::{OverlayInstance, OverlayBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::effects::{EffectsState, Envelope, Particle, ParticleShape, Rng};
pub use systems::sdf_render::build_sdf_buffer;
pub use systems::overlay_render::build_overlay_buffer;

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};

// Extensions — decoupled optional systems
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    TweenState, Tween, TweenTarget,
};
