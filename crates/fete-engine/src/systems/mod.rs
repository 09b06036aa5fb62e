pub mod effects;
pub mod overlay_render;
pub mod sdf_render;
#[cfg(feature = "vectors")]
pub mod vector;
