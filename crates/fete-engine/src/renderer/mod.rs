pub mod camera;
pub mod overlay_instance;
pub mod sdf_instance;
