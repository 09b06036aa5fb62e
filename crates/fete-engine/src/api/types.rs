use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// An event communicated from Rust to the browser host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
/// Pages define their own kind constants.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PageEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl PageEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// Event that carries only a kind.
    pub fn signal(kind: f32) -> Self {
        Self::new(kind, 0.0, 0.0, 0.0)
    }
}
