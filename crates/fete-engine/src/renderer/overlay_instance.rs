use bytemuck::{Pod, Zeroable};

/// Transform for one host DOM element.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OverlayInstance {
    /// Element id as a float (the host casts back to integer).
    pub element: f32,
    /// CSS translate X, in pixels.
    pub x: f32,
    /// CSS translate Y, in pixels.
    pub y: f32,
    pub scale: f32,
    /// Rotation in degrees, ready for `rotate()`.
    pub rotation: f32,
    pub alpha: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl OverlayInstance {
    pub const FLOATS: usize = 8;
}

/// Buffer of overlay transforms, rebuilt every frame.
pub struct OverlayBuffer {
    instances: Vec<OverlayInstance>,
}

impl OverlayBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: OverlayInstance) {
        self.instances.push(instance);
    }

    /// Look up the transform written for an element this frame.
    pub fn find(&self, element: u32) -> Option<&OverlayInstance> {
        self.instances.iter().find(|i| i.element as u32 == element)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for OverlayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
