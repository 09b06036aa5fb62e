/// Input event types the engine understands.
/// Generic; pages attach their own meaning to `Custom` kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The host document scrolled: `top` is the scroll offset and
    /// `viewport_height` the visible height, both in CSS pixels.
    Scroll { top: f32, viewport_height: f32 },
    /// The viewport changed size, in CSS pixels.
    Resize { width: f32, height: f32 },
    /// A custom event from the DOM layer (option buttons, layout reports, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Scroll { top: 120.0, viewport_height: 800.0 });
        q.push(InputEvent::Resize { width: 390.0, height: 844.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event_keeps_payload() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        assert_eq!(
            q.iter().next(),
            Some(&InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 })
        );
        assert_eq!(q.len(), 1);
    }
}
