/// Identifies a DOM element owned by the host (headline, card, photo...).
/// Pages define the numbering; the host maps ids to elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OverlayId(pub u32);

/// Marks an entity whose transform drives a DOM element instead of a mesh.
///
/// Entity position x/y are CSS pixel offsets from the element's layout box,
/// `scale`, `rotation` (radians) and `alpha` map to the CSS transform and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayComponent {
    pub element: OverlayId,
}

impl OverlayComponent {
    pub fn new(element: u32) -> Self {
        Self {
            element: OverlayId(element),
        }
    }
}
