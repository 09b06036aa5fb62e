/// SharedArrayBuffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Overlays: max_overlays × 8 floats]
/// [SDF: max_sdf_instances × 16 floats]
/// [Vectors: max_vector_vertices × 6 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::page::PageConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_OVERLAYS: usize = 3;
pub const HEADER_OVERLAY_COUNT: usize = 4;
pub const HEADER_MAX_SDF_INSTANCES: usize = 5;
pub const HEADER_SDF_INSTANCE_COUNT: usize = 6;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 7;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 8;
pub const HEADER_MAX_EVENTS: usize = 9;
pub const HEADER_EVENT_COUNT: usize = 10;
pub const HEADER_VIEWPORT_WIDTH: usize = 11;
pub const HEADER_VIEWPORT_HEIGHT: usize = 12;
pub const HEADER_ELAPSED: usize = 13;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per overlay transform (wire format, never changes).
pub const OVERLAY_FLOATS: usize = 8;

/// Floats per SDF instance (wire format, never changes).
pub const SDF_INSTANCE_FLOATS: usize = 16;

/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per page event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_overlays: usize,
    pub max_sdf_instances: usize,
    pub max_vector_vertices: usize,
    pub max_events: usize,

    pub overlay_data_floats: usize,
    pub sdf_data_floats: usize,
    pub vector_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where overlay data begins.
    pub overlay_data_offset: usize,
    pub sdf_data_offset: usize,
    pub vector_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_overlays: usize,
        max_sdf_instances: usize,
        max_vector_vertices: usize,
        max_events: usize,
    ) -> Self {
        let overlay_data_floats = max_overlays * OVERLAY_FLOATS;
        let sdf_data_floats = max_sdf_instances * SDF_INSTANCE_FLOATS;
        let vector_data_floats = max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let overlay_data_offset = HEADER_FLOATS;
        let sdf_data_offset = overlay_data_offset + overlay_data_floats;
        let vector_data_offset = sdf_data_offset + sdf_data_floats;
        let event_data_offset = vector_data_offset + vector_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_overlays,
            max_sdf_instances,
            max_vector_vertices,
            max_events,
            overlay_data_floats,
            sdf_data_floats,
            vector_data_floats,
            event_data_floats,
            overlay_data_offset,
            sdf_data_offset,
            vector_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &PageConfig) -> Self {
        Self::new(
            config.max_overlays,
            config.max_sdf_instances,
            config.max_vector_vertices,
            config.max_events,
        )
    }

    /// Header values written once at init: version and capacities.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_OVERLAYS] = self.max_overlays as f32;
        header[HEADER_MAX_SDF_INSTANCES] = self.max_sdf_instances as f32;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PageEvent;
    use crate::renderer::overlay_instance::OverlayInstance;
    use crate::renderer::sdf_instance::SDFInstance;

    #[test]
    fn wire_strides_match_structs() {
        assert_eq!(std::mem::size_of::<OverlayInstance>(), OVERLAY_FLOATS * 4);
        assert_eq!(std::mem::size_of::<SDFInstance>(), SDF_INSTANCE_FLOATS * 4);
        assert_eq!(std::mem::size_of::<PageEvent>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn from_default_config() {
        let layout = ProtocolLayout::from_config(&PageConfig::default());
        assert_eq!(layout.max_overlays, 64);
        assert_eq!(layout.max_sdf_instances, 512);
        assert_eq!(layout.max_vector_vertices, 65536);
        assert_eq!(layout.max_events, 32);

        let expected = HEADER_FLOATS + 64 * 8 + 512 * 16 + 65536 * 6 + 32 * 4;
        assert_eq!(layout.buffer_total_floats, expected);
        assert_eq!(layout.buffer_total_bytes, expected * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20, 30, 40);

        assert_eq!(layout.overlay_data_offset, HEADER_FLOATS);
        assert_eq!(layout.sdf_data_offset, layout.overlay_data_offset + layout.overlay_data_floats);
        assert_eq!(layout.vector_data_offset, layout.sdf_data_offset + layout.sdf_data_floats);
        assert_eq!(layout.event_data_offset, layout.vector_data_offset + layout.vector_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_carries_capacities() {
        let header = ProtocolLayout::new(8, 16, 32, 4).header();
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_OVERLAYS], 8.0);
        assert_eq!(header[HEADER_MAX_SDF_INSTANCES], 16.0);
        assert_eq!(header[HEADER_MAX_VECTOR_VERTICES], 32.0);
        assert_eq!(header[HEADER_MAX_EVENTS], 4.0);
        assert_eq!(header[HEADER_LOCK], 0.0);
    }
}
