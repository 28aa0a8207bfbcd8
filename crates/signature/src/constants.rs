/// Largest backing-store dimension accepted on resize. Not a magic number - may change.
pub const MAX_SURFACE_SIZE: u32 = 8192;

/// Dab spacing as a fraction of the dab diameter.
pub const DAB_SPACING: f32 = 0.2;

/// Smallest spacing between dabs, in device pixels.
pub const MIN_DAB_SPACING: f32 = 0.25;

/// Smallest rasterized dab radius, keeps hairline strokes visible.
pub const MIN_DAB_RADIUS: f32 = 0.5;

/// Upper bound on dabs stamped for one segment.
pub const MAX_SEGMENT_DABS: u32 = 16_384;
