/// A merge needs at least this many inputs.
pub const MIN_INPUTS: usize = 2;

/// Zoom levels requested for the output track.
pub const DEFAULT_ZOOM_LEVELS: u32 = 10;

/// Positions fetched from an input per request (128Ki values).
pub const DEFAULT_WINDOW_SIZE: u32 = 1 << 17;

pub const DEFAULT_BLOCK_SIZE: u32 = 256;
pub const DEFAULT_ITEMS_PER_SLOT: u32 = 1024;
