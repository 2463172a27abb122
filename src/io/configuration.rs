//! Algorithm constants and runtime configuration defaults

/// Default iteration budget for a subdivision run
pub const DEFAULT_ITERATIONS: usize = 1024 * 12;

/// Default minimum region dimension below which a quad becomes a leaf
pub const DEFAULT_LEAF_SIZE: u32 = 4;

/// Default exponent weighting region area in the split priority score
pub const DEFAULT_AREA_POWER: f64 = 0.25;

/// Default drop in average error required to capture a new frame
pub const DEFAULT_ERROR_RATE: f64 = 0.5;

/// Default integer scale factor applied to output dimensions
pub const DEFAULT_OUTPUT_SCALE: u32 = 1;

/// Default uniform padding around the rendered canvas, in pixels
pub const DEFAULT_PADDING: u32 = 0;

/// Default background fill color for rendered output
pub const DEFAULT_FILL_COLOR: [u8; 3] = [0, 0, 0];

/// Corner radius of rounded rectangles as a fraction of the smaller
/// scaled box dimension
pub const CORNER_RADIUS_FRACTION: f64 = 0.25;

/// Default frame rate for the assembled animation
pub const DEFAULT_FRAME_RATE: u32 = 4;

// Output settings
/// Directory receiving captured progress frames
pub const FRAMES_DIR: &str = "frames";
/// Zero-padded width of frame file numbers
pub const FRAME_INDEX_WIDTH: usize = 6;
/// Path of the final full-resolution render
pub const OUTPUT_PATH: &str = "output.png";
/// Path of the assembled progress animation
pub const ANIMATION_PATH: &str = "output.gif";

/// File extensions recognized as raster frames during assembly
pub const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

// Progress bar display settings
/// Width of the iteration progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
