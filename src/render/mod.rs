//! Leaf rasterization with interchangeable fill shapes

/// Leaf rendering into raster snapshots
pub mod rasterizer;
/// Clamped scanline fills for the leaf shapes
pub mod shapes;

pub use rasterizer::{FillMode, Rasterizer, RenderConfig};
