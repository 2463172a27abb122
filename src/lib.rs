//! Adaptive quadtree approximation of raster images
//!
//! The system subdivides a source image into axis-aligned regions, each
//! represented by a single flat color, always refining the region whose
//! split promises the largest error reduction. Rendering the leaf
//! regions as the tree grows yields a sequence of progressively more
//! accurate flat-color approximations of the source.

#![forbid(unsafe_code)]

/// Subdivision scheduling and run orchestration
pub mod algorithm;
/// Color estimation and per-depth coverage statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Leaf rasterization with interchangeable fill shapes
pub mod render;
/// Regions and the arena-allocated quad tree
pub mod spatial;

pub use io::error::{QuadError, Result};
