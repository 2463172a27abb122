//! Color estimation and coverage statistics

/// Per-depth leaf coverage reporting
pub mod depth;
/// Histogram-based color and error estimation
pub mod histogram;
