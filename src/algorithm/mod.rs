//! Subdivision scheduling and run orchestration

/// Iteration stepping and the frame capture policy
pub mod executor;
/// Priority queue model deciding which quad splits next
pub mod scheduler;

pub use scheduler::{ModelConfig, Subdivision};
