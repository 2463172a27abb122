//! Iteration progress display for a subdivision run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ITERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the fixed iteration budget
///
/// Shows the current iteration against the budget and the latest
/// average error as the bar message. Trace lines are routed through
/// the bar so they print above it without tearing the display.
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a progress bar sized to the iteration budget
    pub fn new(iterations: usize) -> Self {
        let bar = ProgressBar::new(iterations as u64);
        bar.set_style(ITERATION_STYLE.clone());
        Self { bar }
    }

    /// Report the current iteration and average error
    pub fn update(&self, iteration: usize, average_error: f64) {
        self.bar.set_position(iteration as u64 + 1);
        self.bar.set_message(format!("err {average_error:.4}"));
    }

    /// Print a line above the bar
    pub fn println(&self, line: &str) {
        self.bar.println(line);
    }

    /// Clear the bar once the run finishes
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
