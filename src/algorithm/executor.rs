//! Iteration stepping with the error-drop frame capture policy

use crate::algorithm::scheduler::Subdivision;
use crate::io::error::{Result, invalid_parameter};

/// Result of advancing the subdivision by one iteration
#[derive(Debug, Clone, Copy)]
pub struct IterationOutcome {
    /// Zero-based iteration number
    pub iteration: usize,
    /// Area-weighted average error before this iteration's split
    pub average_error: f64,
    /// Whether this iteration was captured as a progress frame
    pub capture: bool,
}

/// Steps the subdivision model and decides when to capture frames
///
/// A frame is due on the first iteration and whenever the average
/// error has dropped by more than the configured threshold since the
/// last captured frame; the baseline only advances on capture. Capture
/// happens before the iteration's split so frames reflect the state
/// the reported error was measured on.
pub struct Executor {
    model: Subdivision,
    error_rate: f64,
    previous_error: Option<f64>,
    iteration: usize,
}

impl Executor {
    /// Wrap a subdivision model with a capture threshold
    ///
    /// # Errors
    ///
    /// Returns an error when `error_rate` is negative or not finite.
    pub fn new(model: Subdivision, error_rate: f64) -> Result<Self> {
        if !error_rate.is_finite() || error_rate < 0.0 {
            return Err(invalid_parameter(
                "error_rate",
                &error_rate,
                &"must be finite and non-negative",
            ));
        }
        Ok(Self {
            model,
            error_rate,
            previous_error: None,
            iteration: 0,
        })
    }

    /// The underlying subdivision model
    pub const fn model(&self) -> &Subdivision {
        &self.model
    }

    /// Advance the model by one split
    ///
    /// Reads the current average error, invokes `on_capture` with the
    /// pre-split model when a frame is due, then performs the split.
    ///
    /// # Errors
    ///
    /// Propagates failures from the capture callback and internal
    /// split failures; see [`Subdivision::split_next`].
    pub fn execute_iteration<F>(&mut self, mut on_capture: F) -> Result<IterationOutcome>
    where
        F: FnMut(&Subdivision, IterationOutcome) -> Result<()>,
    {
        let average_error = self.model.average_error();
        let capture = self
            .previous_error
            .is_none_or(|previous| previous - average_error > self.error_rate);

        let outcome = IterationOutcome {
            iteration: self.iteration,
            average_error,
            capture,
        };

        if capture {
            self.previous_error = Some(average_error);
            on_capture(&self.model, outcome)?;
        }

        self.model.split_next()?;
        self.iteration += 1;
        Ok(outcome)
    }
}
