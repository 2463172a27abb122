//! Representative color and approximation error from region histograms

use crate::io::error::{Result, computation_error};

/// Perceptual luma coefficients weighting per-channel error (R, G, B)
pub const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Number of buckets in a single channel frequency table
pub const HISTOGRAM_BUCKETS: usize = 256;

/// Per-channel pixel-value frequency tables for one region
///
/// Ephemeral: computed on demand from the source image while a quad is
/// constructed, never persisted.
#[derive(Debug, Clone)]
pub struct RegionHistogram {
    channels: [[u32; HISTOGRAM_BUCKETS]; 3],
}

impl Default for RegionHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionHistogram {
    /// Create an empty histogram
    pub const fn new() -> Self {
        Self {
            channels: [[0; HISTOGRAM_BUCKETS]; 3],
        }
    }

    /// Count one RGB pixel into the per-channel tables
    pub fn accumulate(&mut self, pixel: [u8; 3]) {
        for (table, value) in self.channels.iter_mut().zip(pixel) {
            if let Some(bucket) = table.get_mut(value as usize) {
                *bucket += 1;
            }
        }
    }

    /// Total number of pixels counted per channel
    pub fn pixel_count(&self) -> u64 {
        self.channels
            .first()
            .map_or(0, |table| table.iter().map(|&f| u64::from(f)).sum())
    }

    /// Estimate the representative color and approximation error
    ///
    /// Each channel independently yields its frequency-weighted mean
    /// (rounded into the color) and the frequency-weighted standard
    /// deviation of bucket values around that mean. The scalar error is
    /// the luma-weighted combination of the three deviations.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram counts no pixels. Callers
    /// construct quads only over non-empty regions, so this indicates
    /// an internal invariant violation rather than bad input.
    pub fn estimate(&self) -> Result<([u8; 3], f64)> {
        let mut color = [0u8; 3];
        let mut error = 0.0;

        for ((table, weight), component) in self
            .channels
            .iter()
            .zip(LUMA_WEIGHTS)
            .zip(color.iter_mut())
        {
            let (mean, deviation) = weighted_mean_deviation(table).ok_or_else(|| {
                computation_error("histogram estimate", &"empty region histogram")
            })?;
            *component = mean.round() as u8;
            error += deviation * weight;
        }

        Ok((color, error))
    }
}

/// Frequency-weighted mean and standard deviation over one table
///
/// Returns `None` when the table is empty.
fn weighted_mean_deviation(table: &[u32; HISTOGRAM_BUCKETS]) -> Option<(f64, f64)> {
    let total: u64 = table.iter().map(|&f| u64::from(f)).sum();
    if total == 0 {
        return None;
    }

    let total = total as f64;
    let mean = table
        .iter()
        .enumerate()
        .map(|(value, &frequency)| value as f64 * f64::from(frequency))
        .sum::<f64>()
        / total;

    let variance = table
        .iter()
        .enumerate()
        .map(|(value, &frequency)| f64::from(frequency) * (mean - value as f64).powi(2))
        .sum::<f64>()
        / total;

    Some((mean, variance.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_region_has_zero_error() {
        let mut histogram = RegionHistogram::new();
        for _ in 0..64 {
            histogram.accumulate([40, 120, 200]);
        }

        let (color, error) = histogram.estimate().unwrap();
        assert_eq!(color, [40, 120, 200]);
        assert!(error.abs() < 1e-9);
        assert_eq!(histogram.pixel_count(), 64);
    }

    #[test]
    fn test_bimodal_region_splits_the_difference() {
        let mut histogram = RegionHistogram::new();
        histogram.accumulate([0, 0, 0]);
        histogram.accumulate([255, 255, 255]);
        histogram.accumulate([0, 0, 0]);
        histogram.accumulate([255, 255, 255]);

        let (color, error) = histogram.estimate().unwrap();
        // Weighted mean of {0, 255} lands between 127 and 128
        for component in color {
            assert!(component == 127 || component == 128);
        }
        // Standard deviation is 127.5 per channel; luma weights sum to ~1
        assert!((error - 127.5).abs() < 0.2);
    }

    #[test]
    fn test_empty_histogram_is_rejected() {
        let histogram = RegionHistogram::new();
        assert!(histogram.estimate().is_err());
    }

    #[test]
    fn test_luma_weighting_favors_green() {
        let mut green_spread = RegionHistogram::new();
        let mut blue_spread = RegionHistogram::new();
        for _ in 0..8 {
            green_spread.accumulate([100, 0, 100]);
            green_spread.accumulate([100, 255, 100]);
            blue_spread.accumulate([100, 100, 0]);
            blue_spread.accumulate([100, 100, 255]);
        }

        let (_, green_error) = green_spread.estimate().unwrap();
        let (_, blue_error) = blue_spread.estimate().unwrap();
        assert!(green_error > blue_error);
    }
}
