//! Source image decoding and region histogram scans

use crate::analysis::histogram::RegionHistogram;
use crate::io::error::{QuadError, Result, invalid_source};
use crate::spatial::region::Region;
use ndarray::Array3;
use std::path::Path;

/// Decoded source image held as a dense pixel array
///
/// Pixels are stored as an `Array3<u8>` with shape
/// (height, width, channel) so region scans walk contiguous rows. The
/// image is immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct SourceImage {
    data: Array3<u8>,
    width: u32,
    height: u32,
}

impl SourceImage {
    /// Load a source image from a JPEG or PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded, or if
    /// the decoded image has a zero dimension.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| QuadError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgb_img = img.to_rgb8();

        let (width, height) = (rgb_img.width(), rgb_img.height());
        if width == 0 || height == 0 {
            return Err(invalid_source(&"source image has a zero dimension"));
        }

        let mut data = Array3::zeros((height as usize, width as usize, 3));
        for (x, y, pixel) in rgb_img.enumerate_pixels() {
            for (c, &value) in pixel.0.iter().enumerate() {
                if let Some(cell) = data.get_mut((y as usize, x as usize, c)) {
                    *cell = value;
                }
            }
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a source image from raw RGB bytes in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the buffer length is
    /// not `width * height * 3`.
    pub fn from_rgb(width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_source(&"source image has a zero dimension"));
        }
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(invalid_source(&format!(
                "pixel buffer holds {} bytes, expected {expected}",
                pixels.len()
            )));
        }

        let data = Array3::from_shape_vec(
            (height as usize, width as usize, 3),
            pixels.to_vec(),
        )
        .map_err(|e| invalid_source(&e))?;

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width of the source image in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source image in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Region covering the entire image
    pub const fn full_region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Scan a region into per-channel frequency tables
    ///
    /// Coordinates outside the image contribute nothing; quads are
    /// constructed inside the image bounds by construction.
    pub fn region_histogram(&self, region: &Region) -> RegionHistogram {
        let mut histogram = RegionHistogram::new();

        for y in region.top..region.bottom {
            for x in region.left..region.right {
                let pixel = [
                    self.channel_value(x, y, 0),
                    self.channel_value(x, y, 1),
                    self.channel_value(x, y, 2),
                ];
                histogram.accumulate(pixel);
            }
        }

        histogram
    }

    fn channel_value(&self, x: u32, y: u32, channel: usize) -> u8 {
        self.data
            .get((y as usize, x as usize, channel))
            .copied()
            .unwrap_or(0)
    }
}
