//! Numbered progress frame output

use crate::io::configuration::FRAME_INDEX_WIDTH;
use crate::io::error::{QuadError, Result};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Writes captured frames into a directory as numbered PNG files
///
/// Frames are named with the zero-padded capture iteration, so
/// filename order equals capture order and files are never rewritten.
#[derive(Debug, Clone)]
pub struct FrameWriter {
    directory: PathBuf,
}

impl FrameWriter {
    /// Create a writer targeting the given directory
    ///
    /// The directory is created on the first save, not here.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Directory receiving the frames
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path a given capture iteration is saved under
    pub fn frame_path(&self, iteration: usize) -> PathBuf {
        self.directory
            .join(format!("{iteration:0width$}.png", width = FRAME_INDEX_WIDTH))
    }

    /// Save one captured frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame directory cannot be created or
    /// the image cannot be written.
    pub fn save(&self, frame: &RgbImage, iteration: usize) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).map_err(|e| QuadError::FileSystem {
            path: self.directory.clone(),
            operation: "create directory",
            source: e,
        })?;

        let path = self.frame_path(iteration);
        frame.save(&path).map_err(|e| QuadError::ImageExport {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}
