//! Best-effort assembly of captured frames into an animation

use crate::io::configuration::FRAME_EXTENSIONS;
use crate::io::error::{QuadError, Result, invalid_parameter, invalid_source};
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame};
use std::path::{Path, PathBuf};

/// Assemble the frame directory into an animated GIF
///
/// Frame files are taken in filename-sorted order, which equals
/// capture order for the writer's zero-padded names. Files with an
/// unrecognized extension are ignored; a recognized file that fails to
/// decode is skipped with a warning rather than aborting, since
/// assembly is a post-processing step over already-produced artifacts.
///
/// # Errors
///
/// Returns an error if `frame_rate` is zero, the frame directory
/// cannot be read, no frame decodes successfully, or the GIF cannot
/// be written.
// Allow print for user feedback on skipped frames
#[allow(clippy::print_stderr)]
pub fn assemble_animation(frames_dir: &Path, output_path: &Path, frame_rate: u32) -> Result<()> {
    if frame_rate == 0 {
        return Err(invalid_parameter(
            "frame_rate",
            &frame_rate,
            &"must be at least 1",
        ));
    }

    let mut frame_files = collect_frame_files(frames_dir)?;
    frame_files.sort();
    if frame_files.is_empty() {
        return Err(invalid_source(&format!(
            "no frame files found in '{}'",
            frames_dir.display()
        )));
    }

    let delay = Delay::from_numer_denom_ms(1000, frame_rate);
    let mut frames = Vec::with_capacity(frame_files.len());
    for file in &frame_files {
        match image::open(file) {
            Ok(img) => frames.push(Frame::from_parts(img.to_rgba8(), 0, 0, delay)),
            Err(err) => {
                eprintln!("Failed to read frame '{}': {err}", file.display());
            }
        }
    }
    if frames.is_empty() {
        return Err(invalid_source(&"no frame file could be decoded"));
    }

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| QuadError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = std::fs::File::create(output_path).map_err(|e| QuadError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let mut encoder = GifEncoder::new(file);
    encoder
        .encode_frames(frames)
        .map_err(|e| QuadError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

fn collect_frame_files(frames_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(frames_dir).map_err(|e| QuadError::FileSystem {
        path: frames_dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| QuadError::FileSystem {
                path: frames_dir.to_path_buf(),
                operation: "read directory",
                source: e,
            })?
            .path();

        let recognized = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let lower = ext.to_ascii_lowercase();
                FRAME_EXTENSIONS.iter().any(|&known| known == lower)
            });
        if recognized {
            files.push(path);
        }
    }
    Ok(files)
}
