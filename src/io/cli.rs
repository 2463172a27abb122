//! Command-line interface and run orchestration

use crate::algorithm::executor::{Executor, IterationOutcome};
use crate::algorithm::scheduler::{ModelConfig, Subdivision};
use crate::analysis::depth::DepthReport;
use crate::io::animation::assemble_animation;
use crate::io::configuration::{
    ANIMATION_PATH, CORNER_RADIUS_FRACTION, DEFAULT_AREA_POWER, DEFAULT_ERROR_RATE,
    DEFAULT_FILL_COLOR, DEFAULT_FRAME_RATE, DEFAULT_ITERATIONS, DEFAULT_LEAF_SIZE,
    DEFAULT_OUTPUT_SCALE, DEFAULT_PADDING, FRAMES_DIR, OUTPUT_PATH,
};
use crate::io::error::{QuadError, Result, invalid_parameter};
use crate::io::frames::FrameWriter;
use crate::io::image::SourceImage;
use crate::io::progress::ProgressTracker;
use crate::render::rasterizer::{FillMode, Rasterizer, RenderConfig};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Image file extensions the runner accepts as input
const INPUT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Parser)]
#[command(name = "quadart")]
#[command(
    author,
    version,
    about = "Approximate an image with a priority-refined quadtree"
)]
/// Command-line arguments for the approximation tool
pub struct Cli {
    /// Input JPEG or PNG image to approximate
    #[arg(value_name = "IMAGE")]
    pub input: PathBuf,

    /// Shape drawn for each leaf region
    #[arg(short, long, value_enum, default_value_t = FillMode::Rectangle)]
    pub mode: FillMode,

    /// Iteration budget for the subdivision loop
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Minimum region dimension at which a quad becomes a leaf
    #[arg(short, long, default_value_t = DEFAULT_LEAF_SIZE)]
    pub leaf_size: u32,

    /// Uniform padding around the rendered canvas in pixels
    #[arg(short, long, default_value_t = DEFAULT_PADDING)]
    pub padding: u32,

    /// Drop in average error required to capture a new frame
    #[arg(short, long, default_value_t = DEFAULT_ERROR_RATE)]
    pub error_rate: f64,

    /// Exponent weighting region area in the split priority
    #[arg(short, long, default_value_t = DEFAULT_AREA_POWER)]
    pub area_power: f64,

    /// Integer scale factor for output dimensions
    #[arg(short, long, default_value_t = DEFAULT_OUTPUT_SCALE)]
    pub output_scale: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip assembling captured frames into an animation
    #[arg(short, long)]
    pub no_animation: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates a subdivision run from decoded input to final outputs
pub struct ImageRunner {
    cli: Cli,
    progress: Option<ProgressTracker>,
}

impl ImageRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli
            .should_show_progress()
            .then(|| ProgressTracker::new(cli.iterations));

        Self { cli, progress }
    }

    /// Run the full approximation pipeline
    ///
    /// Subdivides for the configured iteration budget, capturing
    /// numbered frames as the error drops, then writes the final
    /// full-resolution render, prints the per-depth coverage table,
    /// and assembles the captured frames into an animation.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable input, invalid parameters, or a
    /// failed frame/output write. Animation assembly failures are
    /// reported as warnings, not errors.
    pub fn process(&mut self) -> Result<()> {
        self.validate_input()?;

        let source = SourceImage::open(&self.cli.input)?;
        let model = Subdivision::new(
            source,
            ModelConfig {
                leaf_size: self.cli.leaf_size,
                area_power: self.cli.area_power,
            },
        )?;
        let mut executor = Executor::new(model, self.cli.error_rate)?;
        let rasterizer = Rasterizer::new(RenderConfig {
            mode: self.cli.mode,
            output_scale: self.cli.output_scale,
            padding: self.cli.padding,
            fill_color: DEFAULT_FILL_COLOR,
            corner_fraction: CORNER_RADIUS_FRACTION,
        })?;
        let writer = FrameWriter::new(FRAMES_DIR);

        for _ in 0..self.cli.iterations {
            let progress = self.progress.as_ref();
            let outcome = executor.execute_iteration(|model, outcome| {
                let frame = rasterizer.render(model.tree(), None);
                writer.save(&frame, outcome.iteration)?;
                Self::print_trace(progress, outcome);
                Ok(())
            })?;
            if let Some(pm) = progress {
                pm.update(outcome.iteration, outcome.average_error);
            }
        }

        if let Some(pm) = self.progress.as_ref() {
            pm.finish();
        }

        let final_render = rasterizer.render(executor.model().tree(), None);
        final_render
            .save(OUTPUT_PATH)
            .map_err(|e| QuadError::ImageExport {
                path: PathBuf::from(OUTPUT_PATH),
                source: e,
            })?;

        Self::print_report(&DepthReport::from_tree(executor.model().tree()));

        if !self.cli.no_animation {
            self.assemble(writer.directory());
        }

        Ok(())
    }

    fn validate_input(&self) -> Result<()> {
        let recognized = self
            .cli
            .input
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let lower = ext.to_ascii_lowercase();
                INPUT_EXTENSIONS.iter().any(|&known| known == lower)
            });
        if !recognized {
            return Err(invalid_parameter(
                "input",
                &self.cli.input.display(),
                &"must be a JPEG or PNG image file",
            ));
        }
        Ok(())
    }

    // Allow print for the capture trace requested alongside each frame
    #[allow(clippy::print_stdout)]
    fn print_trace(progress: Option<&ProgressTracker>, outcome: IterationOutcome) {
        let line = format!("{:6} {:.4}", outcome.iteration, outcome.average_error);
        match progress {
            Some(pm) => pm.println(&line),
            None => println!("{line}"),
        }
    }

    // Allow print for the per-depth diagnostic table
    #[allow(clippy::print_stdout)]
    fn print_report(report: &DepthReport) {
        println!("{report}");
    }

    // Allow print for the non-fatal assembly warning
    #[allow(clippy::print_stderr)]
    fn assemble(&self, frames_dir: &Path) {
        if let Err(err) = assemble_animation(frames_dir, Path::new(ANIMATION_PATH), DEFAULT_FRAME_RATE)
        {
            eprintln!("Animation assembly skipped: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_for(input: &str) -> Cli {
        Cli::parse_from(["quadart", input])
    }

    #[test]
    fn test_single_positional_argument_parses_with_defaults() {
        let cli = cli_for("photo.png");
        assert_eq!(cli.input, PathBuf::from("photo.png"));
        assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
        assert_eq!(cli.leaf_size, DEFAULT_LEAF_SIZE);
        assert_eq!(cli.mode, FillMode::Rectangle);
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_wrong_argument_count_is_a_usage_error() {
        assert!(Cli::try_parse_from(["quadart"]).is_err());
        assert!(Cli::try_parse_from(["quadart", "a.png", "b.png"]).is_err());
    }

    #[test]
    fn test_non_image_input_is_rejected_before_processing() {
        let runner = ImageRunner::new(cli_for("document.pdf"));
        assert!(runner.validate_input().is_err());

        let runner = ImageRunner::new(cli_for("PHOTO.JPG"));
        assert!(runner.validate_input().is_ok());
    }
}
