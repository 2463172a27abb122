//! Leaf rendering into flat-color raster snapshots

use crate::io::configuration::{
    CORNER_RADIUS_FRACTION, DEFAULT_FILL_COLOR, DEFAULT_OUTPUT_SCALE, DEFAULT_PADDING,
};
use crate::io::error::{Result, invalid_parameter};
use crate::render::shapes::{fill_ellipse, fill_rect, fill_rounded_rect};
use crate::spatial::quad::QuadTree;
use clap::ValueEnum;
use image::RgbImage;

/// Shape drawn for each leaf region
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillMode {
    /// Axis-aligned rectangle covering the leaf box
    #[default]
    Rectangle,
    /// Ellipse inscribed in the leaf box
    Ellipse,
    /// Rectangle with quarter-circle corners
    RoundedRectangle,
}

/// Parameters controlling rendered output
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Shape drawn for each leaf
    pub mode: FillMode,
    /// Integer scale factor applied to output dimensions
    pub output_scale: u32,
    /// Uniform padding around the scaled content, in pixels
    pub padding: u32,
    /// Background fill color
    pub fill_color: [u8; 3],
    /// Rounded-corner radius as a fraction of the smaller scaled
    /// box dimension
    pub corner_fraction: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: FillMode::Rectangle,
            output_scale: DEFAULT_OUTPUT_SCALE,
            padding: DEFAULT_PADDING,
            fill_color: DEFAULT_FILL_COLOR,
            corner_fraction: CORNER_RADIUS_FRACTION,
        }
    }
}

/// Renders the current leaves of a quad tree into an image
pub struct Rasterizer {
    config: RenderConfig,
}

impl Rasterizer {
    /// Create a rasterizer from validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error when `output_scale` is zero or
    /// `corner_fraction` is negative or not finite.
    pub fn new(config: RenderConfig) -> Result<Self> {
        if config.output_scale == 0 {
            return Err(invalid_parameter(
                "output_scale",
                &config.output_scale,
                &"must be at least 1",
            ));
        }
        if !config.corner_fraction.is_finite() || config.corner_fraction < 0.0 {
            return Err(invalid_parameter(
                "corner_fraction",
                &config.corner_fraction,
                &"must be finite and non-negative",
            ));
        }
        Ok(Self { config })
    }

    /// The configuration this rasterizer renders with
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the tree's leaves at an optional depth ceiling
    ///
    /// The canvas covers the source dimensions scaled by the output
    /// factor plus uniform padding on all sides, filled with the
    /// background color. Each leaf shape is inset by one pixel on its
    /// right and bottom edges so adjacent quads never share a seam.
    /// Output is fully deterministic for a given tree state and
    /// configuration.
    pub fn render(&self, tree: &QuadTree, max_depth: Option<usize>) -> RgbImage {
        let scale = self.config.output_scale;
        let pad = self.config.padding;

        let (source_width, source_height) = tree
            .get(tree.root())
            .map_or((0, 0), |root| (root.region.width(), root.region.height()));

        let canvas_width = source_width * scale + 2 * pad;
        let canvas_height = source_height * scale + 2 * pad;
        let mut canvas = RgbImage::from_pixel(
            canvas_width.max(1),
            canvas_height.max(1),
            image::Rgb(self.config.fill_color),
        );

        for id in tree.collect_leaves(max_depth) {
            let Some(quad) = tree.get(id) else {
                continue;
            };
            let region = quad.region;
            if region.is_empty() {
                continue;
            }

            // Scaled box, inclusive, with the seam inset on right/bottom
            let x0 = region.left * scale + pad;
            let y0 = region.top * scale + pad;
            let x1 = region.right * scale + pad - 1;
            let y1 = region.bottom * scale + pad - 1;

            match self.config.mode {
                FillMode::Rectangle => fill_rect(&mut canvas, x0, y0, x1, y1, quad.color),
                FillMode::Ellipse => fill_ellipse(&mut canvas, x0, y0, x1, y1, quad.color),
                FillMode::RoundedRectangle => {
                    let radius = self.config.corner_fraction
                        * f64::from(region.width().min(region.height()) * scale);
                    fill_rounded_rect(&mut canvas, x0, y0, x1, y1, radius, quad.color);
                }
            }
        }

        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::image::SourceImage;

    fn half_and_half_tree() -> QuadTree {
        let mut pixels = Vec::with_capacity(8 * 8 * 3);
        for _y in 0..8 {
            for x in 0..8 {
                let value = if x < 4 { 255 } else { 0 };
                pixels.extend_from_slice(&[value, value, value]);
            }
        }
        let source = SourceImage::from_rgb(8, 8, &pixels).unwrap();
        let mut tree = QuadTree::new(&source, 4).unwrap();
        tree.split(tree.root(), &source).unwrap();
        tree
    }

    #[test]
    fn test_canvas_dimensions_follow_scale_and_padding() {
        let tree = half_and_half_tree();
        let rasterizer = Rasterizer::new(RenderConfig {
            output_scale: 3,
            padding: 2,
            ..RenderConfig::default()
        })
        .unwrap();

        let canvas = rasterizer.render(&tree, None);
        assert_eq!(canvas.width(), 8 * 3 + 4);
        assert_eq!(canvas.height(), 8 * 3 + 4);
    }

    #[test]
    fn test_rectangles_take_leaf_colors_and_abut_exactly() {
        let tree = half_and_half_tree();
        let rasterizer = Rasterizer::new(RenderConfig {
            fill_color: [9, 9, 9],
            ..RenderConfig::default()
        })
        .unwrap();

        let canvas = rasterizer.render(&tree, None);
        // Left half renders white, right half black
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(6, 6).0, [0, 0, 0]);
        // The right/bottom inset makes neighbors abut without overlap:
        // the last white column is 3, the first black column is 4
        assert_eq!(canvas.get_pixel(3, 0).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(4, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_padding_border_shows_background() {
        let tree = half_and_half_tree();
        let rasterizer = Rasterizer::new(RenderConfig {
            padding: 2,
            fill_color: [9, 9, 9],
            ..RenderConfig::default()
        })
        .unwrap();

        let canvas = rasterizer.render(&tree, None);
        assert_eq!(canvas.get_pixel(0, 0).0, [9, 9, 9]);
        assert_eq!(canvas.get_pixel(11, 11).0, [9, 9, 9]);
        assert_eq!(canvas.get_pixel(2, 2).0, [255, 255, 255]);
    }

    #[test]
    fn test_depth_ceiling_renders_coarse_tree() {
        let tree = half_and_half_tree();
        let rasterizer = Rasterizer::new(RenderConfig::default()).unwrap();

        let coarse = rasterizer.render(&tree, Some(0));
        // At depth 0 only the root renders: a single mid-gray rectangle
        let root_color = coarse.get_pixel(0, 0).0;
        assert_eq!(coarse.get_pixel(6, 6).0, root_color);
    }

    #[test]
    fn test_render_is_deterministic() {
        let tree = half_and_half_tree();
        let config = RenderConfig {
            mode: FillMode::RoundedRectangle,
            output_scale: 2,
            ..RenderConfig::default()
        };
        let rasterizer = Rasterizer::new(config).unwrap();

        let first = rasterizer.render(&tree, None);
        let second = rasterizer.render(&tree, None);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(
            Rasterizer::new(RenderConfig {
                output_scale: 0,
                ..RenderConfig::default()
            })
            .is_err()
        );
        assert!(
            Rasterizer::new(RenderConfig {
                corner_fraction: f64::NAN,
                ..RenderConfig::default()
            })
            .is_err()
        );
    }
}
