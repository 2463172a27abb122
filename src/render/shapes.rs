//! Clamped scanline fills for the three leaf shapes
//!
//! All boxes are inclusive pixel spans on a canvas; fills clamp to the
//! canvas bounds and degenerate spans are skipped.

use image::{Rgb, RgbImage};

/// Fill an axis-aligned rectangle
pub fn fill_rect(canvas: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 3]) {
    if x1 < x0 || y1 < y0 {
        return;
    }
    let x_end = x1.min(canvas.width().saturating_sub(1));
    let y_end = y1.min(canvas.height().saturating_sub(1));

    for y in y0..=y_end {
        for x in x0..=x_end {
            canvas.put_pixel(x, y, Rgb(color));
        }
    }
}

/// Fill the ellipse inscribed in a box
///
/// Scanline fill: each row covers the horizontal chord of the ellipse
/// at that row's center.
pub fn fill_ellipse(canvas: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 3]) {
    if x1 < x0 || y1 < y0 {
        return;
    }

    let center_x = f64::from(x0 + x1) / 2.0;
    let center_y = f64::from(y0 + y1) / 2.0;
    let radius_x = f64::from(x1 - x0) / 2.0;
    let radius_y = f64::from(y1 - y0) / 2.0;

    let y_end = y1.min(canvas.height().saturating_sub(1));
    for y in y0..=y_end {
        let offset = if radius_y == 0.0 {
            0.0
        } else {
            (f64::from(y) - center_y) / radius_y
        };
        let span = 1.0 - offset * offset;
        if span < 0.0 {
            continue;
        }

        let half_width = radius_x * span.sqrt();
        let row_start = (center_x - half_width).ceil().max(0.0) as u32;
        let row_end = (center_x + half_width).floor() as u32;
        fill_rect(canvas, row_start, y, row_end, y, color);
    }
}

/// Fill a rectangle with rounded corners
///
/// Built from four corner circles clipped by two perpendicular strips:
/// quarter-circles survive at the corners, the strips cover the body.
/// `radius` is clamped so the circle diameter never exceeds the box.
pub fn fill_rounded_rect(
    canvas: &mut RgbImage,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    radius: f64,
    color: [u8; 3],
) {
    if x1 < x0 || y1 < y0 {
        return;
    }

    let width = x1 - x0;
    let height = y1 - y0;
    let diameter = (radius * 2.0)
        .min(f64::from(width))
        .min(f64::from(height))
        .max(0.0) as u32;
    let corner = diameter / 2;

    fill_ellipse(canvas, x0, y0, x0 + diameter, y0 + diameter, color);
    fill_ellipse(canvas, x1 - diameter, y0, x1, y0 + diameter, color);
    fill_ellipse(canvas, x0, y1 - diameter, x0 + diameter, y1, color);
    fill_ellipse(canvas, x1 - diameter, y1 - diameter, x1, y1, color);
    fill_rect(canvas, x0, y0 + corner, x1, y1 - corner, color);
    fill_rect(canvas, x0 + corner, y0, x1 - corner, y1, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: [u8; 3] = [200, 10, 10];

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::new(width, height)
    }

    fn is_ink(canvas: &RgbImage, x: u32, y: u32) -> bool {
        canvas.get_pixel(x, y).0 == INK
    }

    #[test]
    fn test_rect_fill_covers_exact_box() {
        let mut canvas = blank(10, 10);
        fill_rect(&mut canvas, 2, 3, 5, 6, INK);

        assert!(is_ink(&canvas, 2, 3));
        assert!(is_ink(&canvas, 5, 6));
        assert!(!is_ink(&canvas, 1, 3));
        assert!(!is_ink(&canvas, 6, 6));
        assert!(!is_ink(&canvas, 2, 7));
    }

    #[test]
    fn test_rect_fill_clamps_to_canvas() {
        let mut canvas = blank(4, 4);
        fill_rect(&mut canvas, 2, 2, 100, 100, INK);
        assert!(is_ink(&canvas, 3, 3));
    }

    #[test]
    fn test_ellipse_misses_box_corners() {
        // Odd pixel span keeps the center row and column on the grid
        let mut canvas = blank(24, 24);
        fill_ellipse(&mut canvas, 0, 0, 20, 20, INK);

        assert!(is_ink(&canvas, 10, 10));
        assert!(is_ink(&canvas, 0, 10));
        assert!(is_ink(&canvas, 10, 0));
        assert!(is_ink(&canvas, 20, 10));
        assert!(!is_ink(&canvas, 0, 0));
        assert!(!is_ink(&canvas, 20, 20));
        assert!(!is_ink(&canvas, 0, 20));
    }

    #[test]
    fn test_ellipse_degenerates_to_pixel() {
        let mut canvas = blank(4, 4);
        fill_ellipse(&mut canvas, 1, 1, 1, 1, INK);
        assert!(is_ink(&canvas, 1, 1));
        assert!(!is_ink(&canvas, 2, 1));
    }

    #[test]
    fn test_rounded_rect_rounds_corners_keeps_edges() {
        let mut canvas = blank(24, 24);
        fill_rounded_rect(&mut canvas, 0, 0, 19, 19, 5.0, INK);

        assert!(is_ink(&canvas, 10, 10));
        // Edge midpoints survive the rounding
        assert!(is_ink(&canvas, 10, 0));
        assert!(is_ink(&canvas, 0, 10));
        // Extreme corners are shaved off
        assert!(!is_ink(&canvas, 0, 0));
        assert!(!is_ink(&canvas, 19, 0));
        assert!(!is_ink(&canvas, 0, 19));
        assert!(!is_ink(&canvas, 19, 19));
    }

    #[test]
    fn test_rounded_rect_with_zero_radius_is_rect() {
        let mut rounded = blank(12, 12);
        let mut plain = blank(12, 12);
        fill_rounded_rect(&mut rounded, 1, 1, 10, 10, 0.0, INK);
        fill_rect(&mut plain, 1, 1, 10, 10, INK);
        assert_eq!(rounded.as_raw(), plain.as_raw());
    }
}
