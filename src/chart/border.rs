//! Solid frame along the canvas edges

use crate::chart::canvas::Canvas;
use crate::io::configuration::BorderSpec;
use crate::math::units::mm_to_pixels;

/// Axis-aligned strip as (x, y, width, height)
pub type Strip = (u32, u32, u32, u32);

/// Top, bottom, left and right strips of `thickness` pixels on a `width` x `height` canvas
///
/// Thickness is clamped so strips never extend past the canvas.
pub fn border_strips(width: u32, height: u32, thickness: u32) -> [Strip; 4] {
    let horizontal = thickness.min(height);
    let vertical = thickness.min(width);
    [
        (0, 0, width, horizontal),
        (0, height - horizontal, width, horizontal),
        (0, 0, vertical, height),
        (width - vertical, 0, vertical, height),
    ]
}

/// Draw the border described by `spec` and return its thickness in pixels
///
/// Nothing is drawn when the thickness rounds to zero pixels.
pub fn draw_border(canvas: &mut Canvas, dpi: u32, spec: &BorderSpec) -> u32 {
    let thickness = mm_to_pixels(dpi, spec.thickness_mm);
    if thickness == 0 {
        return 0;
    }

    let (width, height) = canvas.dimensions();
    for (x, y, w, h) in border_strips(width, height, thickness) {
        canvas.fill_rect(i64::from(x), i64::from(y), w, h, spec.color);
    }
    thickness
}
