//! Square pixel buffer the chart is drawn onto

use crate::io::configuration::ColorMode;
use image::{ExtendedColorType, GrayImage, Luma, Pixel, Rgb, RgbImage, Rgba, RgbaImage};

/// Background of a fresh canvas
pub const WHITE: [u8; 3] = [255, 255, 255];
/// Ink color for glyphs
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Drawing surface in the chart's color mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canvas {
    /// Luminance-only surface used by letter charts
    Grayscale(GrayImage),
    /// Color surface used by thumbnail charts
    Rgb(RgbImage),
}

// Visible part of a span starting at `origin` with length `len` inside [0, limit)
// as (offset into the span, first canvas index, count)
fn clip_span(origin: i64, len: u32, limit: u32) -> Option<(u32, u32, u32)> {
    let start = origin.max(0);
    let end = (origin + i64::from(len)).min(i64::from(limit));
    (start < end).then(|| ((start - origin) as u32, start as u32, (end - start) as u32))
}

fn luma(color: [u8; 3]) -> u8 {
    Rgb(color).to_luma().0[0]
}

impl Canvas {
    /// White square canvas of `size` pixels
    pub fn new(size: u32, mode: ColorMode) -> Self {
        match mode {
            ColorMode::Grayscale => {
                Self::Grayscale(GrayImage::from_pixel(size, size, Luma([luma(WHITE)])))
            }
            ColorMode::Rgb => Self::Rgb(RgbImage::from_pixel(size, size, Rgb(WHITE))),
        }
    }

    /// Color mode of the underlying buffer
    pub const fn color_mode(&self) -> ColorMode {
        match self {
            Self::Grayscale(_) => ColorMode::Grayscale,
            Self::Rgb(_) => ColorMode::Rgb,
        }
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Grayscale(img) => img.dimensions(),
            Self::Rgb(img) => img.dimensions(),
        }
    }

    /// Color at a pixel, expanded to RGB for grayscale canvases
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        match self {
            Self::Grayscale(img) => img.get_pixel_checked(x, y).map(|p| [p.0[0]; 3]),
            Self::Rgb(img) => img.get_pixel_checked(x, y).map(|p| p.0),
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: [u8; 3]) {
        let (canvas_w, canvas_h) = self.dimensions();
        let (Some((_, x0, w)), Some((_, y0, h))) =
            (clip_span(x, width, canvas_w), clip_span(y, height, canvas_h))
        else {
            return;
        };

        match self {
            Self::Grayscale(img) => {
                let value = luma(color);
                for py in y0..y0 + h {
                    for px in x0..x0 + w {
                        img.put_pixel(px, py, Luma([value]));
                    }
                }
            }
            Self::Rgb(img) => {
                for py in y0..y0 + h {
                    for px in x0..x0 + w {
                        img.put_pixel(px, py, Rgb(color));
                    }
                }
            }
        }
    }

    /// Paint `color` through a coverage mask whose top-left lands on `origin`
    pub fn draw_coverage(&mut self, mask: &GrayImage, origin: [i64; 2], color: [u8; 3]) {
        let (canvas_w, canvas_h) = self.dimensions();
        let (Some((sx, x0, w)), Some((sy, y0, h))) = (
            clip_span(origin[0], mask.width(), canvas_w),
            clip_span(origin[1], mask.height(), canvas_h),
        ) else {
            return;
        };

        for dy in 0..h {
            for dx in 0..w {
                let coverage = mask.get_pixel(sx + dx, sy + dy).0[0];
                let [r, g, b] = color;
                self.blend_pixel(x0 + dx, y0 + dy, Rgba([r, g, b, coverage]));
            }
        }
    }

    /// Composite an RGBA image using its alpha channel as the cutout mask
    pub fn composite(&mut self, image: &RgbaImage, origin: [i64; 2]) {
        let (canvas_w, canvas_h) = self.dimensions();
        let (Some((sx, x0, w)), Some((sy, y0, h))) = (
            clip_span(origin[0], image.width(), canvas_w),
            clip_span(origin[1], image.height(), canvas_h),
        ) else {
            return;
        };

        for dy in 0..h {
            for dx in 0..w {
                self.blend_pixel(x0 + dx, y0 + dy, *image.get_pixel(sx + dx, sy + dy));
            }
        }
    }

    // Source-over blend of `source` onto an opaque canvas pixel
    fn blend_pixel(&mut self, x: u32, y: u32, source: Rgba<u8>) {
        if source.0[3] == 0 {
            return;
        }
        match self {
            Self::Grayscale(img) => {
                if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
                    let mut blended = pixel.to_luma_alpha();
                    blended.blend(&source.to_luma_alpha());
                    *pixel = blended.to_luma();
                }
            }
            Self::Rgb(img) => {
                if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
                    let mut blended = pixel.to_rgba();
                    blended.blend(&source);
                    *pixel = blended.to_rgb();
                }
            }
        }
    }

    /// Raw samples with their encoder color type
    pub fn as_samples(&self) -> (&[u8], ExtendedColorType) {
        match self {
            Self::Grayscale(img) => (img.as_raw(), ExtendedColorType::L8),
            Self::Rgb(img) => (img.as_raw(), ExtendedColorType::Rgb8),
        }
    }

    /// Copy of the canvas as an RGB buffer
    pub fn to_rgb(&self) -> RgbImage {
        match self {
            Self::Grayscale(img) => image::DynamicImage::ImageLuma8(img.clone()).to_rgb8(),
            Self::Rgb(img) => img.clone(),
        }
    }
}
