//! Physical size conversions driven by print resolution

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Pixel count covering `inches` at `dpi`, truncated toward zero
///
/// Negative or non-finite lengths produce zero pixels.
pub fn inches_to_pixels(dpi: u32, inches: f64) -> u32 {
    let pixels = f64::from(dpi) * inches;
    if pixels.is_finite() && pixels > 0.0 {
        pixels.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Pixel count covering `millimetres` at `dpi`
///
/// Halfway cases round to the even neighbour so 0.5 px never grows a border.
pub fn mm_to_pixels(dpi: u32, millimetres: f64) -> u32 {
    let pixels = (f64::from(dpi) * millimetres / MM_PER_INCH).round_ties_even();
    if pixels.is_finite() && pixels > 0.0 {
        pixels.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Physical length in millimetres of `pixels` printed at `dpi`
pub fn pixels_to_mm(dpi: u32, pixels: u32) -> f64 {
    if dpi == 0 {
        return 0.0;
    }
    f64::from(pixels) / f64::from(dpi) * MM_PER_INCH
}
