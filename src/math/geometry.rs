//! Polar-to-Cartesian placement for ring elements

/// Angle in degrees between neighbouring elements of a ring holding `count` elements
///
/// An empty ring has no spacing and yields `0.0`.
pub fn angle_step_degrees(count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    360.0 / count as f64
}

/// Evenly spaced angles starting at 0° for a ring of `count` elements
pub fn ring_angles(count: usize) -> Vec<f64> {
    let step = angle_step_degrees(count);
    (0..count).map(|slot| slot as f64 * step).collect()
}

/// Convert a polar offset around `center` into absolute canvas coordinates
///
/// Angles grow clockwise on screen because the canvas y axis points down.
pub fn polar_to_cartesian(center: [f64; 2], radius: f64, angle_degrees: f64) -> [f64; 2] {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    [radius.mul_add(cos, center[0]), radius.mul_add(sin, center[1])]
}

/// Top-left pixel of a `width` x `height` box whose center sits on `point`
pub fn centered_origin(point: [f64; 2], width: u32, height: u32) -> [i64; 2] {
    [
        (point[0] - f64::from(width) / 2.0).round() as i64,
        (point[1] - f64::from(height) / 2.0).round() as i64,
    ]
}

/// Like [`centered_origin`] but truncating toward zero, as raster pastes place images
pub fn truncated_origin(point: [f64; 2], width: u32, height: u32) -> [i64; 2] {
    [
        (point[0] - f64::from(width) / 2.0).trunc() as i64,
        (point[1] - f64::from(height) / 2.0).trunc() as i64,
    ]
}
