//! Mathematical utilities for chart layout

/// Polar placement and bounding-box centering
pub mod geometry;
/// Conversions between physical units and pixels
pub mod units;
