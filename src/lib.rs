//! Procedural generator for parody eye charts
//!
//! A fixation glyph sits at the center of a square canvas, surrounded by
//! concentric rings of randomly chosen letters or thumbnail images that grow
//! outward. The finished chart is exported as PNG, WebP and/or PDF.

#![forbid(unsafe_code)]

/// Canvas, ring layout, element selection and composition
pub mod chart;
/// Configuration, resource loading, export and the command-line interface
pub mod io;
/// Geometry and unit conversion helpers
pub mod math;

pub use io::error::{ChartError, Result};
