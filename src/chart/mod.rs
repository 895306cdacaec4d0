//! Chart drawing: canvas, rings, selection and composition

/// Solid frame along the canvas edges
pub mod border;
/// Pixel buffer with clipped drawing primitives
pub mod canvas;
/// Sequential composition of a whole chart
pub mod composer;
/// Evenly spaced ring placements
pub mod rings;
/// Letter and thumbnail selection policies
pub mod selection;
