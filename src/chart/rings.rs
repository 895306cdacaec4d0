//! Evenly spaced element positions on concentric rings

use crate::io::configuration::RingSpec;
use crate::math::geometry::{polar_to_cartesian, ring_angles};

/// One element slot on a ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Ring index, innermost first
    pub ring: usize,
    /// Slot index around the ring, clockwise from 0°
    pub slot: usize,
    /// Angle of the slot in degrees
    pub angle_degrees: f64,
    /// Absolute canvas coordinates the element is centered on
    pub point: [f64; 2],
    /// Font size or thumbnail edge for this ring
    pub element_size: u32,
}

/// Ring geometry sharing a single center
#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    center: [f64; 2],
    rings: Vec<RingSpec>,
    per_ring: usize,
}

impl RingLayout {
    /// Layout of `rings` around `center` with `per_ring` slots each
    pub const fn new(center: [f64; 2], rings: Vec<RingSpec>, per_ring: usize) -> Self {
        Self {
            center,
            rings,
            per_ring,
        }
    }

    /// Shared center of every ring
    pub const fn center(&self) -> [f64; 2] {
        self.center
    }

    /// Ring specifications, innermost first
    pub fn rings(&self) -> &[RingSpec] {
        &self.rings
    }

    /// Number of rings
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Slots per ring
    pub const fn per_ring(&self) -> usize {
        self.per_ring
    }

    /// Placements of one ring in angular order; empty for an unknown ring
    pub fn placements(&self, ring: usize) -> Vec<Placement> {
        let Some(spec) = self.rings.get(ring) else {
            return Vec::new();
        };
        ring_angles(self.per_ring)
            .into_iter()
            .enumerate()
            .map(|(slot, angle_degrees)| Placement {
                ring,
                slot,
                angle_degrees,
                point: polar_to_cartesian(self.center, f64::from(spec.radius), angle_degrees),
                element_size: spec.element_size,
            })
            .collect()
    }
}
