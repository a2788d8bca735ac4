//! Coordinate conversion between client pixels and wall inches.
//!
//! The rendering surface draws the wall at a fixed scale with its top-left
//! corner at `(left, top)` in client coordinates.

use crate::constants::PX_PER_INCH;

/// Placement of the rendered wall in client space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub left: f64,
    pub top: f64,
    pub px_per_inch: f64,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            px_per_inch: PX_PER_INCH,
        }
    }
}

impl CanvasGeometry {
    pub fn new(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, px_per_inch: f64) -> Self {
        self.px_per_inch = px_per_inch;
        self
    }

    /// Client pixel position to wall inches
    #[inline]
    pub fn client_to_wall(&self, client: (f64, f64)) -> (f64, f64) {
        (
            (client.0 - self.left) / self.px_per_inch,
            (client.1 - self.top) / self.px_per_inch,
        )
    }

    /// Wall inches to client pixel position
    #[inline]
    pub fn wall_to_client(&self, wall: (f64, f64)) -> (f64, f64) {
        (
            wall.0 * self.px_per_inch + self.left,
            wall.1 * self.px_per_inch + self.top,
        )
    }

    /// Top-left of a frame being dragged, given the pointer and the anchor
    /// offset captured at pointer-down (both in client pixels).
    #[inline]
    pub fn drag_origin(&self, client: (f64, f64), anchor: (f64, f64)) -> (f64, f64) {
        (
            (client.0 - self.left - anchor.0) / self.px_per_inch,
            (client.1 - self.top - anchor.1) / self.px_per_inch,
        )
    }
}
