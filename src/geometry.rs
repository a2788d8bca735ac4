//! Rectangle geometry shared by placement, dragging and the marquee.
//!
//! All values are inches with the origin at the wall's top-left corner.
//! Two frames collide when their boxes, each inflated by the spacing, overlap
//! on both axes. The check is done on centers so it is symmetric by
//! construction.

use crate::constants::EPSILON;
use crate::types::FrameId;
use crate::units::format_measurement;

/// Read-only view of one frame's outer box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub id: FrameId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Offset that moves a colliding box clear of the frame it hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PushVector {
    pub dx: f64,
    pub dy: f64,
}

impl FrameRect {
    pub fn new(id: FrameId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    /// Same box moved to `(x, y)`
    pub fn at(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Signed center offsets to `other` and the inflated half extents.
    fn separation(&self, other: &FrameRect, spacing: f64) -> (f64, f64, f64, f64) {
        let (cx, cy) = self.center();
        let (ox, oy) = other.center();
        let half_w = (self.width + other.width) / 2.0 + spacing;
        let half_h = (self.height + other.height) / 2.0 + spacing;
        (cx - ox, cy - oy, half_w, half_h)
    }

    /// Inflated-rectangle overlap test.
    pub fn collides_with(&self, other: &FrameRect, spacing: f64) -> bool {
        let (dx, dy, half_w, half_h) = self.separation(other, spacing);
        dx.abs() < half_w && dy.abs() < half_h
    }

    /// Minimal push that separates `self` from `other`, or `None` if they do
    /// not collide. Pushes along the axis with the smaller overlap; on a tie
    /// pushes along every axis whose overlap is not negligible.
    pub fn push_away_from(&self, other: &FrameRect, spacing: f64) -> Option<PushVector> {
        let (dx, dy, half_w, half_h) = self.separation(other, spacing);
        if !(dx.abs() < half_w && dy.abs() < half_h) {
            return None;
        }

        let overlap_x = half_w - dx.abs();
        let overlap_y = half_h - dy.abs();
        let signed = |overlap: f64, delta: f64| if delta > 0.0 { overlap } else { -overlap };

        let mut push = PushVector::default();
        if overlap_x < overlap_y {
            push.dx = signed(overlap_x, dx);
        } else if overlap_y < overlap_x {
            push.dy = signed(overlap_y, dy);
        } else {
            if overlap_x.abs() > EPSILON {
                push.dx = signed(overlap_x, dx);
            }
            if overlap_y.abs() > EPSILON {
                push.dy = signed(overlap_y, dy);
            }
        }
        Some(push)
    }
}

/// Snap a coordinate to the grid. A grid of 0 (or less) passes through.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

// ============================================================================
// Bounding Marquee
// ============================================================================

/// Bounding box around every valid frame on the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Marquee {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Dimension label, e.g. `34.0" × 20.0"`
    pub fn label(&self) -> String {
        format!(
            "{} × {}",
            format_measurement(self.width()),
            format_measurement(self.height())
        )
    }
}

/// Computes the marquee over `rects`.
///
/// Returns `None` (hide the marquee) when there are no frames, when no frame
/// has finite coordinates and a positive size, or when the resulting box is
/// degenerate.
pub fn bounding_marquee(rects: &[FrameRect]) -> Option<Marquee> {
    if rects.is_empty() {
        return None;
    }

    let mut valid = rects
        .iter()
        .filter(|r| r.is_finite() && r.width > 0.0 && r.height > 0.0);

    let first = valid.next()?;
    let mut marquee = Marquee {
        min_x: first.x,
        min_y: first.y,
        max_x: first.right(),
        max_y: first.bottom(),
    };
    for rect in valid {
        marquee.min_x = marquee.min_x.min(rect.x);
        marquee.min_y = marquee.min_y.min(rect.y);
        marquee.max_x = marquee.max_x.max(rect.right());
        marquee.max_y = marquee.max_y.max(rect.bottom());
    }

    if marquee.width() <= 0.0 || marquee.height() <= 0.0 {
        tracing::warn!(
            width = marquee.width(),
            height = marquee.height(),
            "Non-positive marquee dimensions, hiding"
        );
        return None;
    }
    Some(marquee)
}
