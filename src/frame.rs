//! A single framed print: print area, uniform mat, uniform moulding.
//!
//! The outer size is always `print + 2 * mat + 2 * frame` on each axis. Bad
//! numeric input is coerced to 0 and logged rather than rejected, and any
//! divergence from the size formula is healed by recomputing it.

use crate::constants::{DIMENSION_TOLERANCE, EPSILON};
use crate::events::{FrameGeometry, PlannerEvent};
use crate::geometry::FrameRect;
use crate::input::FrameDragManager;
use crate::types::{CollectionId, FrameId, FrameMaterial, ImageRef};
use crate::units::{Centimeters, Inches, format_measurement};
use tracing::{debug, warn};

/// Measurements shared by every frame of a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    pub print_width: Inches,
    pub print_height: Inches,
    pub matt_width: Centimeters,
    pub frame_width: Inches,
}

impl FrameSpec {
    /// Outer width and height in inches
    pub fn outer_size(&self) -> (f64, f64) {
        let border = 2.0 * self.matt_width.to_inches().value() + 2.0 * self.frame_width.value();
        (
            self.print_width.value() + border,
            self.print_height.value() + border,
        )
    }
}

/// Text shown in the frame info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub print_size: String,
    pub matt_width: String,
    pub frame_width: String,
    pub total_size: String,
}

#[derive(Debug, Clone)]
pub struct Frame {
    id: FrameId,
    collection_id: CollectionId,
    print_width: f64,
    print_height: f64,
    matt_width_cm: f64,
    /// Mat width in inches, derived from `matt_width_cm`
    matt_width: f64,
    frame_width: f64,
    width: f64,
    height: f64,
    x: f64,
    y: f64,
    color: String,
    material: FrameMaterial,
    thumbnail: Option<ImageRef>,
    drag: FrameDragManager,
    removed: bool,
}

fn finite_or_zero(value: f64, field: &'static str, frame_id: FrameId) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(frame_id, field, value, "Non-finite frame input coerced to 0");
        0.0
    }
}

impl Frame {
    pub fn new(
        id: FrameId,
        collection_id: CollectionId,
        spec: &FrameSpec,
        position: (f64, f64),
        color: impl Into<String>,
        material: FrameMaterial,
    ) -> Self {
        let print_width = finite_or_zero(spec.print_width.value(), "print_width", id);
        let print_height = finite_or_zero(spec.print_height.value(), "print_height", id);
        let matt_width_cm = finite_or_zero(spec.matt_width.value(), "matt_width", id);
        let frame_width = finite_or_zero(spec.frame_width.value(), "frame_width", id);
        let matt_width = Centimeters(matt_width_cm).to_inches().value();

        let mut frame = Self {
            id,
            collection_id,
            print_width,
            print_height,
            matt_width_cm,
            matt_width,
            frame_width,
            width: print_width + 2.0 * matt_width + 2.0 * frame_width,
            height: print_height + 2.0 * matt_width + 2.0 * frame_width,
            x: finite_or_zero(position.0, "x", id),
            y: finite_or_zero(position.1, "y", id),
            color: color.into(),
            material,
            thumbnail: None,
            drag: FrameDragManager::new(),
            removed: false,
        };
        frame.validate_dimensions();
        debug!(
            frame_id = id,
            collection_id,
            x = frame.x,
            y = frame.y,
            width = frame.width,
            height = frame.height,
            "Frame created"
        );
        frame
    }

    /// Outer size the formula demands for the current measurements.
    pub fn expected_size(&self) -> (f64, f64) {
        let border = 2.0 * self.matt_width + 2.0 * self.frame_width;
        (self.print_width + border, self.print_height + border)
    }

    /// Recompute the outer size if it drifted from the formula. Returns
    /// whether a correction was applied.
    pub fn validate_dimensions(&mut self) -> bool {
        let (expected_w, expected_h) = self.expected_size();
        if (self.width - expected_w).abs() > DIMENSION_TOLERANCE
            || (self.height - expected_h).abs() > DIMENSION_TOLERANCE
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            warn!(
                frame_id = self.id,
                width = self.width,
                height = self.height,
                expected_w,
                expected_h,
                "Frame size mismatch, recomputing"
            );
            self.width = expected_w;
            self.height = expected_h;
            return true;
        }
        false
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn collection_id(&self) -> CollectionId {
        self.collection_id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn print_width(&self) -> f64 {
        self.print_width
    }

    pub fn print_height(&self) -> f64 {
        self.print_height
    }

    /// Mat width in inches
    pub fn matt_width(&self) -> f64 {
        self.matt_width
    }

    pub fn matt_width_cm(&self) -> f64 {
        self.matt_width_cm
    }

    pub fn frame_width(&self) -> f64 {
        self.frame_width
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn material(&self) -> FrameMaterial {
        self.material
    }

    pub fn thumbnail(&self) -> Option<&ImageRef> {
        self.thumbnail.as_ref()
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn drag_manager(&self) -> &FrameDragManager {
        &self.drag
    }

    pub fn drag_manager_mut(&mut self) -> &mut FrameDragManager {
        &mut self.drag
    }

    pub fn rect(&self) -> FrameRect {
        FrameRect::new(self.id, self.x, self.y, self.width, self.height)
    }

    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            print_width: self.print_width,
            print_height: self.print_height,
            matt_width: self.matt_width,
            frame_width: self.frame_width,
        }
    }

    /// Move without notifying. Callers follow up with `update_position`.
    pub(crate) fn set_position(&mut self, x: f64, y: f64) {
        self.x = finite_or_zero(x, "x", self.id);
        self.y = finite_or_zero(y, "y", self.id);
    }

    /// Broadcast the current position. Always yields exactly one move
    /// notification, even when nothing changed.
    pub fn update_position(&mut self) -> PlannerEvent {
        self.validate_dimensions();
        PlannerEvent::FrameMoved {
            frame_id: self.id,
            collection_id: self.collection_id,
            geometry: self.geometry(),
        }
    }

    /// Store a thumbnail reference from the image collaborator.
    pub fn apply_thumbnail(&mut self, image: ImageRef) -> PlannerEvent {
        self.thumbnail = Some(image);
        PlannerEvent::FrameUpdated {
            frame_id: self.id,
            collection_id: self.collection_id,
            thumbnail: self.thumbnail.clone(),
        }
    }

    /// Restore a persisted thumbnail without notifying.
    pub(crate) fn restore_thumbnail(&mut self, image: Option<ImageRef>) {
        self.thumbnail = image;
    }

    /// Change the snapping grid and re-snap. Notifies only if the position
    /// actually changed.
    pub fn set_grid_size(&mut self, size: f64) -> Option<PlannerEvent> {
        self.drag.set_grid_size(size);
        let snapped_x = self.drag.snap(self.x);
        let snapped_y = self.drag.snap(self.y);
        if (snapped_x - self.x).abs() > EPSILON || (snapped_y - self.y).abs() > EPSILON {
            self.set_position(snapped_x, snapped_y);
            return Some(self.update_position());
        }
        None
    }

    pub fn set_min_distance(&mut self, distance: f64) {
        self.drag.set_min_distance(distance);
    }

    /// Announce deletion. Only the first call notifies.
    pub fn remove(&mut self) -> Option<PlannerEvent> {
        if self.removed {
            return None;
        }
        self.removed = true;
        self.drag.end();
        Some(PlannerEvent::FrameDeleted {
            frame_id: self.id,
            collection_id: self.collection_id,
        })
    }

    pub fn info(&self) -> FrameInfo {
        FrameInfo {
            print_size: format!(
                "{} × {}",
                format_measurement(self.print_width),
                format_measurement(self.print_height)
            ),
            matt_width: format!("{:.1}cm", self.matt_width_cm),
            frame_width: format!(
                "{}mm ({})",
                (self.frame_width * 25.4).round(),
                format_measurement(self.frame_width)
            ),
            total_size: format!(
                "{} × {}",
                format_measurement(self.width),
                format_measurement(self.height)
            ),
        }
    }
}
