//! A group of frames sharing one print/mat/moulding spec.
//!
//! A collection owns its frames outright. New collections run initial
//! placement against every frame already on the wall; restored collections
//! take their persisted positions verbatim.

use crate::constants::{
    DEFAULT_FRAME_WIDTH_MM, DEFAULT_MATT_WIDTH_CM, DEFAULT_PRINT_HEIGHT, DEFAULT_PRINT_WIDTH,
};
use crate::events::PlannerEvent;
use crate::frame::{Frame, FrameSpec};
use crate::placement::{FrameRects, PlacementParams, place_frames};
use crate::saved::{SavedCollection, SavedFrame};
use crate::types::{CollectionId, FrameId, FrameMaterial, IdAllocator, Wall};
use crate::units::{Centimeters, Inches, format_measurement, mm_to_inches, round_to};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// User-supplied spec for a new collection (the "new collection" form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSpec {
    pub print_width: Inches,
    pub print_height: Inches,
    pub matt_width: Centimeters,
    pub frame_width: Inches,
    #[serde(default)]
    pub frame_material: FrameMaterial,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_count")]
    pub count: f64,
}

fn default_count() -> f64 {
    1.0
}

impl Default for CollectionSpec {
    fn default() -> Self {
        Self {
            print_width: Inches(DEFAULT_PRINT_WIDTH),
            print_height: Inches(DEFAULT_PRINT_HEIGHT),
            matt_width: Centimeters(DEFAULT_MATT_WIDTH_CM),
            frame_width: mm_to_inches(DEFAULT_FRAME_WIDTH_MM),
            frame_material: FrameMaterial::Black,
            color: None,
            count: default_count(),
        }
    }
}

impl CollectionSpec {
    pub fn new(print_width: f64, print_height: f64, matt_width_cm: f64, frame_width: f64) -> Self {
        Self {
            print_width: Inches(print_width),
            print_height: Inches(print_height),
            matt_width: Centimeters(matt_width_cm),
            frame_width: Inches(frame_width),
            ..Self::default()
        }
    }

    pub fn with_count(mut self, count: f64) -> Self {
        self.count = count;
        self
    }

    pub fn with_material(mut self, material: FrameMaterial) -> Self {
        self.frame_material = material;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Copy with every non-finite length set to 0 and a non-finite count
    /// set to 1, so the spec always serializes to numbers.
    pub fn sanitized(&self) -> Self {
        let length = |value: f64, field: &'static str| {
            if value.is_finite() {
                value
            } else {
                warn!(field, value, "Non-finite collection input coerced to 0");
                0.0
            }
        };
        Self {
            print_width: Inches(length(self.print_width.value(), "print_width")),
            print_height: Inches(length(self.print_height.value(), "print_height")),
            matt_width: Centimeters(length(self.matt_width.value(), "matt_width")),
            frame_width: Inches(length(self.frame_width.value(), "frame_width")),
            count: if self.count.is_finite() { self.count } else { 1.0 },
            ..self.clone()
        }
    }

    /// Requested frame count as `max(1, round(count))`.
    pub fn frame_count(&self) -> usize {
        if !self.count.is_finite() {
            warn!(count = self.count, "Non-finite frame count, using 1");
            return 1;
        }
        self.count.round().max(1.0) as usize
    }

    pub fn frame_spec(&self) -> FrameSpec {
        FrameSpec {
            print_width: self.print_width,
            print_height: self.print_height,
            matt_width: self.matt_width,
            frame_width: self.frame_width,
        }
    }
}

/// Random `#RRGGBB` color for collections created without one.
pub fn random_color() -> String {
    let mut rng = rand::thread_rng();
    format!("#{:06X}", rng.gen_range(0..=0xFF_FFFFu32))
}

/// Construction context: where frames go and what they must avoid.
pub struct PlacementContext<'a> {
    pub wall: Wall,
    pub spacing: f64,
    pub spiral_rows: usize,
    pub existing: &'a dyn FrameRects,
}

#[derive(Debug, Clone)]
pub struct Collection {
    id: CollectionId,
    print_width: f64,
    print_height: f64,
    /// Inches
    matt_width: f64,
    frame_width: f64,
    frame_material: FrameMaterial,
    color: String,
    count: usize,
    frames: Vec<Frame>,
}

impl Collection {
    /// Build a collection and place its frames on the wall.
    pub fn new(
        id: CollectionId,
        spec: &CollectionSpec,
        ctx: &PlacementContext<'_>,
        ids: &mut IdAllocator,
    ) -> Self {
        let mut collection = Self::empty(id, spec);
        let frame_spec = collection.frame_spec();
        let (total_w, total_h) = frame_spec.outer_size();

        let frame_ids: Vec<FrameId> = (0..collection.count).map(|_| ids.next_frame_id()).collect();
        let params = PlacementParams {
            wall: ctx.wall,
            frame_width: total_w,
            frame_height: total_h,
            spacing: ctx.spacing,
            spiral_rows: ctx.spiral_rows,
        };
        let positions = place_frames(&params, &frame_ids, ctx.existing);

        collection.frames = frame_ids
            .into_iter()
            .zip(positions)
            .map(|(frame_id, position)| {
                Frame::new(
                    frame_id,
                    id,
                    &frame_spec,
                    position,
                    collection.color.clone(),
                    collection.frame_material,
                )
            })
            .collect();

        info!(
            collection_id = id,
            frames = collection.frames.len(),
            total_w,
            total_h,
            "Collection created"
        );
        collection
    }

    /// Rebuild a collection from persisted data. Positions are taken as-is.
    pub fn restore(id: CollectionId, saved: &SavedCollection, ids: &mut IdAllocator) -> Self {
        let spec = CollectionSpec {
            print_width: saved.print_width,
            print_height: saved.print_height,
            matt_width: saved.matt_width,
            frame_width: saved.frame_width,
            frame_material: saved.frame_material,
            color: saved.color.clone(),
            count: saved.frame_count() as f64,
        };
        let mut collection = Self::empty(id, &spec);
        let frame_spec = collection.frame_spec();

        collection.frames = saved
            .frames
            .iter()
            .flatten()
            .map(|saved_frame| {
                let mut frame = Frame::new(
                    ids.next_frame_id(),
                    id,
                    &frame_spec,
                    (saved_frame.x, saved_frame.y),
                    collection.color.clone(),
                    collection.frame_material,
                );
                frame.restore_thumbnail(saved_frame.thumbnail_image.clone());
                frame
            })
            .collect();
        collection.count = collection.frames.len();

        debug!(collection_id = id, frames = collection.frames.len(), "Collection restored");
        collection
    }

    fn empty(id: CollectionId, spec: &CollectionSpec) -> Self {
        let spec = spec.sanitized();
        Self {
            id,
            print_width: spec.print_width.value(),
            print_height: spec.print_height.value(),
            matt_width: spec.matt_width.to_inches().value(),
            frame_width: spec.frame_width.value(),
            frame_material: spec.frame_material,
            color: spec.color.clone().unwrap_or_else(random_color),
            count: spec.frame_count(),
            frames: Vec::new(),
        }
    }

    /// Spec handed to each frame. Mat goes back to centimeters.
    fn frame_spec(&self) -> FrameSpec {
        FrameSpec {
            print_width: Inches(self.print_width),
            print_height: Inches(self.print_height),
            matt_width: Inches(self.matt_width).to_cm(),
            frame_width: Inches(self.frame_width),
        }
    }

    pub fn id(&self) -> CollectionId {
        self.id
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

    pub fn frame_width(&self) -> f64 {
        self.frame_width
    }

    pub fn frame_material(&self) -> FrameMaterial {
        self.frame_material
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Frame count requested at construction
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, frame_id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id() == frame_id)
    }

    pub fn frame_mut(&mut self, frame_id: FrameId) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id() == frame_id)
    }

    pub fn contains_frame(&self, frame_id: FrameId) -> bool {
        self.frame(frame_id).is_some()
    }

    /// Persisted form. Mat width is written in centimeters, 2 decimals.
    pub fn serialize(&self) -> SavedCollection {
        SavedCollection {
            print_width: Inches(self.print_width),
            print_height: Inches(self.print_height),
            matt_width: Centimeters(round_to(Inches(self.matt_width).to_cm().value(), 2)),
            frame_width: Inches(self.frame_width),
            color: Some(self.color.clone()),
            frame_material: self.frame_material,
            frames: Some(
                self.frames
                    .iter()
                    .map(|frame| SavedFrame {
                        id: Some(frame.id()),
                        x: frame.x(),
                        y: frame.y(),
                        thumbnail_image: frame.thumbnail().cloned(),
                    })
                    .collect(),
            ),
        }
    }

    /// Drop a frame from this collection. Returns the removed frame and,
    /// if it was the last one, a `CollectionEmpty` notification.
    pub fn delete_frame(&mut self, frame_id: FrameId) -> Option<(Frame, Option<PlannerEvent>)> {
        let index = self.frames.iter().position(|f| f.id() == frame_id)?;
        let frame = self.frames.remove(index);
        debug!(collection_id = self.id, frame_id, remaining = self.frames.len(), "Frame removed");

        let empty = self.frames.is_empty().then(|| {
            info!(collection_id = self.id, "Collection is now empty");
            PlannerEvent::CollectionEmpty {
                collection_id: self.id,
            }
        });
        Some((frame, empty))
    }

    /// Drop every copy of `frame_id` without notifying. Returns how many
    /// were removed.
    pub(crate) fn purge_frame(&mut self, frame_id: FrameId) -> usize {
        let before = self.frames.len();
        self.frames.retain(|f| f.id() != frame_id);
        before - self.frames.len()
    }

    /// Initial position broadcast: one move notification per frame, in
    /// order. The planner follows up with a deferred refresh.
    pub fn add_to_wall(&mut self) -> Vec<PlannerEvent> {
        self.frames.iter_mut().map(Frame::update_position).collect()
    }

    /// Legend text, e.g. `16.0" × 20.0" (3 frames)`.
    pub fn legend_label(&self) -> String {
        format!(
            "{} × {} ({} frames)",
            format_measurement(self.print_width),
            format_measurement(self.print_height),
            self.frames.len()
        )
    }
}
