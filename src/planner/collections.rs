//! Collection and wall management - adding collections, settings changes,
//! wall edits and event dispatch.

use super::LayoutPlanner;
use super::marquee::Deferred;
use crate::collection::{Collection, CollectionSpec, PlacementContext};
use crate::constants::{
    BACKGROUND_IMAGE_FIXED_HEIGHT_METERS, DEFAULT_GRID_SIZE, FALLBACK_MIN_DISTANCE,
    METERS_TO_INCHES,
};
use crate::events::PlannerEvent;
use crate::input::CanvasGeometry;
use crate::perf::PLACEMENT_BUDGET_MS;
use crate::placement::FrameRects;
use crate::profile_scope;
use crate::types::{CollectionId, FrameId, ImageRef, Wall};
use tracing::{debug, info, warn};

impl LayoutPlanner {
    // ========================================================================
    // Collections
    // ========================================================================

    /// Create a collection from `spec`, place its frames around everything
    /// already on the wall and persist.
    pub fn add_collection(&mut self, spec: &CollectionSpec) -> CollectionId {
        profile_scope!("add_collection", PLACEMENT_BUDGET_MS);

        let existing = self.frame_rects();
        let id = self.ids.next_collection_id();
        let ctx = PlacementContext {
            wall: self.wall,
            spacing: self.frame_spacing,
            spiral_rows: self.config.spiral_rows,
            existing: &existing,
        };
        let mut collection = Collection::new(id, spec, &ctx, &mut self.ids);
        self.configure_frames(&mut collection);

        self.batch_saves(|planner| {
            planner.attach_collection(collection);
        });
        self.save_state();
        id
    }

    /// Add a collection from the "new collection" form spec.
    pub fn add_collection_from_form(&mut self) -> CollectionId {
        let spec = self.new_collection.clone();
        self.add_collection(&spec)
    }

    /// Replace the form spec and persist it.
    pub fn set_new_collection(&mut self, spec: CollectionSpec) {
        self.new_collection = spec.sanitized();
        self.save_state();
    }

    /// Give every frame of `collection` the planner's grid and spacing.
    /// Positions are left as they are.
    pub(crate) fn configure_frames(&self, collection: &mut Collection) {
        for frame in collection.frames_mut() {
            frame.drag_manager_mut().set_grid_size(self.grid_size);
            frame.set_min_distance(self.frame_spacing);
        }
    }

    /// Put a built collection on the wall: attach its elements, broadcast
    /// each frame's position and queue the follow-up refresh.
    pub(crate) fn attach_collection(&mut self, mut collection: Collection) {
        let id = collection.id();
        for frame in collection.frames() {
            self.surface.attach_frame(frame.id());
        }
        self.surface.attach_legend(id);

        let moves = collection.add_to_wall();
        let frame_count = collection.len();
        self.collections.push(collection);

        for event in moves {
            self.dispatch(event);
        }
        self.schedule(Deferred::RefreshPositions(id));
        self.dispatch(PlannerEvent::CollectionAdded {
            collection_id: id,
            frame_count,
        });
        debug!(collection_id = id, frame_count, "Collection attached");
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Change the snapping grid for every frame and re-snap positions.
    /// 0 disables snapping; NaN or negative keeps the current grid.
    pub fn update_grid_size(&mut self, size: f64) {
        self.grid_size = if size.is_nan() || size < 0.0 {
            let fallback = if self.grid_size > 0.0 {
                self.grid_size
            } else {
                DEFAULT_GRID_SIZE
            };
            warn!(input = size, fallback, "Invalid grid size");
            fallback
        } else {
            size
        };

        let grid = self.grid_size;
        let moves: Vec<PlannerEvent> = self
            .collections
            .iter_mut()
            .flat_map(|c| c.frames_mut().iter_mut())
            .filter_map(|frame| frame.set_grid_size(grid))
            .collect();
        info!(grid_size = grid, resnapped = moves.len(), "Grid size updated");

        self.batch_saves(|planner| {
            for event in moves {
                planner.dispatch(event);
            }
        });
        self.save_state();
    }

    /// Change the minimum distance between frames. Non-positive input falls
    /// back to one inch.
    pub fn update_frame_spacing(&mut self, spacing: f64) {
        self.frame_spacing = if spacing > 0.0 && spacing.is_finite() {
            spacing
        } else {
            warn!(input = spacing, "Invalid frame spacing, using fallback");
            FALLBACK_MIN_DISTANCE
        };
        let spacing = self.frame_spacing;
        for frame in self
            .collections
            .iter_mut()
            .flat_map(|c| c.frames_mut().iter_mut())
        {
            frame.set_min_distance(spacing);
        }
        info!(frame_spacing = spacing, "Frame spacing updated");
        self.save_state();
    }

    // ========================================================================
    // Frames
    // ========================================================================

    /// Store a thumbnail on a frame. Returns false for unknown frames.
    pub fn set_thumbnail(&mut self, frame_id: FrameId, image: ImageRef) -> bool {
        let Some(frame) = self.frame_mut(frame_id) else {
            warn!(frame_id, "Thumbnail for unknown frame");
            return false;
        };
        let updated = frame.apply_thumbnail(image);
        self.dispatch(updated);
        true
    }

    // ========================================================================
    // Wall
    // ========================================================================

    /// Resize the wall. Non-finite or non-positive sizes are ignored.
    pub fn set_wall_dimensions(&mut self, width: f64, height: f64) -> bool {
        let wall = Wall::new(width, height);
        if !wall.is_valid() {
            warn!(width, height, "Ignoring invalid wall dimensions");
            return false;
        }
        self.resize_wall(wall);
        true
    }

    /// Use an image as the wall. The wall takes a fixed real-world height
    /// and the image's aspect ratio.
    pub fn set_background_image(
        &mut self,
        image: ImageRef,
        natural_width: f64,
        natural_height: f64,
    ) -> bool {
        if !(natural_width.is_finite() && natural_height.is_finite())
            || natural_width <= 0.0
            || natural_height <= 0.0
        {
            warn!(natural_width, natural_height, "Ignoring background image without a size");
            return false;
        }
        let height = BACKGROUND_IMAGE_FIXED_HEIGHT_METERS * METERS_TO_INCHES;
        let width = (natural_width / natural_height) * height;

        self.background_image = Some(image);
        self.resize_wall(Wall::new(width, height));
        true
    }

    /// Drop the background image. The wall keeps its size.
    pub fn clear_background_image(&mut self) {
        if self.background_image.take().is_some() {
            debug!("Background image cleared");
            self.save_state();
        }
    }

    fn resize_wall(&mut self, wall: Wall) {
        self.wall = wall;
        info!(width = wall.width, height = wall.height, "Wall resized");
        self.dispatch(PlannerEvent::WallResized {
            width: wall.width,
            height: wall.height,
        });
    }

    /// Where the host draws the wall, for pointer conversion.
    pub fn set_canvas_geometry(&mut self, canvas: CanvasGeometry) {
        self.canvas = canvas;
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// React to a notification, then hand it to subscribers.
    pub(crate) fn dispatch(&mut self, event: PlannerEvent) {
        match &event {
            PlannerEvent::FrameMoved { .. } => {
                self.schedule(Deferred::UpdateMarquee);
                self.save_state();
            }
            PlannerEvent::FrameUpdated { .. } | PlannerEvent::WallResized { .. } => {
                self.save_state();
            }
            _ => {}
        }
        self.events.publish(&event);
    }

    /// Run `f` with saving suspended. The caller saves afterwards.
    pub(crate) fn batch_saves(&mut self, f: impl FnOnce(&mut Self)) {
        let was_suspended = std::mem::replace(&mut self.save_suspended, true);
        f(self);
        self.save_suspended = was_suspended;
    }
}
