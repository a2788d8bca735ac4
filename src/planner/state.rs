//! Planner state - the LayoutPlanner struct and read accessors.

use super::marquee::Deferred;
use crate::collection::{Collection, CollectionSpec};
use crate::config::PlannerConfig;
use crate::events::EventBus;
use crate::frame::Frame;
use crate::geometry::{FrameRect, Marquee};
use crate::input::CanvasGeometry;
use crate::placement::FrameRects;
use crate::store::StateStore;
use crate::surface::WallSurface;
use crate::types::{CollectionId, FrameId, IdAllocator, ImageRef, Wall};
use std::collections::VecDeque;
use tracing::warn;

/// The aggregate root: every collection on the wall plus the wall itself,
/// the snapping/spacing settings and the persistence sink.
///
/// All frames are reachable only through their collection; the planner is
/// the single source of truth for "every frame on the wall".
pub struct LayoutPlanner {
    pub(crate) config: PlannerConfig,
    pub(crate) wall: Wall,
    /// In wall (insertion) order
    pub(crate) collections: Vec<Collection>,
    pub(crate) grid_size: f64,
    pub(crate) frame_spacing: f64,
    pub(crate) background_image: Option<ImageRef>,
    /// Spec the "add collection" form currently holds
    pub(crate) new_collection: CollectionSpec,
    pub(crate) ids: IdAllocator,
    pub(crate) store: Box<dyn StateStore>,
    pub(crate) events: EventBus,
    pub(crate) deferred: VecDeque<Deferred>,
    /// Last computed marquee; `None` when hidden
    pub(crate) marquee: Option<Marquee>,
    pub(crate) surface: WallSurface,
    pub(crate) canvas: CanvasGeometry,
    /// Frame currently held by the pointer
    pub(crate) active_drag: Option<FrameId>,
    /// Set while restoring or batching so intermediate states are not written
    pub(crate) save_suspended: bool,
}

impl LayoutPlanner {
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn wall(&self) -> Wall {
        self.wall
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, collection_id: CollectionId) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id() == collection_id)
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn frame_spacing(&self) -> f64 {
        self.frame_spacing
    }

    pub fn background_image(&self) -> Option<&ImageRef> {
        self.background_image.as_ref()
    }

    pub fn new_collection(&self) -> &CollectionSpec {
        &self.new_collection
    }

    /// Marquee as of the last deferred update
    pub fn marquee(&self) -> Option<Marquee> {
        self.marquee
    }

    pub fn surface(&self) -> &WallSurface {
        &self.surface
    }

    pub fn canvas(&self) -> CanvasGeometry {
        self.canvas
    }

    pub fn active_drag(&self) -> Option<FrameId> {
        self.active_drag
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Every frame on the wall, collection by collection.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.collections.iter().flat_map(|c| c.frames())
    }

    pub fn frame(&self, frame_id: FrameId) -> Option<&Frame> {
        self.collections.iter().find_map(|c| c.frame(frame_id))
    }

    pub fn frame_count(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }

    pub(crate) fn frame_mut(&mut self, frame_id: FrameId) -> Option<&mut Frame> {
        self.collections
            .iter_mut()
            .find_map(|c| c.frame_mut(frame_id))
    }

    pub(crate) fn collection_index(&self, collection_id: CollectionId) -> Option<usize> {
        self.collections.iter().position(|c| c.id() == collection_id)
    }
}

impl FrameRects for LayoutPlanner {
    /// Rects of every frame on the wall. Frames with non-finite geometry
    /// are skipped and logged.
    fn frame_rects(&self) -> Vec<FrameRect> {
        self.frames()
            .map(Frame::rect)
            .filter(|rect| {
                let ok = rect.is_finite();
                if !ok {
                    warn!(frame_id = rect.id, "Skipping frame with invalid geometry");
                }
                ok
            })
            .collect()
    }
}
