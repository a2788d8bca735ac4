//! Transactional deletion.
//!
//! Every removal detaches the surface elements, drops the data, queues a
//! marquee refresh, persists, and then verifies nothing is left behind. A
//! failed verification is repaired on the spot and logged.

use super::LayoutPlanner;
use super::marquee::Deferred;
use crate::events::PlannerEvent;
use crate::types::{CollectionId, FrameId};
use tracing::{debug, error, info, warn};

impl LayoutPlanner {
    /// A frame's own delete control: announces the deletion, then removes it.
    pub fn remove_frame(&mut self, frame_id: FrameId) -> bool {
        let Some(frame) = self.frame_mut(frame_id) else {
            warn!(frame_id, "Remove requested for unknown frame");
            return false;
        };
        let collection_id = frame.collection_id();
        if let Some(deleted) = frame.remove() {
            self.events.publish(&deleted);
        }
        self.delete_frame(frame_id, collection_id)
    }

    /// Delete one frame. Removes the collection too if it ends up empty.
    /// Returns false if either id is unknown.
    pub fn delete_frame(&mut self, frame_id: FrameId, collection_id: CollectionId) -> bool {
        let Some(index) = self.collection_index(collection_id) else {
            warn!(frame_id, collection_id, "Collection not found for frame delete");
            return false;
        };
        let Some((mut frame, empty)) = self.collections[index].delete_frame(frame_id) else {
            warn!(frame_id, collection_id, "Frame not found in collection");
            return false;
        };

        if self.active_drag == Some(frame_id) {
            self.active_drag = None;
        }
        self.surface.detach_frame(frame_id);
        if let Some(deleted) = frame.remove() {
            self.events.publish(&deleted);
        }

        if let Some(empty) = empty {
            self.events.publish(&empty);
            self.remove_collection(collection_id, false);
        }

        self.schedule(Deferred::UpdateMarquee);
        self.save_state();
        self.verify_deletion(frame_id);
        info!(frame_id, collection_id, "Frame deleted");
        true
    }

    /// Delete a collection and all of its frames.
    pub fn delete_collection(&mut self, collection_id: CollectionId) -> bool {
        self.remove_collection(collection_id, true)
    }

    fn remove_collection(&mut self, collection_id: CollectionId, save: bool) -> bool {
        let Some(index) = self.collection_index(collection_id) else {
            warn!(collection_id, "Collection not found");
            return false;
        };
        let collection = self.collections.remove(index);

        for frame in collection.frames() {
            self.surface.detach_frame(frame.id());
            if self.active_drag == Some(frame.id()) {
                self.active_drag = None;
            }
        }
        self.surface.detach_legend(collection_id);
        self.deferred
            .retain(|task| *task != Deferred::RefreshPositions(collection_id));

        self.schedule(Deferred::UpdateMarquee);
        self.events
            .publish(&PlannerEvent::CollectionRemoved { collection_id });
        debug!(collection_id, frames = collection.len(), "Collection removed");

        if save {
            self.save_state();
        }
        true
    }

    /// Clear the wall. `include_background` also drops the background image.
    pub fn delete_all(&mut self, include_background: bool) {
        let removed: Vec<CollectionId> = self.collections.iter().map(|c| c.id()).collect();

        self.collections.clear();
        self.surface.clear();
        self.deferred.clear();
        self.active_drag = None;
        if include_background {
            self.background_image = None;
        }

        for collection_id in removed {
            self.events
                .publish(&PlannerEvent::CollectionRemoved { collection_id });
        }
        self.schedule(Deferred::UpdateMarquee);
        self.save_state();
        self.verify_all_deleted();
        info!(include_background, "All frames deleted");
    }

    fn verify_deletion(&mut self, frame_id: FrameId) {
        let in_data = self.collections.iter().any(|c| c.contains_frame(frame_id));
        let on_surface = self.surface.is_attached(frame_id);
        if !in_data && !on_surface {
            return;
        }

        error!(
            frame_id,
            in_data,
            on_surface,
            "Frame still present after deletion, forcing cleanup"
        );
        for collection in &mut self.collections {
            collection.purge_frame(frame_id);
        }
        self.surface.detach_frame(frame_id);
        self.save_state();
    }

    fn verify_all_deleted(&mut self) {
        if self.collections.is_empty() && self.surface.is_empty() {
            return;
        }
        error!(
            collections = self.collections.len(),
            attached = self.surface.attached_frames().len(),
            "Wall not empty after delete all, forcing cleanup"
        );
        self.collections.clear();
        self.surface.clear();
        self.save_state();
    }
}
