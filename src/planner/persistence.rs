//! Saving and cross-tab validation.
//!
//! The store is shared with other planners (tabs, processes). Saves write
//! the whole document; validation reconciles the stored document against
//! what is actually attached to this planner's surface.

use super::LayoutPlanner;
use crate::events::PlannerEvent;
use crate::profile_scope;
use crate::saved::{SavedCollection, SavedState, SavedWall, StateMetadata};
use tracing::{debug, error, info, warn};

impl LayoutPlanner {
    /// Persisted form of the current wall. Empty collections are left out.
    pub fn to_saved_state(&self) -> SavedState {
        let collections: Vec<SavedCollection> = self
            .collections
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| c.serialize())
            .collect();
        let frame_count = collections.iter().map(SavedCollection::frame_count).sum();
        let collection_count = collections.len();

        SavedState {
            wall: Some(SavedWall::from(self.wall)),
            collections,
            new_collection: Some(self.new_collection.clone()),
            grid_size: Some(self.grid_size),
            frame_spacing: Some(self.frame_spacing),
            background_image_url: self.background_image.clone(),
            metadata: Some(StateMetadata::now(frame_count, collection_count)),
        }
    }

    /// Write the current state to the store. Returns whether it was written.
    pub fn save_state(&mut self) -> bool {
        if self.save_suspended {
            return false;
        }
        profile_scope!("save_state");

        let state = self.to_saved_state();
        let json = match state.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Could not encode state");
                return false;
            }
        };
        if let Err(e) = self.store.set(&self.config.storage_key, &json) {
            error!(error = %e, "Could not save state");
            return false;
        }

        let frame_count = state.frame_count();
        let collection_count = state.collections.len();
        debug!(frame_count, collection_count, "State saved");
        self.events.publish(&PlannerEvent::StateSaved {
            frame_count,
            collection_count,
        });
        true
    }

    /// Drop stored frames that are not attached to this planner's surface,
    /// and collections left with no frames. Rewrites the store only when
    /// something was dropped; returns whether it did.
    pub fn validate_saved_state(&mut self) -> bool {
        let key = &self.config.storage_key;
        let json = match self.store.get(key) {
            Ok(Some(json)) => json,
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, "Could not read state for validation");
                return false;
            }
        };
        let mut state = match SavedState::from_json(&json) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Stored state unreadable during validation");
                return false;
            }
        };

        let mut dropped_frames = 0;
        for collection in &mut state.collections {
            if let Some(frames) = collection.frames.as_mut() {
                let before = frames.len();
                frames.retain(|frame| frame.id.is_some_and(|id| self.surface.is_attached(id)));
                dropped_frames += before - frames.len();
            }
        }
        let before = state.collections.len();
        state.collections.retain(|c| c.frame_count() > 0);
        let dropped_collections = before - state.collections.len();

        if dropped_frames == 0 && dropped_collections == 0 {
            return false;
        }

        match state.to_json() {
            Ok(json) => {
                if let Err(e) = self.store.set(key, &json) {
                    error!(error = %e, "Could not rewrite validated state");
                    return false;
                }
            }
            Err(e) => {
                error!(error = %e, "Could not encode validated state");
                return false;
            }
        }
        info!(dropped_frames, dropped_collections, "Saved state validated and cleaned");
        true
    }
}
