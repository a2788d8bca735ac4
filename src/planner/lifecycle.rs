//! Planner lifecycle - construction and state restore.

use super::LayoutPlanner;
use super::marquee::Deferred;
use crate::collection::Collection;
use crate::config::PlannerConfig;
use crate::events::EventBus;
use crate::input::CanvasGeometry;
use crate::perf::PLACEMENT_BUDGET_MS;
use crate::profile_scope;
use crate::saved::{SavedState, SavedWall};
use crate::store::StateStore;
use crate::surface::WallSurface;
use crate::types::IdAllocator;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

impl LayoutPlanner {
    /// An empty planner with the configured defaults. Nothing is read from
    /// or written to `store` until the first load or save.
    pub fn new(config: PlannerConfig, store: impl StateStore + 'static) -> Self {
        Self {
            wall: config.wall,
            collections: Vec::new(),
            grid_size: config.grid_size,
            frame_spacing: config.frame_spacing,
            background_image: None,
            new_collection: config.new_collection.clone(),
            ids: IdAllocator::new(),
            store: Box::new(store),
            events: EventBus::new(),
            deferred: VecDeque::new(),
            marquee: None,
            surface: WallSurface::new(),
            canvas: CanvasGeometry::default().with_scale(config.px_per_inch),
            active_drag: None,
            save_suspended: false,
            config,
        }
    }

    /// Build a planner and restore whatever `store` holds.
    pub fn open(config: PlannerConfig, store: impl StateStore + 'static) -> Self {
        let mut planner = Self::new(config, store);
        planner.load_state();
        planner
    }

    /// Replace the current wall with the persisted state.
    ///
    /// Never fails: a missing entry gives the defaults, an unreadable one is
    /// removed from the store and gives the defaults. Returns whether saved
    /// state was restored.
    pub fn load_state(&mut self) -> bool {
        profile_scope!("load_state", PLACEMENT_BUDGET_MS);

        self.save_suspended = true;
        let restored = self.restore_from_store();
        self.save_suspended = false;

        // Restored frames carry fresh ids; rewrite so the stored ids match
        if restored {
            self.save_state();
        }
        self.schedule(Deferred::UpdateMarquee);
        restored
    }

    fn restore_from_store(&mut self) -> bool {
        self.clear_wall_contents();
        let key = self.config.storage_key.clone();

        let json = match self.store.get(&key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                info!("No saved state found, using defaults");
                self.apply_defaults();
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved state, using defaults");
                self.apply_defaults();
                return false;
            }
        };

        match SavedState::from_json(&json) {
            Ok(saved) => {
                self.apply_saved(saved);
                true
            }
            Err(e) => {
                warn!(error = %e, "Corrupted saved state, discarding");
                if let Err(e) = self.store.remove(&key) {
                    warn!(error = %e, "Could not remove corrupted state");
                }
                self.apply_defaults();
                false
            }
        }
    }

    fn clear_wall_contents(&mut self) {
        self.collections.clear();
        self.surface.clear();
        self.deferred.clear();
        self.marquee = None;
        self.active_drag = None;
    }

    fn apply_defaults(&mut self) {
        self.wall = self.config.wall;
        self.grid_size = self.config.grid_size;
        self.frame_spacing = self.config.frame_spacing;
        self.background_image = None;
        self.new_collection = self.config.new_collection.clone();
    }

    fn apply_saved(&mut self, saved: SavedState) {
        self.apply_defaults();

        match saved.wall.and_then(SavedWall::to_wall) {
            Some(wall) => self.wall = wall,
            None => warn!(wall = ?saved.wall, "Invalid or missing saved wall, using default"),
        }
        self.background_image = saved.background_image_url;

        // Zero or missing values keep the defaults
        if let Some(grid) = saved.grid_size.filter(|g| g.is_finite() && *g > 0.0) {
            self.grid_size = grid;
        }
        if let Some(spacing) = saved.frame_spacing.filter(|s| s.is_finite() && *s > 0.0) {
            self.frame_spacing = spacing;
        }
        if let Some(spec) = saved.new_collection {
            self.new_collection = spec.sanitized();
        }

        for saved_collection in &saved.collections {
            if saved_collection.frame_count() == 0 {
                debug!("Skipping saved collection without frames");
                continue;
            }
            let id = self.ids.next_collection_id();
            let mut collection = Collection::restore(id, saved_collection, &mut self.ids);
            self.configure_frames(&mut collection);
            self.attach_collection(collection);
        }

        info!(
            collections = self.collections.len(),
            frames = self.frame_count(),
            wall_width = self.wall.width,
            wall_height = self.wall.height,
            "Saved state restored"
        );
    }
}
