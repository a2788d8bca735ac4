//! Bounding marquee and the deferred work queue.
//!
//! The host renders asynchronously, so anything that should happen "after
//! the next paint" (re-broadcasting positions of a freshly attached
//! collection, recomputing the marquee) is queued and drained by
//! `run_deferred` once per animation frame.

use super::LayoutPlanner;
use crate::events::PlannerEvent;
use crate::geometry::{Marquee, bounding_marquee};
use crate::placement::FrameRects;
use crate::types::CollectionId;
use tracing::{debug, trace};

/// Work queued for the next animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Re-broadcast every frame position of a collection
    RefreshPositions(CollectionId),
    UpdateMarquee,
}

impl LayoutPlanner {
    /// Queue `task` unless an identical one is already waiting.
    pub(crate) fn schedule(&mut self, task: Deferred) {
        if !self.deferred.contains(&task) {
            self.deferred.push_back(task);
        }
    }

    /// Run the tasks queued so far. Tasks queued while running wait for the
    /// next call. Returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let tasks: Vec<Deferred> = self.deferred.drain(..).collect();
        for &task in &tasks {
            trace!(?task, "Running deferred task");
            match task {
                Deferred::RefreshPositions(collection_id) => self.refresh_positions(collection_id),
                Deferred::UpdateMarquee => {
                    self.compute_bounding_marquee();
                }
            }
        }
        tasks.len()
    }

    fn refresh_positions(&mut self, collection_id: CollectionId) {
        let Some(index) = self.collection_index(collection_id) else {
            debug!(collection_id, "Collection gone before position refresh");
            return;
        };
        let moves: Vec<PlannerEvent> = self.collections[index]
            .frames_mut()
            .iter_mut()
            .map(|frame| frame.update_position())
            .collect();

        self.batch_saves(|planner| {
            for event in moves {
                planner.dispatch(event);
            }
        });
        self.save_state();
    }

    /// Recompute the marquee around every valid frame. `None` means hide
    /// it. Subscribers hear about it only when it changed.
    pub fn compute_bounding_marquee(&mut self) -> Option<Marquee> {
        let marquee = bounding_marquee(&self.frame_rects());
        if marquee != self.marquee {
            self.marquee = marquee;
            let label = marquee.map_or_else(|| "hidden".to_string(), |m| m.label());
            debug!(%label, "Marquee updated");
            self.events.publish(&PlannerEvent::MarqueeChanged(marquee));
        }
        marquee
    }
}
