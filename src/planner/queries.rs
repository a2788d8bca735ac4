//! Read-only queries: quotes, suggestions, frame info, subscriptions.

use super::LayoutPlanner;
use crate::error::PlannerResult;
use crate::events::PlannerEvent;
use crate::frame::FrameInfo;
use crate::pricing::{PriceCalculator, PriceSummary};
use crate::suggestion::{self, FrameSnapshot, Suggestion, SuggestionRequest};
use crate::types::FrameId;
use std::sync::mpsc::Receiver;
use tracing::debug;

impl LayoutPlanner {
    /// Price every frame on the wall, grouped per collection.
    pub fn quote(&self) -> PlannerResult<PriceSummary> {
        PriceCalculator::quote_collections(&self.collections)
    }

    /// Suggest one print that spans the current layout.
    pub fn suggest(&self, request: &SuggestionRequest) -> PlannerResult<Suggestion> {
        let frames: Vec<FrameSnapshot> = self.frames().map(FrameSnapshot::from).collect();
        suggestion::suggest(&frames, request)
    }

    /// Load a suggestion into the new-collection form.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) {
        let spec = suggestion.to_collection_spec(
            &self.config.frame_width_options_mm,
            &self.new_collection,
        );
        debug!(
            print_width = spec.print_width.value(),
            print_height = spec.print_height.value(),
            "Suggestion applied to form"
        );
        self.set_new_collection(spec);
    }

    pub fn frame_info(&self, frame_id: FrameId) -> Option<FrameInfo> {
        self.frame(frame_id).map(|frame| frame.info())
    }

    /// Receive every notification from now on.
    pub fn subscribe(&mut self) -> Receiver<PlannerEvent> {
        self.events.subscribe()
    }
}
