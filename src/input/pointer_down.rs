//! Pointer down handling - start dragging a frame.

use crate::input::state::PointerEvent;
use crate::planner::LayoutPlanner;
use crate::types::FrameId;
use tracing::{debug, warn};

impl LayoutPlanner {
    /// Pointer pressed on `frame_id`. Returns whether a drag started.
    ///
    /// Only the primary button or a single touch on the frame body starts a
    /// drag; presses on the frame's controls are left to the host.
    pub fn pointer_down(&mut self, frame_id: FrameId, event: &PointerEvent) -> bool {
        if !event.starts_drag() {
            debug!(frame_id, source = ?event.source, "Pointer down ignored");
            return false;
        }

        // A second press without a release (lost pointer up) ends the old drag
        if self.active_drag.is_some_and(|active| active != frame_id) {
            self.pointer_cancel();
        }

        let canvas = self.canvas;
        let Some(frame) = self.frame_mut(frame_id) else {
            warn!(frame_id, "Pointer down on unknown frame");
            return false;
        };
        let position = frame.position();
        frame
            .drag_manager_mut()
            .begin(event.client(), position, &canvas);

        self.active_drag = Some(frame_id);
        self.surface.set_dragging(Some(frame_id));
        debug!(frame_id, x = position.0, y = position.1, "Drag started");
        true
    }
}
