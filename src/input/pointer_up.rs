//! Pointer up handling - finalize the drag.

use crate::input::state::PointerEvent;
use crate::planner::LayoutPlanner;
use crate::types::FrameId;
use tracing::{debug, trace};

impl LayoutPlanner {
    /// Pointer released. Ends the active drag, if any.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Option<FrameId> {
        trace!(x = event.client_x, y = event.client_y, "Pointer up");
        self.finish_drag()
    }

    /// Touch cancelled (or pointer lost). Same as releasing in place.
    pub fn pointer_cancel(&mut self) -> Option<FrameId> {
        self.finish_drag()
    }

    /// Clear highlights, snap once more and emit the final move
    /// notification. Emits even when the frame did not move.
    fn finish_drag(&mut self) -> Option<FrameId> {
        let frame_id = self.active_drag.take()?;
        self.surface.clear_collision_marks();
        self.surface.set_dragging(None);

        let Some(frame) = self.frame_mut(frame_id) else {
            debug!(frame_id, "Dragged frame gone at pointer up");
            return None;
        };
        frame.drag_manager_mut().end();
        let x = frame.drag_manager().snap(frame.x());
        let y = frame.drag_manager().snap(frame.y());
        frame.set_position(x, y);
        let moved = frame.update_position();

        debug!(frame_id, x, y, "Drag finished");
        self.dispatch(moved);
        Some(frame_id)
    }
}
