//! Pointer-move handling - the per-frame drag manager and the planner's
//! move handler.
//!
//! ## Performance Notes
//!
//! Pointer move fires for every input sample while a frame is held. Each
//! tick builds one R-tree over the other frames and runs at most two
//! collision queries against it.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::constants::{DEFAULT_GRID_SIZE, FALLBACK_MIN_DISTANCE};
use crate::geometry::{FrameRect, snap_to_grid};
use crate::input::coords::CanvasGeometry;
use crate::input::state::{DragState, PointerEvent};
use crate::perf::DRAG_TICK_BUDGET_MS;
use crate::placement::FrameRects;
use crate::planner::LayoutPlanner;
use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use crate::types::{FrameId, Wall};
use tracing::{debug, trace, warn};

/// How a drag tick resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Candidate position was free
    Moved,
    /// Candidate collided; the push-resolved position was free
    Pushed { by: FrameId },
    /// Neither candidate nor push target was usable; reverted
    Blocked { by: FrameId },
}

/// Result of one drag tick: the committed position and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    pub x: f64,
    pub y: f64,
    pub outcome: StepOutcome,
}

impl DragStep {
    pub fn is_blocked(&self) -> bool {
        matches!(self.outcome, StepOutcome::Blocked { .. })
    }
}

/// Interactive drag state for one frame: snapping grid, minimum distance to
/// other frames and the `Idle`/`Dragging` state.
#[derive(Debug, Clone)]
pub struct FrameDragManager {
    state: DragState,
    grid_size: f64,
    min_distance: f64,
}

impl Default for FrameDragManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDragManager {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            grid_size: DEFAULT_GRID_SIZE,
            min_distance: FALLBACK_MIN_DISTANCE,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Set the snapping grid. 0 disables snapping; NaN or negative input
    /// keeps the previous grid if it was positive, else the default.
    pub fn set_grid_size(&mut self, size: f64) {
        if size.is_nan() || size < 0.0 {
            let fallback = if self.grid_size > 0.0 {
                self.grid_size
            } else {
                DEFAULT_GRID_SIZE
            };
            warn!(input = size, fallback, "Invalid grid size, reverting");
            self.grid_size = fallback;
        } else {
            self.grid_size = size;
        }
    }

    /// Set the minimum distance to other frames. Must stay positive;
    /// anything else falls back to one inch.
    pub fn set_min_distance(&mut self, distance: f64) {
        self.min_distance = if distance > 0.0 {
            distance
        } else {
            FALLBACK_MIN_DISTANCE
        };
    }

    #[inline]
    pub fn snap(&self, value: f64) -> f64 {
        snap_to_grid(value, self.grid_size)
    }

    /// Enter `Dragging`. `frame_pos` is the frame's top-left in inches.
    pub fn begin(&mut self, client: (f64, f64), frame_pos: (f64, f64), canvas: &CanvasGeometry) {
        let (left, top) = canvas.wall_to_client(frame_pos);
        self.state = DragState::Dragging {
            anchor: (client.0 - left, client.1 - top),
            last_committed: frame_pos,
        };
    }

    /// Leave `Dragging`. Returns whether a drag was active.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.state.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    /// Run one drag tick for `frame` with the pointer at `client`.
    ///
    /// `others` must index every other frame on the wall. Returns `None`
    /// when no drag is active.
    pub fn drag_to(
        &mut self,
        frame: &FrameRect,
        client: (f64, f64),
        canvas: &CanvasGeometry,
        wall: &Wall,
        others: &SpatialIndex,
    ) -> Option<DragStep> {
        let DragState::Dragging {
            anchor,
            last_committed,
        } = self.state
        else {
            return None;
        };

        let (raw_x, raw_y) = canvas.drag_origin(client, anchor);
        let mut x = self.snap(raw_x);
        let mut y = self.snap(raw_y);
        trace!(frame_id = frame.id, raw_x, raw_y, x, y, "Drag candidate");

        if !wall.contains(x, y, frame.width, frame.height) {
            let (cx, cy) = wall.clamp(x, y, frame.width, frame.height);
            x = self.snap(cx);
            y = self.snap(cy);
            trace!(frame_id = frame.id, x, y, "Clamped to wall");
        }

        let candidate = frame.at(x, y);
        let step = match others.first_collision(&candidate, self.min_distance) {
            None => DragStep {
                x,
                y,
                outcome: StepOutcome::Moved,
            },
            Some(hit) => {
                let push = candidate
                    .push_away_from(&hit, self.min_distance)
                    .unwrap_or_default();
                let pushed_x = self.snap(x + push.dx);
                let pushed_y = self.snap(y + push.dy);

                let in_bounds = wall.contains(pushed_x, pushed_y, frame.width, frame.height);
                let free = in_bounds
                    && others
                        .first_collision(&frame.at(pushed_x, pushed_y), self.min_distance)
                        .is_none();

                if free {
                    DragStep {
                        x: pushed_x,
                        y: pushed_y,
                        outcome: StepOutcome::Pushed { by: hit.id },
                    }
                } else {
                    debug!(
                        frame_id = frame.id,
                        other_id = hit.id,
                        in_bounds,
                        "Push target unusable, reverting"
                    );
                    DragStep {
                        x: last_committed.0,
                        y: last_committed.1,
                        outcome: StepOutcome::Blocked { by: hit.id },
                    }
                }
            }
        };

        self.state = DragState::Dragging {
            anchor,
            last_committed: (step.x, step.y),
        };
        Some(step)
    }
}

impl LayoutPlanner {
    /// Pointer moved while a frame may be held.
    ///
    /// Commits the resolved position, flags collisions on the surface and
    /// emits one move notification. Returns `None` when nothing is being
    /// dragged, the event is a multi-touch gesture, or the dragged frame
    /// disappeared since pointer-down.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Option<DragStep> {
        profile_scope!("pointer_move", DRAG_TICK_BUDGET_MS);

        let frame_id = self.active_drag?;
        if !event.is_single_pointer() {
            return None;
        }
        self.surface.clear_collision_marks();

        let others: Vec<FrameRect> = self
            .frame_rects()
            .into_iter()
            .filter(|r| r.id != frame_id)
            .collect();
        let index = SpatialIndex::from_rects(&others);
        let wall = self.wall;
        let canvas = self.canvas;

        let Some(frame) = self.frame_mut(frame_id) else {
            debug!(frame_id, "Dragged frame vanished mid-drag");
            self.active_drag = None;
            self.surface.set_dragging(None);
            return None;
        };

        let rect = frame.rect();
        let step = frame
            .drag_manager_mut()
            .drag_to(&rect, event.client(), &canvas, &wall, &index)?;
        frame.set_position(step.x, step.y);
        let moved = frame.update_position();

        if let StepOutcome::Blocked { by } = step.outcome {
            self.surface.mark_collision(frame_id);
            self.surface.mark_collision(by);
        }
        self.dispatch(moved);
        Some(step)
    }
}
