//! Pointer input for frames on the wall.
//!
//! Each frame owns a `FrameDragManager`; the planner tracks which frame (if
//! any) is being dragged and routes pointer events to it.
//!
//! ## Architecture
//!
//! The drag lifecycle is an explicit state machine (`DragState`). Pointer
//! down enters `Dragging`, every pointer move runs one snap/clamp/collide
//! tick against the other frames, and pointer up or touch cancel returns to
//! `Idle` with exactly one final move notification.
//!
//! ## Modules
//!
//! - `state` - Drag state enum and pointer event types
//! - `coords` - Client pixel <-> wall inch conversion
//! - `pointer_down` - Drag start (anchor capture)
//! - `drag` - Drag manager and pointer move handling
//! - `pointer_up` - Drag end and cancellation

pub mod coords;
mod drag;
mod pointer_down;
mod pointer_up;
mod state;

pub use coords::CanvasGeometry;
pub use drag::{DragStep, FrameDragManager, StepOutcome};
pub use state::{DragState, MouseButton, PointerEvent, PointerSource};
