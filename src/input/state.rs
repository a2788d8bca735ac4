//! Drag state machine and pointer event types.
//!
//! ```text
//! Idle -> Dragging   (primary button or single touch on the frame body)
//! Dragging -> Idle   (pointer up, touch end or touch cancel)
//! ```
//!
//! Only one pointer drives a drag. Multi-touch gestures and secondary
//! buttons never leave `Idle`.

/// Drag state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No active drag
    #[default]
    Idle,

    Dragging {
        /// Pointer offset from the frame's top-left corner, in client pixels
        anchor: (f64, f64),
        /// Last committed position in inches; a blocked tick reverts here
        last_committed: (f64, f64),
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn anchor(&self) -> Option<(f64, f64)> {
        match self {
            Self::Dragging { anchor, .. } => Some(*anchor),
            Self::Idle => None,
        }
    }

    pub fn last_committed(&self) -> Option<(f64, f64)> {
        match self {
            Self::Dragging { last_committed, .. } => Some(*last_committed),
            Self::Idle => None,
        }
    }
}

/// Mouse button that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

/// Where a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse(MouseButton),
    /// Number of active touch points
    Touch(usize),
}

/// A pointer event in client pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub source: PointerSource,
    pub client_x: f64,
    pub client_y: f64,
    /// The pointer landed on the frame's control buttons, not its body
    pub on_controls: bool,
}

impl PointerEvent {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self {
            source: PointerSource::Mouse(MouseButton::Primary),
            client_x,
            client_y,
            on_controls: false,
        }
    }

    pub fn touch(touches: usize, client_x: f64, client_y: f64) -> Self {
        Self {
            source: PointerSource::Touch(touches),
            client_x,
            client_y,
            on_controls: false,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.source = PointerSource::Mouse(button);
        self
    }

    pub fn on_controls(mut self) -> Self {
        self.on_controls = true;
        self
    }

    /// Primary button or exactly one touch point
    pub fn is_single_pointer(&self) -> bool {
        match self.source {
            PointerSource::Mouse(button) => button == MouseButton::Primary,
            PointerSource::Touch(count) => count == 1,
        }
    }

    /// Whether this event may start a drag
    pub fn starts_drag(&self) -> bool {
        self.is_single_pointer() && !self.on_controls
    }

    #[inline]
    pub fn client(&self) -> (f64, f64) {
        (self.client_x, self.client_y)
    }
}
