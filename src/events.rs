//! Typed planner notifications.
//!
//! Frames and collections hand their notifications up to the planner as
//! return values; the planner reacts (persisting, scheduling a marquee
//! refresh) and then fans each one out to subscribers. Every move, update or
//! delete produces exactly one notification.

use crate::geometry::Marquee;
use crate::types::{CollectionId, FrameId, ImageRef};
use std::sync::mpsc::{self, Receiver, Sender};

/// Full geometry of a frame at the time it moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub print_width: f64,
    pub print_height: f64,
    /// Mat width in inches
    pub matt_width: f64,
    pub frame_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerEvent {
    /// A frame's position was (re)committed
    FrameMoved {
        frame_id: FrameId,
        collection_id: CollectionId,
        geometry: FrameGeometry,
    },
    /// A frame's thumbnail changed
    FrameUpdated {
        frame_id: FrameId,
        collection_id: CollectionId,
        thumbnail: Option<ImageRef>,
    },
    FrameDeleted {
        frame_id: FrameId,
        collection_id: CollectionId,
    },
    /// The last frame of a collection was removed
    CollectionEmpty { collection_id: CollectionId },
    CollectionAdded {
        collection_id: CollectionId,
        frame_count: usize,
    },
    CollectionRemoved { collection_id: CollectionId },
    /// Wall size changed (explicit edit or background image)
    WallResized { width: f64, height: f64 },
    /// Bounding marquee recomputed; `None` means hidden
    MarqueeChanged(Option<Marquee>),
    StateSaved {
        frame_count: usize,
        collection_count: usize,
    },
}

impl PlannerEvent {
    pub fn frame_id(&self) -> Option<FrameId> {
        match self {
            PlannerEvent::FrameMoved { frame_id, .. }
            | PlannerEvent::FrameUpdated { frame_id, .. }
            | PlannerEvent::FrameDeleted { frame_id, .. } => Some(*frame_id),
            _ => None,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, PlannerEvent::FrameMoved { .. })
    }
}

/// Fan-out of planner events to any number of receivers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Sender<PlannerEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<PlannerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to every live subscriber, forgetting the ones that hung up.
    pub fn publish(&mut self, event: &PlannerEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
