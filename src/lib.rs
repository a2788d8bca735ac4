//! Wall-art layout planning.
//!
//! Plan framed prints on a wall: collections of identical frames are placed
//! on a grid around whatever is already hanging, dragged with snapping and
//! collision push-back, persisted to a shared key-value store, priced and
//! used to suggest new frame sizes.
//!
//! `LayoutPlanner` is the entry point. It owns every collection and frame
//! and reports changes through typed `PlannerEvent`s.

pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod perf;
pub mod placement;
pub mod planner;
pub mod pricing;
pub mod saved;
pub mod spatial_index;
pub mod store;
pub mod suggestion;
pub mod surface;
pub mod types;
pub mod units;

pub use collection::{Collection, CollectionSpec};
pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use events::PlannerEvent;
pub use frame::Frame;
pub use planner::LayoutPlanner;
pub use store::{FileStore, MemoryStore, StateStore};
pub use types::{CollectionId, FrameId, FrameMaterial, ImageRef, Wall};
