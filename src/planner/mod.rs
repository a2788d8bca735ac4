//! The layout planner - aggregate root of the wall.
//!
//! This module is organized into several submodules:
//! - `state` - The LayoutPlanner struct and read accessors
//! - `lifecycle` - Construction and state restore
//! - `collections` - Adding collections, settings, wall edits, event dispatch
//! - `deletion` - Transactional frame/collection deletion with verification
//! - `persistence` - Saving and cross-tab validation
//! - `marquee` - Bounding marquee and the deferred work queue
//! - `queries` - Pricing, suggestions and subscriptions
//!
//! Pointer handling lives in `crate::input` as further `impl LayoutPlanner`
//! blocks.

mod collections;
mod deletion;
mod lifecycle;
mod marquee;
mod persistence;
mod queries;
mod state;

pub use marquee::Deferred;
pub use state::LayoutPlanner;
