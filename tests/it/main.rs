//! Single test binary entry point.
//!
//! All integration-style tests link into one binary.
//!
//! Structure:
//! - helpers: planner builder and event/store utilities
//! - integration: multi-component planner workflows
//! - unit: single-component checks through the public API

mod unit;
