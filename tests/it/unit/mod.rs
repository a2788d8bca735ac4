//! Unit tests for the planner's building blocks.

mod config_tests;
mod geometry_tests;
mod pricing_tests;
mod serde_tests;
mod store_tests;
