//! Error types for planner operations
//!
//! Mutations on the planner never fail: they log and fall back to a safe
//! state. These errors surface only from user-facing queries (suggestions,
//! quotes) and from I/O at the edges (stores, config, file watching).

use thiserror::Error;

/// Errors that can surface from the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A persistence sink refused an operation
    #[error("Store error: {0}")]
    Store(String),

    /// File watcher could not be set up
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Suggestion requested with no frames on the wall
    #[error("Please add some frames first to get a suggestion")]
    NoFrames,

    /// Frames exist but their bounding box is degenerate
    #[error("Invalid frame layout. Please ensure frames are properly positioned.")]
    InvalidLayout,

    /// Frame measurements could not be averaged
    #[error("Invalid frame measurements. Please check frame properties.")]
    InvalidMeasurements,

    /// Suggestion requested with a zero, negative or non-finite ratio
    #[error("Invalid aspect ratio {0}. Please choose a positive ratio.")]
    InvalidAspectRatio(f64),

    /// Price requested with no collections
    #[error("Please add some frames first to calculate prices.")]
    NoCollections,
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
