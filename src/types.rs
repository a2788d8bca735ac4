//! Core types for the wall planner.
//!
//! Identifiers, the frame material palette, the wall record and the opaque
//! image reference handed in by the image collaborator.

use crate::constants::{DEFAULT_WALL_HEIGHT, DEFAULT_WALL_WIDTH, EPSILON};
use serde::{Deserialize, Serialize};

pub type FrameId = u64;
pub type CollectionId = u64;

// ============================================================================
// Identifiers
// ============================================================================

/// Monotonic id source scoped to a single planner.
///
/// Frames and collections draw from separate sequences that start at 1 and
/// are never reused, so two planners in one process never share ids.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_frame: FrameId,
    next_collection: CollectionId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next_frame: 1,
            next_collection: 1,
        }
    }

    pub fn next_frame_id(&mut self) -> FrameId {
        let id = self.next_frame;
        self.next_frame += 1;
        id
    }

    pub fn next_collection_id(&mut self) -> CollectionId {
        let id = self.next_collection;
        self.next_collection += 1;
        id
    }
}

// ============================================================================
// Frame Material
// ============================================================================

/// Moulding material. Cosmetic only; it never affects geometry or price.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMaterial {
    #[default]
    Black,
    White,
    Oak,
    Walnut,
}

impl FrameMaterial {
    pub fn label(&self) -> &'static str {
        match self {
            FrameMaterial::Black => "Black",
            FrameMaterial::White => "White",
            FrameMaterial::Oak => "Oak",
            FrameMaterial::Walnut => "Walnut",
        }
    }
}

// ============================================================================
// Image References
// ============================================================================

/// Opaque reference to an image (data URL, blob key, file path...).
/// The planner only stores and echoes it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// Wall
// ============================================================================

/// The bounded canvas frames live on, in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub width: f64,
    pub height: f64,
}

impl Default for Wall {
    fn default() -> Self {
        Self {
            width: DEFAULT_WALL_WIDTH,
            height: DEFAULT_WALL_HEIGHT,
        }
    }
}

impl Wall {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Largest x a box of `width` may take while staying on the wall
    #[inline]
    pub fn max_x(&self, width: f64) -> f64 {
        self.width - width
    }

    #[inline]
    pub fn max_y(&self, height: f64) -> f64 {
        self.height - height
    }

    /// Whether a box at `(x, y)` fits on the wall, with `EPSILON` slack.
    pub fn contains(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x >= -EPSILON
            && x <= self.max_x(width) + EPSILON
            && y >= -EPSILON
            && y <= self.max_y(height) + EPSILON
    }

    /// Clamp a top-left position into `[0, wall - size]` on both axes.
    pub fn clamp(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        (
            x.min(self.max_x(width)).max(0.0),
            y.min(self.max_y(height)).max(0.0),
        )
    }
}
