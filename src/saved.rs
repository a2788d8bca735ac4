//! Persisted planner state.
//!
//! One JSON document under a fixed key. Field names and units match what
//! the planner has always written: camelCase keys, mat width in centimeters,
//! every other length in inches.

use crate::collection::CollectionSpec;
use crate::constants::STATE_VERSION;
use crate::types::{FrameId, FrameMaterial, ImageRef, Wall};
use crate::units::{Centimeters, Inches};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Position and thumbnail of one persisted frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFrame {
    /// Live id at save time, used to reconcile against the surface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FrameId>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub thumbnail_image: Option<ImageRef>,
}

/// A persisted collection: its shared spec plus frame positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCollection {
    pub print_width: Inches,
    pub print_height: Inches,
    /// Centimeters, rounded to 2 decimals
    pub matt_width: Centimeters,
    pub frame_width: Inches,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub frame_material: FrameMaterial,
    #[serde(default)]
    pub frames: Option<Vec<SavedFrame>>,
}

impl SavedCollection {
    pub fn frame_count(&self) -> usize {
        self.frames.as_ref().map_or(0, Vec::len)
    }
}

/// Debugging block written alongside the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMetadata {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub frame_count: usize,
    pub collection_count: usize,
    pub version: String,
}

impl StateMetadata {
    pub fn now(frame_count: usize, collection_count: usize) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            timestamp,
            frame_count,
            collection_count,
            version: STATE_VERSION.to_string(),
        }
    }
}

/// Wall as read back from storage; either side may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedWall {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl SavedWall {
    /// The stored wall if both sides are positive.
    pub fn to_wall(self) -> Option<Wall> {
        let wall = Wall::new(self.width?, self.height?);
        wall.is_valid().then_some(wall)
    }
}

impl From<Wall> for SavedWall {
    fn from(wall: Wall) -> Self {
        Self {
            width: Some(wall.width),
            height: Some(wall.height),
        }
    }
}

/// The full persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    #[serde(default)]
    pub wall: Option<SavedWall>,
    #[serde(default)]
    pub collections: Vec<SavedCollection>,
    #[serde(default)]
    pub new_collection: Option<CollectionSpec>,
    #[serde(default)]
    pub grid_size: Option<f64>,
    #[serde(default)]
    pub frame_spacing: Option<f64>,
    #[serde(default)]
    pub background_image_url: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StateMetadata>,
}

impl SavedState {
    pub fn frame_count(&self) -> usize {
        self.collections.iter().map(SavedCollection::frame_count).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
