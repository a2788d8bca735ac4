//! Planner configuration.
//!
//! Loaded from `<config_dir>/wallplanner/config.json`. Every field has a
//! default, so a partial (or empty) file is valid.

use crate::collection::CollectionSpec;
use crate::constants::{
    APP_DIR_NAME, DEFAULT_FRAME_SPACING, DEFAULT_GRID_SIZE, FRAME_WIDTH_OPTIONS_MM, PX_PER_INCH,
    SPIRAL_SEARCH_ROWS, STORAGE_KEY,
};
use crate::error::PlannerResult;
use crate::types::Wall;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

static DEFAULT_CONFIG: Lazy<PlannerConfig> = Lazy::new(PlannerConfig::default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    pub wall: Wall,
    pub grid_size: f64,
    pub frame_spacing: f64,
    /// Row bound for the placement spiral search
    pub spiral_rows: usize,
    pub px_per_inch: f64,
    pub storage_key: String,
    pub new_collection: CollectionSpec,
    pub frame_width_options_mm: Vec<f64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            wall: Wall::default(),
            grid_size: DEFAULT_GRID_SIZE,
            frame_spacing: DEFAULT_FRAME_SPACING,
            spiral_rows: SPIRAL_SEARCH_ROWS,
            px_per_inch: PX_PER_INCH,
            storage_key: STORAGE_KEY.to_string(),
            new_collection: CollectionSpec::default(),
            frame_width_options_mm: FRAME_WIDTH_OPTIONS_MM.to_vec(),
        }
    }
}

impl PlannerConfig {
    /// Shared default instance
    pub fn defaults() -> &'static PlannerConfig {
        &DEFAULT_CONFIG
    }

    pub fn load(path: &Path) -> PlannerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config.sanitized())
    }

    /// Load `path` if it exists; fall back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.json"))
    }

    /// Replace out-of-range values with their defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::defaults();
        if !self.wall.is_valid() {
            warn!(width = self.wall.width, height = self.wall.height, "Invalid configured wall");
            self.wall = defaults.wall;
        }
        if self.grid_size.is_nan() || self.grid_size < 0.0 {
            self.grid_size = defaults.grid_size;
        }
        if self.frame_spacing.is_nan() || self.frame_spacing <= 0.0 {
            self.frame_spacing = defaults.frame_spacing;
        }
        if self.px_per_inch.is_nan() || self.px_per_inch <= 0.0 {
            self.px_per_inch = defaults.px_per_inch;
        }
        self.frame_width_options_mm.retain(|mm| mm.is_finite() && *mm > 0.0);
        if self.frame_width_options_mm.is_empty() {
            self.frame_width_options_mm = defaults.frame_width_options_mm.clone();
        }
        self
    }
}
