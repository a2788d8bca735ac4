//! Planner-wide constants.
//!
//! Centralizes the default wall, snapping, placement and persistence values
//! so the rest of the crate never carries bare numbers.

// ============================================================================
// Wall & Canvas
// ============================================================================

/// Default wall width in inches
pub const DEFAULT_WALL_WIDTH: f64 = 80.0;

/// Default wall height in inches
pub const DEFAULT_WALL_HEIGHT: f64 = 80.0;

/// Rendering scale: device pixels per inch of wall
pub const PX_PER_INCH: f64 = 10.0;

/// Background photos are assumed to show a wall this tall (meters)
pub const BACKGROUND_IMAGE_FIXED_HEIGHT_METERS: f64 = 2.4;

/// Conversion factor used for the background image wall height
pub const METERS_TO_INCHES: f64 = 39.3701;

// ============================================================================
// Snapping & Spacing
// ============================================================================

/// Default snapping grid in inches (0 disables snapping)
pub const DEFAULT_GRID_SIZE: f64 = 0.5;

/// Default minimum gap between two frames in inches
pub const DEFAULT_FRAME_SPACING: f64 = 1.0;

/// Fallback when a drag manager receives a non-positive minimum distance
pub const FALLBACK_MIN_DISTANCE: f64 = 1.0;

/// Tolerance for floating point position comparisons
pub const EPSILON: f64 = 0.001;

/// Tolerance for the frame dimension invariant
pub const DIMENSION_TOLERANCE: f64 = 0.001;

// ============================================================================
// Placement
// ============================================================================

/// Number of grid rows the spiral search considers around the grid center
pub const SPIRAL_SEARCH_ROWS: usize = 5;

// ============================================================================
// New Collection Defaults
// ============================================================================

/// Default print width in inches
pub const DEFAULT_PRINT_WIDTH: f64 = 16.0;

/// Default print height in inches
pub const DEFAULT_PRINT_HEIGHT: f64 = 20.0;

/// Default mat width in centimeters
pub const DEFAULT_MATT_WIDTH_CM: f64 = 5.0;

/// Default frame moulding width in millimeters
pub const DEFAULT_FRAME_WIDTH_MM: f64 = 20.0;

/// Frame moulding widths offered to the user, in millimeters
pub const FRAME_WIDTH_OPTIONS_MM: [f64; 3] = [20.0, 30.0, 40.0];

// ============================================================================
// Persistence
// ============================================================================

/// Key under which the planner state is stored
pub const STORAGE_KEY: &str = "wallArtPlannerState";

/// Version written into the state metadata block
pub const STATE_VERSION: &str = "1.0.0";

/// Application directory name used under the platform config/data dirs
pub const APP_DIR_NAME: &str = "wallplanner";
