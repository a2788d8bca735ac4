//! Frame-size suggestions from the current layout.
//!
//! Given what is on the wall, suggest one print that would span the whole
//! arrangement along a chosen dimension, at a chosen aspect ratio, keeping
//! the average mat and moulding of the existing frames.

use crate::collection::CollectionSpec;
use crate::constants::DEFAULT_MATT_WIDTH_CM;
use crate::error::{PlannerError, PlannerResult};
use crate::frame::Frame;
use crate::units::{Centimeters, Inches, Millimeters, cm_to_inches, format_measurement, round_to};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Desired print aspect ratio (width / height).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectRatio {
    Ratio(f64),
    /// Zero, negative or non-finite parts count as 1.
    Custom { width: f64, height: f64 },
}

impl AspectRatio {
    pub fn value(&self) -> f64 {
        match *self {
            AspectRatio::Ratio(ratio) => ratio,
            AspectRatio::Custom { width, height } => {
                let part = |v: f64| if v.is_finite() && v > 0.0 { v } else { 1.0 };
                part(width) / part(height)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    /// Follow the layout's own orientation
    #[default]
    Auto,
}

/// Which layout dimension the suggested frame should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchDimension {
    #[default]
    Width,
    Height,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub aspect_ratio: AspectRatio,
    pub orientation: Orientation,
    pub match_dimension: MatchDimension,
}

impl Default for SuggestionRequest {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Ratio(0.8),
            orientation: Orientation::Auto,
            match_dimension: MatchDimension::Width,
        }
    }
}

/// The parts of a frame the engine looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Inches
    pub matt_width: f64,
    pub frame_width: f64,
}

impl From<&Frame> for FrameSnapshot {
    fn from(frame: &Frame) -> Self {
        Self {
            x: frame.x(),
            y: frame.y(),
            width: frame.width(),
            height: frame.height(),
            matt_width: frame.matt_width(),
            frame_width: frame.frame_width(),
        }
    }
}

/// Suggested frame, all lengths in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion {
    pub print_width: f64,
    pub print_height: f64,
    pub matt_width: f64,
    pub frame_width: f64,
}

impl Suggestion {
    pub fn total_size(&self) -> (f64, f64) {
        let border = 2.0 * self.matt_width + 2.0 * self.frame_width;
        (self.print_width + border, self.print_height + border)
    }

    /// The suggestion as a new-collection form: print to 1 decimal, mat in
    /// cm to 1 decimal, moulding snapped to the closest offered width and
    /// stored in inches to 3 decimals, one frame.
    pub fn to_collection_spec(
        &self,
        frame_options_mm: &[f64],
        base: &CollectionSpec,
    ) -> CollectionSpec {
        let mm = Inches(self.frame_width).to_mm().value().round();
        let snapped_mm = frame_options_mm
            .iter()
            .copied()
            .min_by(|a, b| (a - mm).abs().total_cmp(&(b - mm).abs()))
            .unwrap_or(mm);

        CollectionSpec {
            print_width: Inches(round_to(self.print_width, 1)),
            print_height: Inches(round_to(self.print_height, 1)),
            matt_width: Centimeters(round_to(Inches(self.matt_width).to_cm().value(), 1)),
            frame_width: Inches(round_to(Millimeters(snapped_mm).to_inches().value(), 3)),
            count: 1.0,
            ..base.clone()
        }
    }

    /// `16.0" × 20.0"`
    pub fn print_label(&self) -> String {
        format!(
            "{} × {}",
            format_measurement(self.print_width),
            format_measurement(self.print_height)
        )
    }
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Flip the ratio when it disagrees with the requested orientation.
fn adjust_ratio(ratio: f64, orientation: Orientation, layout_w: f64, layout_h: f64) -> f64 {
    let layout_landscape = layout_w / layout_h > 1.0;
    let flip = match orientation {
        Orientation::Portrait => ratio > 1.0,
        Orientation::Landscape => ratio < 1.0,
        Orientation::Auto => {
            (layout_landscape && ratio < 1.0) || (!layout_landscape && ratio > 1.0)
        }
    };
    if flip { 1.0 / ratio } else { ratio }
}

fn half_inch(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Suggest a single print spanning the current layout.
pub fn suggest(frames: &[FrameSnapshot], request: &SuggestionRequest) -> PlannerResult<Suggestion> {
    if frames.is_empty() {
        return Err(PlannerError::NoFrames);
    }

    let min_x = frames.iter().map(|f| or_zero(f.x)).fold(f64::INFINITY, f64::min);
    let min_y = frames.iter().map(|f| or_zero(f.y)).fold(f64::INFINITY, f64::min);
    let max_x = frames
        .iter()
        .map(|f| or_zero(f.x) + or_zero(f.width))
        .fold(f64::NEG_INFINITY, f64::max);
    let max_y = frames
        .iter()
        .map(|f| or_zero(f.y) + or_zero(f.height))
        .fold(f64::NEG_INFINITY, f64::max);

    let layout_w = max_x - min_x;
    let layout_h = max_y - min_y;
    if !(layout_w > 0.0 && layout_h > 0.0) {
        return Err(PlannerError::InvalidLayout);
    }

    let count = frames.len() as f64;
    let avg_matt = frames.iter().map(|f| or_zero(f.matt_width)).sum::<f64>() / count;
    let matt_width = if avg_matt.is_finite() && avg_matt > 0.0 {
        avg_matt
    } else {
        cm_to_inches(DEFAULT_MATT_WIDTH_CM).value()
    };

    let frame_width = frames.iter().map(|f| or_zero(f.frame_width)).sum::<f64>() / count;
    if !frame_width.is_finite() {
        return Err(PlannerError::InvalidMeasurements);
    }

    let requested = request.aspect_ratio.value();
    if !(requested.is_finite() && requested > 0.0) {
        return Err(PlannerError::InvalidAspectRatio(requested));
    }
    let ratio = adjust_ratio(requested, request.orientation, layout_w, layout_h);
    let border = 2.0 * matt_width + 2.0 * frame_width;
    let (print_width, print_height) = match request.match_dimension {
        MatchDimension::Width => {
            let w = layout_w - border;
            (w, w / ratio)
        }
        MatchDimension::Height => {
            let h = layout_h - border;
            (h * ratio, h)
        }
    };

    let suggestion = Suggestion {
        print_width: half_inch(print_width),
        print_height: half_inch(print_height),
        matt_width,
        frame_width,
    };
    debug!(
        layout_w,
        layout_h,
        ratio,
        print_width = suggestion.print_width,
        print_height = suggestion.print_height,
        "Suggestion computed"
    );
    Ok(suggestion)
}
