//! Length units and measurement formatting.
//!
//! Mat widths cross the persistence boundary in centimeters and frame
//! mouldings are chosen in millimeters, while every geometric computation
//! runs in inches. Each unit gets its own newtype so a conversion is always
//! spelled out where the boundary is crossed.

use serde::{Deserialize, Serialize};
use std::fmt;

const CM_PER_INCH: f64 = 2.54;
const MM_PER_INCH: f64 = 25.4;

/// A length in inches. The canonical internal unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// A length in centimeters (mat widths at the boundary).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// A length in millimeters (frame moulding widths).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Inches {
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_cm(self) -> Centimeters {
        Centimeters(self.0 * CM_PER_INCH)
    }

    pub fn to_mm(self) -> Millimeters {
        Millimeters(self.0 * MM_PER_INCH)
    }
}

impl Centimeters {
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_inches(self) -> Inches {
        cm_to_inches(self.0)
    }
}

impl Millimeters {
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_inches(self) -> Inches {
        mm_to_inches(self.0)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        cm.to_inches()
    }
}

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        mm.to_inches()
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        inches.to_cm()
    }
}

pub fn cm_to_inches(cm: f64) -> Inches {
    Inches(cm / CM_PER_INCH)
}

pub fn mm_to_inches(mm: f64) -> Inches {
    Inches(mm / MM_PER_INCH)
}

/// Round to `decimals` places, half away from zero.
///
/// Shifts through the decimal string form (`"1.005e2"` parses to exactly
/// 100.5) so values like 1.005 round up as written instead of down as
/// stored. Anything that is not a finite number becomes 0.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let shifted = match format!("{}e{}", value, decimals).parse::<f64>() {
        Ok(v) => v.round(),
        Err(_) => return 0.0,
    };
    match format!("{}e{}", shifted, -decimals).parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Formats a length as inches with one decimal, e.g. `16.0"`.
pub fn format_measurement(inches: f64) -> String {
    format!("{:.1}\"", inches)
}

impl fmt::Display for Inches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_measurement(self.0))
    }
}

impl fmt::Display for Centimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}cm", self.0)
    }
}

impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.0.round())
    }
}
