//! Price quotes for framed prints.
//!
//! Every step rounds to cents before the next markup is applied, and the
//! order of those steps is part of the price: reordering changes totals by a
//! cent here and there. The constants are business figures and stay as-is.

use crate::collection::Collection;
use crate::error::{PlannerError, PlannerResult};
use crate::frame::Frame;
use crate::types::{CollectionId, FrameId};
use crate::units::{Inches, round_to};
use std::fmt;
use tracing::debug;

const PRICE_MARKUP: f64 = 1.049;

const PRINT_AREA_RATE: f64 = 166.8759;
const PRINT_BASE: f64 = 0.174256;

const FRAME_BASE: f64 = 0.75;
const FRAME_AREA_RATE: f64 = 23.07;
const FRAME_FACTOR: f64 = 1.5;
const FRAME_FLAT: f64 = 22.0;

const HANDLING_FEE: f64 = 0.60;
const EXTRA_FEE: f64 = 0.20;

// ============================================================================
// Frame Tier
// ============================================================================

/// Moulding tier, by frame width in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTier {
    Mm20,
    Mm30,
    Mm40,
}

impl FrameTier {
    /// `<= 25mm` is 20, `<= 35mm` is 30, everything else (NaN included) is 40.
    pub fn from_frame_width(frame_width: Inches) -> Self {
        let mm = frame_width.to_mm().value();
        if mm <= 25.0 {
            FrameTier::Mm20
        } else if mm <= 35.0 {
            FrameTier::Mm30
        } else {
            FrameTier::Mm40
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrameTier::Mm20 => "20",
            FrameTier::Mm30 => "30",
            FrameTier::Mm40 => "40",
        }
    }

    /// Moulding depth in centimeters
    fn depth_cm(&self) -> f64 {
        match self {
            FrameTier::Mm30 => 3.0,
            _ => 4.0,
        }
    }

    /// Per linear meter rate
    fn perimeter_rate(&self) -> f64 {
        match self {
            FrameTier::Mm30 => 2.92,
            _ => 3.57,
        }
    }
}

// ============================================================================
// Price Pipeline
// ============================================================================

/// Fine-art print price for a print of `width_cm` x `height_cm`.
pub fn print_price(width_cm: f64, height_cm: f64) -> f64 {
    let area = (width_cm / 100.0) * (height_cm / 100.0);
    let mut price = round_to(area * PRINT_AREA_RATE + PRINT_BASE, 2);
    price = round_to(price * 1.06, 2);
    price = round_to(price * 1.09, 2);
    round_to(price * PRICE_MARKUP, 2)
}

/// Frame price for the envelope around a print with the given mat.
pub fn frame_price(width_cm: f64, height_cm: f64, matt_cm: f64, tier: FrameTier) -> f64 {
    let depth = tier.depth_cm();
    let outer_w = width_cm + matt_cm * 2.0 + depth * 2.0;
    let outer_h = height_cm + matt_cm * 2.0 + depth * 2.0;

    let area = (outer_w / 100.0) * (outer_h / 100.0);
    let perimeter = (outer_w / 100.0) * 2.0 + (outer_h / 100.0) * 2.0;

    let price = ((FRAME_BASE + area * FRAME_AREA_RATE + tier.perimeter_rate() * perimeter)
        * FRAME_FACTOR
        + FRAME_FLAT)
        * 2.0;
    let price = round_to(price * PRICE_MARKUP, 2);
    round_to(price * 1.06, 2)
}

/// Frame, print and total for one framed print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub frame: f64,
    pub print: f64,
    pub total: f64,
}

/// Full pipeline for one framed print. NaN inputs price as zero.
pub fn frame_and_print_price(
    width_cm: f64,
    height_cm: f64,
    matt_cm: f64,
    tier: FrameTier,
) -> PriceBreakdown {
    let mut frame = frame_price(width_cm, height_cm, matt_cm, tier);
    let mut print = print_price(width_cm, height_cm);

    print = round_to(print * 1.071, 2);
    frame = round_to(frame * 1.071, 2);
    if tier == FrameTier::Mm20 {
        frame = round_to(frame * 1.12, 2);
    }
    print = round_to(print * PRICE_MARKUP, 2);

    PriceBreakdown {
        frame,
        print,
        total: round_to(frame + print + HANDLING_FEE + EXTRA_FEE, 2),
    }
}

/// `$12.34`
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

// ============================================================================
// Quotes
// ============================================================================

/// Price for one frame on the wall.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameQuote {
    pub collection_id: CollectionId,
    pub frame_id: FrameId,
    pub print_width: f64,
    pub print_height: f64,
    /// Inches
    pub matt_width: f64,
    pub frame_width: f64,
    pub tier: FrameTier,
    pub prices: PriceBreakdown,
}

impl FrameQuote {
    pub fn for_frame(frame: &Frame) -> Self {
        let tier = FrameTier::from_frame_width(Inches(frame.frame_width()));
        let prices = frame_and_print_price(
            Inches(frame.print_width()).to_cm().value(),
            Inches(frame.print_height()).to_cm().value(),
            Inches(frame.matt_width()).to_cm().value(),
            tier,
        );
        debug!(
            frame_id = frame.id(),
            tier = tier.label(),
            total = prices.total,
            "Frame priced"
        );
        Self {
            collection_id: frame.collection_id(),
            frame_id: frame.id(),
            print_width: frame.print_width(),
            print_height: frame.print_height(),
            matt_width: frame.matt_width(),
            frame_width: frame.frame_width(),
            tier,
            prices,
        }
    }
}

/// Quotes grouped per collection, in wall order.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuote {
    pub collection_id: CollectionId,
    pub frames: Vec<FrameQuote>,
}

impl CollectionQuote {
    pub fn total(&self) -> f64 {
        self.frames.iter().map(|q| q.prices.total).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub collections: Vec<CollectionQuote>,
}

impl PriceSummary {
    pub fn grand_total(&self) -> f64 {
        self.collections.iter().map(CollectionQuote::total).sum()
    }

    pub fn frame_count(&self) -> usize {
        self.collections.iter().map(|c| c.frames.len()).sum()
    }
}

impl fmt::Display for PriceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for collection in &self.collections {
            writeln!(f, "Collection {}", collection.collection_id)?;
            for quote in &collection.frames {
                writeln!(
                    f,
                    "  Frame {}: {} × {} ({} frame, {} mat)",
                    quote.frame_id,
                    Inches(quote.print_width),
                    Inches(quote.print_height),
                    Inches(quote.frame_width).to_mm(),
                    Inches(quote.matt_width).to_cm(),
                )?;
                writeln!(f, "    Frame: {}", format_price(quote.prices.frame))?;
                writeln!(f, "    Print: {}", format_price(quote.prices.print))?;
                writeln!(f, "    Total: {}", format_price(quote.prices.total))?;
            }
            writeln!(f, "  Collection Total: {}", format_price(collection.total()))?;
        }
        write!(f, "Grand Total: {}", format_price(self.grand_total()))
    }
}

/// Stateless quoting over the planner's collections.
pub struct PriceCalculator;

impl PriceCalculator {
    pub fn quote_collections(collections: &[Collection]) -> PlannerResult<PriceSummary> {
        if collections.is_empty() {
            return Err(PlannerError::NoCollections);
        }
        let summary = PriceSummary {
            collections: collections
                .iter()
                .map(|collection| CollectionQuote {
                    collection_id: collection.id(),
                    frames: collection.frames().iter().map(FrameQuote::for_frame).collect(),
                })
                .collect(),
        };
        debug!(
            frames = summary.frame_count(),
            grand_total = summary.grand_total(),
            "Price summary computed"
        );
        Ok(summary)
    }
}
