//! Price pipeline through the public API.

use wallplanner::pricing::{FrameTier, format_price, frame_and_print_price};
use wallplanner::units::{Inches, mm_to_inches};

#[test]
fn test_reference_quote_per_tier() {
    let mm20 = frame_and_print_price(40.0, 50.0, 5.0, FrameTier::Mm20);
    assert_eq!((mm20.frame, mm20.print, mm20.total), (134.1, 45.68, 180.58));

    let mm30 = frame_and_print_price(40.0, 50.0, 5.0, FrameTier::Mm30);
    assert_eq!((mm30.frame, mm30.print, mm30.total), (111.0, 45.68, 157.48));

    let mm40 = frame_and_print_price(40.0, 50.0, 5.0, FrameTier::Mm40);
    assert_eq!((mm40.frame, mm40.print, mm40.total), (119.73, 45.68, 166.21));
}

#[test]
fn test_nan_prices_as_fees_only() {
    let prices = frame_and_print_price(f64::NAN, 50.0, 5.0, FrameTier::Mm20);
    assert_eq!(prices.frame, 0.0);
    assert_eq!(prices.print, 0.0);
    assert_eq!(prices.total, 0.8);
}

#[test]
fn test_tier_from_moulding_width() {
    assert_eq!(FrameTier::from_frame_width(mm_to_inches(20.0)), FrameTier::Mm20);
    assert_eq!(FrameTier::from_frame_width(mm_to_inches(24.0)), FrameTier::Mm20);
    assert_eq!(FrameTier::from_frame_width(mm_to_inches(30.0)), FrameTier::Mm30);
    assert_eq!(FrameTier::from_frame_width(mm_to_inches(40.0)), FrameTier::Mm40);
    assert_eq!(FrameTier::from_frame_width(Inches(f64::NAN)), FrameTier::Mm40);
    assert_eq!(FrameTier::Mm30.label(), "30");
}

#[test]
fn test_price_formatting() {
    assert_eq!(format_price(183.29), "$183.29");
    assert_eq!(format_price(0.8), "$0.80");
}
