//! Pricing and frame suggestions over a planned wall.

use crate::helpers::{TestPlannerBuilder, small_frames, stored_state};
use wallplanner::PlannerError;
use wallplanner::suggestion::{AspectRatio, MatchDimension, Orientation, SuggestionRequest};
use wallplanner::units::{Centimeters, Inches};

#[test]
fn test_quote_requires_collections() {
    let (planner, _) = TestPlannerBuilder::new().build();
    assert!(matches!(planner.quote(), Err(PlannerError::NoCollections)));
}

#[test]
fn test_default_frame_quote_report() {
    let (mut planner, _) = TestPlannerBuilder::new().build();
    planner.add_collection_from_form();

    let summary = planner.quote().unwrap();
    assert_eq!(summary.frame_count(), 1);
    insta::assert_snapshot!(summary.to_string(), @r#"
Collection 1
  Frame 1: 16.0" × 20.0" (20mm frame, 5.0cm mat)
    Frame: $135.34
    Print: $47.15
    Total: $183.29
  Collection Total: $183.29
Grand Total: $183.29
"#);
}

#[test]
fn test_quote_sums_every_frame() {
    let (planner, _) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .with_collection(small_frames(1.0))
        .build();

    let summary = planner.quote().unwrap();
    assert_eq!(summary.frame_count(), 3);
    // 12 x 15 in, no mat, 20 mm tier: $129.63 each.
    assert!((summary.grand_total() - 3.0 * 129.63).abs() < 0.01);
}

#[test]
fn test_suggestion_spans_layout() {
    let (planner, _) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();

    // Layout is 25 x 15; no mat on the frames, so the 5 cm default applies.
    let suggestion = planner.suggest(&SuggestionRequest::default()).unwrap();
    assert_eq!(suggestion.print_width, 21.0);
    assert_eq!(suggestion.print_height, 17.0);
    assert_eq!(suggestion.print_label(), "21.0\" × 17.0\"");
}

#[test]
fn test_suggestion_needs_frames() {
    let (planner, _) = TestPlannerBuilder::new().build();
    let err = planner.suggest(&SuggestionRequest::default()).unwrap_err();
    assert!(matches!(err, PlannerError::NoFrames));
}

#[test]
fn test_suggestion_rejects_zero_ratio() {
    let (planner, _) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();
    let request = SuggestionRequest {
        aspect_ratio: AspectRatio::Ratio(0.0),
        ..SuggestionRequest::default()
    };

    let err = planner.suggest(&request).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid aspect ratio 0. Please choose a positive ratio."
    );
}

#[test]
fn test_match_height_in_portrait() {
    let (planner, _) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();
    let request = SuggestionRequest {
        orientation: Orientation::Portrait,
        match_dimension: MatchDimension::Height,
        ..SuggestionRequest::default()
    };

    let suggestion = planner.suggest(&request).unwrap();
    // 15 - 2 x 1.9685 = 11.063 tall, x 0.8 = 8.85 wide.
    assert_eq!(suggestion.print_height, 11.0);
    assert_eq!(suggestion.print_width, 9.0);
}

#[test]
fn test_applied_suggestion_fills_form() {
    let (mut planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();

    let suggestion = planner.suggest(&SuggestionRequest::default()).unwrap();
    planner.apply_suggestion(&suggestion);

    let form = planner.new_collection();
    assert_eq!(form.print_width, Inches(21.0));
    assert_eq!(form.print_height, Inches(17.0));
    assert_eq!(form.matt_width, Centimeters(5.0));
    // No moulding on the layout: snapped to the narrowest offered width.
    assert_eq!(form.frame_width, Inches(0.787));
    assert_eq!(form.count, 1.0);
    assert_eq!(stored_state(&store).unwrap().new_collection.as_ref(), Some(form));
}
