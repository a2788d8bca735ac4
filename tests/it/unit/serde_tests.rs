//! Persisted document shape.

use wallplanner::collection::CollectionSpec;
use wallplanner::saved::SavedState;
use wallplanner::units::Centimeters;
use wallplanner::FrameMaterial;

#[test]
fn test_collection_spec_wire_names() {
    let spec = CollectionSpec::new(16.0, 20.0, 5.0, 0.787)
        .with_material(FrameMaterial::Oak)
        .with_color("#336699")
        .with_count(3.0);
    let json = serde_json::to_value(&spec).unwrap();
    insta::assert_json_snapshot!(json, @r###"
    {
      "color": "#336699",
      "count": 3.0,
      "frameMaterial": "oak",
      "frameWidth": 0.787,
      "mattWidth": 5.0,
      "printHeight": 20.0,
      "printWidth": 16.0
    }
    "###);
}

#[test]
fn test_minimal_document_parses() {
    let json = r#"{"collections": [
        {"printWidth": 8, "printHeight": 10, "mattWidth": 2.5, "frameWidth": 1}
    ]}"#;
    let state = SavedState::from_json(json).unwrap();
    let collection = &state.collections[0];
    assert_eq!(collection.matt_width, Centimeters(2.5));
    assert_eq!(collection.frame_material, FrameMaterial::default());
    assert_eq!(collection.frame_count(), 0);
    assert!(state.wall.is_none());
    assert!(state.metadata.is_none());
}

#[test]
fn test_unknown_material_is_rejected() {
    let json = r#"{"collections": [{"printWidth": 8, "printHeight": 10, "mattWidth": 0,
        "frameWidth": 1, "frameMaterial": "plastic"}]}"#;
    assert!(SavedState::from_json(json).is_err());
}
