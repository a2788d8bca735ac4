//! Save, restore and cross-tab validation through a shared store.

use crate::helpers::{TestPlannerBuilder, approx_eq, frame_ids, small_frames, stored_state};
use wallplanner::collection::CollectionSpec;
use wallplanner::saved::SavedFrame;
use wallplanner::{ImageRef, PlannerConfig, StateStore, Wall};

fn storage_key() -> String {
    PlannerConfig::default().storage_key
}

#[test]
fn test_round_trip_between_planners() {
    let (mut first, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(3.0))
        .build();
    let thumb_frame = frame_ids(&first)[1];
    first.set_thumbnail(thumb_frame, ImageRef::new("data:image/png;base64,AAAA"));
    first.set_wall_dimensions(100.0, 90.0);
    first.update_grid_size(1.0);

    let (second, _) = TestPlannerBuilder::new().with_store(&store).open();

    assert_eq!(second.wall(), Wall::new(100.0, 90.0));
    assert_eq!(second.grid_size(), 1.0);
    assert_eq!(second.collections().len(), 1);
    let positions: Vec<(f64, f64)> = second.frames().map(|f| f.position()).collect();
    assert_eq!(positions, vec![(1.0, 1.0), (14.0, 1.0), (27.0, 1.0)]);

    let restored = &second.collections()[0];
    assert_eq!(restored.color(), first.collections()[0].color());
    assert_eq!(
        restored.frames()[1].thumbnail(),
        Some(&ImageRef::new("data:image/png;base64,AAAA"))
    );
    assert!(restored.frames()[0].thumbnail().is_none());
    assert!(second.frames().all(|f| f.drag_manager().grid_size() == 1.0));
}

#[test]
fn test_mat_width_survives_in_centimeters() {
    let (_, store) = TestPlannerBuilder::new()
        .with_collection(CollectionSpec::new(16.0, 20.0, 5.0, 0.5))
        .build();

    let state = stored_state(&store).unwrap();
    assert_eq!(state.collections[0].matt_width.value(), 5.0);

    let (planner, _) = TestPlannerBuilder::new().with_store(&store).open();
    let collection = &planner.collections()[0];
    assert!(approx_eq(collection.matt_width(), 5.0 / 2.54));
    let frame = &collection.frames()[0];
    assert!(approx_eq(frame.width(), 16.0 + 2.0 * (5.0 / 2.54) + 1.0));
}

#[test]
fn test_restore_rewrites_live_ids() {
    let (_, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();

    let (planner, _) = TestPlannerBuilder::new().with_store(&store).open();

    let stored: Vec<_> = stored_state(&store).unwrap().collections[0]
        .frames
        .as_ref()
        .unwrap()
        .iter()
        .map(|f| f.id)
        .collect();
    let live: Vec<_> = frame_ids(&planner).into_iter().map(Some).collect();
    assert_eq!(stored, live);
}

#[test]
fn test_missing_state_uses_defaults() {
    let (mut planner, store) = TestPlannerBuilder::new().build();
    assert!(!planner.load_state());
    assert_eq!(planner.wall(), Wall::default());
    assert_eq!(planner.grid_size(), 0.5);
    assert_eq!(planner.frame_spacing(), 1.0);
    assert!(store.is_empty());
}

#[test]
fn test_corrupted_state_is_discarded() {
    let store = wallplanner::MemoryStore::new();
    store.set(&storage_key(), "{\"collections\": [oops").unwrap();

    let (planner, store) = TestPlannerBuilder::new().with_store(&store).open();

    assert!(planner.collections().is_empty());
    assert_eq!(planner.wall(), Wall::default());
    assert_eq!(store.get(&storage_key()).unwrap(), None);
}

#[test]
fn test_partial_state_keeps_defaults() {
    let store = wallplanner::MemoryStore::new();
    let json = r#"{
        "wall": {"width": 120, "height": 60},
        "collections": [
            {"printWidth": 10, "printHeight": 10, "mattWidth": 0, "frameWidth": 0,
             "frames": [{"x": 5, "y": 5}]},
            {"printWidth": 10, "printHeight": 10, "mattWidth": 0, "frameWidth": 0,
             "frames": []}
        ],
        "gridSize": 0,
        "frameSpacing": 0
    }"#;
    store.set(&storage_key(), json).unwrap();

    let (planner, _) = TestPlannerBuilder::new().with_store(&store).open();

    assert_eq!(planner.wall(), Wall::new(120.0, 60.0));
    assert_eq!(planner.grid_size(), 0.5);
    assert_eq!(planner.frame_spacing(), 1.0);
    assert_eq!(planner.collections().len(), 1);
    assert_eq!(planner.frames().next().unwrap().position(), (5.0, 5.0));
    assert!(planner.collections()[0].color().starts_with('#'));
}

#[test]
fn test_invalid_saved_wall_falls_back() {
    let store = wallplanner::MemoryStore::new();
    store
        .set(&storage_key(), r#"{"wall": {"width": -5}, "collections": []}"#)
        .unwrap();

    let (planner, _) = TestPlannerBuilder::new().with_store(&store).open();
    assert_eq!(planner.wall(), Wall::default());
}

#[test]
fn test_metadata_counts_frames() {
    let (_, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .with_collection(small_frames(3.0))
        .build();

    let metadata = stored_state(&store).unwrap().metadata.unwrap();
    assert_eq!(metadata.frame_count, 5);
    assert_eq!(metadata.collection_count, 2);
    assert_eq!(metadata.version, "1.0.0");
    assert!(metadata.timestamp > 0);
}

#[test]
fn test_validation_drops_detached_frames() {
    let (mut planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(3.0))
        .build();

    // Another tab wrote a frame this planner never attached, plus a
    // collection made only of such frames.
    let mut state = stored_state(&store).unwrap();
    let mut foreign = state.collections[0].clone();
    foreign.frames = Some(vec![SavedFrame {
        id: Some(9_999),
        x: 60.0,
        y: 60.0,
        thumbnail_image: None,
    }]);
    if let Some(frames) = state.collections[0].frames.as_mut() {
        frames.push(SavedFrame {
            id: Some(9_998),
            x: 40.0,
            y: 40.0,
            thumbnail_image: None,
        });
    }
    state.collections.push(foreign);
    store.set(&storage_key(), &state.to_json().unwrap()).unwrap();

    assert!(planner.validate_saved_state());
    let cleaned = stored_state(&store).unwrap();
    assert_eq!(cleaned.collections.len(), 1);
    assert_eq!(cleaned.frame_count(), 3);

    // Already consistent: nothing to rewrite.
    assert!(!planner.validate_saved_state());
}

#[test]
fn test_form_spec_is_persisted() {
    let (mut planner, store) = TestPlannerBuilder::new().build();
    let spec = CollectionSpec::new(24.0, 36.0, 7.5, 1.0).with_count(2.0);
    planner.set_new_collection(spec.clone());

    let (mut reopened, _) = TestPlannerBuilder::new().with_store(&store).open();
    assert_eq!(reopened.new_collection(), &spec);

    let id = reopened.add_collection_from_form();
    assert_eq!(reopened.collection(id).unwrap().len(), 2);
}

#[test]
fn test_non_finite_collection_input_does_not_lose_state() {
    let (mut planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(3.0))
        .build();
    let id = planner.add_collection(&CollectionSpec::new(f64::NAN, 15.0, 0.0, 0.0));

    let added = planner.collection(id).unwrap();
    assert_eq!(added.print_width(), 0.0);

    let saved = stored_state(&store).unwrap();
    assert_eq!(saved.collections.len(), 2);
    assert_eq!(saved.collections[1].print_width.value(), 0.0);

    let (reopened, _) = TestPlannerBuilder::new().with_store(&store).open();
    assert_eq!(reopened.collections().len(), 2);
    assert_eq!(reopened.frames().count(), 4);
}

#[test]
fn test_non_finite_form_spec_is_coerced() {
    let (mut planner, store) = TestPlannerBuilder::new().build();
    let spec = CollectionSpec::new(16.0, f64::INFINITY, f64::NAN, 0.5).with_count(f64::NAN);
    planner.set_new_collection(spec);

    let form = planner.new_collection();
    assert_eq!(form.print_height.value(), 0.0);
    assert_eq!(form.matt_width.value(), 0.0);
    assert_eq!(form.count, 1.0);

    let (reopened, _) = TestPlannerBuilder::new().with_store(&store).open();
    assert_eq!(reopened.new_collection(), form);
}
