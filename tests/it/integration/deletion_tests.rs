//! Frame, collection and wall deletion.

use crate::helpers::{TestPlannerBuilder, drain, frame_ids, small_frames, stored_state};
use wallplanner::ImageRef;
use wallplanner::events::PlannerEvent;

#[test]
fn test_delete_frame_keeps_siblings() {
    let (mut planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(3.0))
        .build();
    let collection_id = planner.collections()[0].id();
    let ids = frame_ids(&planner);

    assert!(planner.delete_frame(ids[1], collection_id));

    assert_eq!(frame_ids(&planner), vec![ids[0], ids[2]]);
    assert!(!planner.surface().is_attached(ids[1]));
    let state = stored_state(&store).unwrap();
    assert_eq!(state.frame_count(), 2);
}

#[test]
fn test_last_frame_removes_collection() {
    let (mut planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(1.0))
        .build();
    let collection_id = planner.collections()[0].id();
    let frame_id = frame_ids(&planner)[0];
    let rx = planner.subscribe();

    assert!(planner.remove_frame(frame_id));
    let events = drain(&rx);

    assert!(planner.collections().is_empty());
    assert!(planner.surface().is_empty());
    assert!(!planner.surface().has_legend(collection_id));
    let deleted = events
        .iter()
        .filter(|e| matches!(e, PlannerEvent::FrameDeleted { .. }))
        .count();
    assert_eq!(deleted, 1);
    assert!(events.contains(&PlannerEvent::CollectionEmpty { collection_id }));
    assert!(events.contains(&PlannerEvent::CollectionRemoved { collection_id }));
    assert!(stored_state(&store).unwrap().collections.is_empty());
}

#[test]
fn test_unknown_ids_are_rejected() {
    let (mut planner, _) = TestPlannerBuilder::new()
        .with_collection(small_frames(1.0))
        .build();
    let collection_id = planner.collections()[0].id();
    let frame_id = frame_ids(&planner)[0];

    assert!(!planner.delete_frame(frame_id, collection_id + 100));
    assert!(!planner.delete_frame(frame_id + 100, collection_id));
    assert!(!planner.remove_frame(frame_id + 100));
    assert!(!planner.delete_collection(collection_id + 100));
    assert_eq!(planner.frame_count(), 1);
}

#[test]
fn test_delete_collection_leaves_others() {
    let (mut planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .with_collection(small_frames(3.0))
        .build();
    let first = planner.collections()[0].id();

    assert!(planner.delete_collection(first));

    assert_eq!(planner.collections().len(), 1);
    assert_eq!(planner.frame_count(), 3);
    assert_eq!(planner.surface().attached_frames().len(), 3);
    assert_eq!(stored_state(&store).unwrap().frame_count(), 3);
}

#[test]
fn test_deleting_dragged_frame_ends_drag() {
    let (mut planner, _) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();
    let frame_id = frame_ids(&planner)[0];
    let at = planner.canvas().wall_to_client(planner.frame(frame_id).unwrap().position());
    planner.pointer_down(frame_id, &wallplanner::input::PointerEvent::mouse(at.0, at.1));

    assert!(planner.remove_frame(frame_id));
    assert_eq!(planner.active_drag(), None);
    assert_eq!(planner.pointer_up(&wallplanner::input::PointerEvent::mouse(0.0, 0.0)), None);
}

#[test]
fn test_delete_all_keeps_background_by_default() {
    let (mut planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .with_collection(small_frames(1.0))
        .build();
    planner.set_background_image(ImageRef::new("wall.jpg"), 4000.0, 3000.0);
    let wall = planner.wall();

    planner.delete_all(false);

    assert_eq!(planner.frame_count(), 0);
    assert!(planner.surface().is_empty());
    assert!(planner.background_image().is_some());
    let state = stored_state(&store).unwrap();
    assert!(state.collections.is_empty());
    assert!(state.background_image_url.is_some());

    planner.delete_all(true);
    assert!(planner.background_image().is_none());
    assert_eq!(planner.wall(), wall);
    assert!(stored_state(&store).unwrap().background_image_url.is_none());
}

#[test]
fn test_delete_all_hides_marquee() {
    let (mut planner, _) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();
    planner.run_deferred();
    assert!(planner.marquee().is_some());

    planner.delete_all(false);
    planner.run_deferred();
    assert_eq!(planner.marquee(), None);
}
