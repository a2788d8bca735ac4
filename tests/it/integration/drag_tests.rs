//! Pointer-driven dragging: snapping, push-back, blocking and release.

use crate::helpers::{
    TestPlannerBuilder, client_at, drain, frame_ids, moves_of, small_frames, stored_state,
};
use wallplanner::input::{MouseButton, PointerEvent, StepOutcome};
use wallplanner::{FrameId, LayoutPlanner, MemoryStore};

/// Two 12 x 15 frames at (1, 1) and (14, 1).
fn two_frames() -> (LayoutPlanner, MemoryStore, FrameId, FrameId) {
    let (planner, store) = TestPlannerBuilder::new()
        .with_collection(small_frames(2.0))
        .build();
    let ids = frame_ids(&planner);
    (planner, store, ids[0], ids[1])
}

fn mouse(client: (f64, f64)) -> PointerEvent {
    PointerEvent::mouse(client.0, client.1)
}

#[test]
fn test_free_drag_follows_pointer() {
    let (mut planner, _, _, b) = two_frames();
    assert!(planner.pointer_down(b, &mouse(client_at(&planner, b))));
    assert_eq!(planner.active_drag(), Some(b));
    assert_eq!(planner.surface().dragging(), Some(b));

    // 10 px per inch: (403, 298) px is (40.3, 29.8)", snapped to 0.5".
    let step = planner.pointer_move(&mouse((403.0, 298.0))).unwrap();
    assert_eq!(step.outcome, StepOutcome::Moved);
    assert_eq!(planner.frame(b).unwrap().position(), (40.5, 30.0));
}

#[test]
fn test_grab_offset_is_kept() {
    let (mut planner, _, _, b) = two_frames();
    let (cx, cy) = client_at(&planner, b);
    // Grab 5" right and 3" down from the corner.
    planner.pointer_down(b, &mouse((cx + 50.0, cy + 30.0)));
    planner.pointer_move(&mouse((cx + 150.0, cy + 230.0)));
    assert_eq!(planner.frame(b).unwrap().position(), (24.0, 21.0));
}

#[test]
fn test_drop_onto_neighbour_pushes_clear() {
    let (mut planner, _, a, b) = two_frames();
    planner.pointer_down(b, &mouse(client_at(&planner, b)));

    // Candidate (2, 1) overlaps frame a; pushed right by 12".
    let step = planner.pointer_move(&mouse((20.0, 10.0))).unwrap();
    assert_eq!(step.outcome, StepOutcome::Pushed { by: a });
    assert_eq!(planner.frame(b).unwrap().position(), (14.0, 1.0));
    assert_eq!(planner.surface().collision_count(), 0);
}

#[test]
fn test_push_off_wall_is_blocked() {
    let (mut planner, _, a, b) = two_frames();
    planner.pointer_down(b, &mouse(client_at(&planner, b)));
    planner.pointer_move(&mouse((300.0, 10.0)));
    assert_eq!(planner.frame(b).unwrap().position(), (30.0, 1.0));

    // Candidate (0, 1): the push to the left leaves the wall.
    let step = planner.pointer_move(&mouse((0.0, 10.0))).unwrap();
    assert_eq!(step.outcome, StepOutcome::Blocked { by: a });
    assert_eq!(planner.frame(b).unwrap().position(), (30.0, 1.0));
    assert!(planner.surface().has_collision_mark(a));
    assert!(planner.surface().has_collision_mark(b));

    planner.pointer_up(&mouse((0.0, 10.0)));
    assert_eq!(planner.surface().collision_count(), 0);
    assert_eq!(planner.surface().dragging(), None);
}

#[test]
fn test_drag_clamps_to_wall() {
    let (mut planner, _, _, b) = two_frames();
    planner.pointer_down(b, &mouse(client_at(&planner, b)));
    planner.pointer_move(&mouse((5_000.0, 5_000.0)));
    // 80 x 80 wall minus the 12 x 15 frame.
    assert_eq!(planner.frame(b).unwrap().position(), (68.0, 65.0));
}

#[test]
fn test_pointer_up_emits_exactly_one_move() {
    let (mut planner, _, _, b) = two_frames();
    planner.pointer_down(b, &mouse(client_at(&planner, b)));
    planner.pointer_move(&mouse((400.0, 300.0)));

    let rx = planner.subscribe();
    assert_eq!(planner.pointer_up(&mouse((400.0, 300.0))), Some(b));
    let events = drain(&rx);

    assert_eq!(moves_of(&events, b), 1);
    assert_eq!(events.iter().filter(|e| e.is_move()).count(), 1);
    assert_eq!(planner.active_drag(), None);
    assert!(!planner.frame(b).unwrap().drag_manager().is_dragging());
}

#[test]
fn test_release_without_drag_is_silent() {
    let (mut planner, _, _, _) = two_frames();
    let rx = planner.subscribe();
    assert_eq!(planner.pointer_up(&mouse((0.0, 0.0))), None);
    assert!(planner.pointer_move(&mouse((10.0, 10.0))).is_none());
    assert!(drain(&rx).is_empty());
}

#[test]
fn test_only_single_pointer_starts_drag() {
    let (mut planner, _, a, _) = two_frames();
    let at = client_at(&planner, a);

    assert!(!planner.pointer_down(a, &mouse(at).with_button(MouseButton::Secondary)));
    assert!(!planner.pointer_down(a, &PointerEvent::touch(2, at.0, at.1)));
    assert!(!planner.pointer_down(a, &mouse(at).on_controls()));
    assert_eq!(planner.active_drag(), None);

    assert!(planner.pointer_down(a, &PointerEvent::touch(1, at.0, at.1)));
    // A second finger mid-drag is ignored.
    assert!(planner.pointer_move(&PointerEvent::touch(2, 500.0, 500.0)).is_none());
    assert_eq!(planner.frame(a).unwrap().position(), (1.0, 1.0));
}

#[test]
fn test_touch_cancel_finishes_drag() {
    let (mut planner, _, a, _) = two_frames();
    let at = client_at(&planner, a);
    planner.pointer_down(a, &PointerEvent::touch(1, at.0, at.1));
    planner.pointer_move(&PointerEvent::touch(1, 300.0, 400.0));

    assert_eq!(planner.pointer_cancel(), Some(a));
    assert_eq!(planner.active_drag(), None);
    assert_eq!(planner.frame(a).unwrap().position(), (30.0, 40.0));
}

#[test]
fn test_new_press_ends_stale_drag() {
    let (mut planner, _, a, b) = two_frames();
    planner.pointer_down(a, &mouse(client_at(&planner, a)));
    planner.pointer_down(b, &mouse(client_at(&planner, b)));

    assert_eq!(planner.active_drag(), Some(b));
    assert!(!planner.frame(a).unwrap().drag_manager().is_dragging());
    assert!(planner.frame(b).unwrap().drag_manager().is_dragging());
}

#[test]
fn test_dropped_position_is_persisted() {
    let (mut planner, store, _, b) = two_frames();
    planner.pointer_down(b, &mouse(client_at(&planner, b)));
    planner.pointer_move(&mouse((505.0, 402.0)));
    planner.pointer_up(&mouse((505.0, 402.0)));

    let state = stored_state(&store).unwrap();
    let frames = state.collections[0].frames.as_ref().unwrap();
    let saved = frames.iter().find(|f| f.id == Some(b)).unwrap();
    assert_eq!((saved.x, saved.y), (50.5, 40.0));
}
