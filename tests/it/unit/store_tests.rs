//! File-backed state store.

use wallplanner::{FileStore, LayoutPlanner, PlannerConfig, StateStore};

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("nested")).unwrap();

    assert_eq!(store.get("wall").unwrap(), None);
    store.set("wall", "{\"a\":1}").unwrap();
    assert_eq!(store.get("wall").unwrap().as_deref(), Some("{\"a\":1}"));
    store.set("wall", "{}").unwrap();
    assert_eq!(store.get("wall").unwrap().as_deref(), Some("{}"));

    store.remove("wall").unwrap();
    store.remove("wall").unwrap();
    assert_eq!(store.get("wall").unwrap(), None);
}

#[test]
fn test_key_maps_to_safe_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let path = store.path_for("../wall state");
    assert_eq!(path, dir.path().join("___wall_state.json"));
}

#[test]
fn test_planner_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    let mut planner = LayoutPlanner::new(PlannerConfig::default(), store.clone());
    planner.add_collection_from_form();
    assert!(store.path_for(&PlannerConfig::default().storage_key).exists());

    let reopened = LayoutPlanner::open(PlannerConfig::default(), store);
    assert_eq!(reopened.frame_count(), 1);
    assert_eq!(reopened.frames().next().unwrap().position(), (1.0, 1.0));
}

#[test]
fn test_watcher_sees_atomic_rewrite() {
    use std::time::Duration;
    use wallplanner::store::{StoreEvent, StoreWatcher};

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let watcher = StoreWatcher::new(&store, "wall").unwrap();
    assert_eq!(watcher.poll(), None);

    // Unrelated keys are filtered out
    store.set("other", "{}").unwrap();
    store.set("wall", "{}").unwrap();

    let event = watcher.wait(Duration::from_secs(5));
    assert!(matches!(
        event,
        Some(StoreEvent::Created | StoreEvent::Modified)
    ));
}
