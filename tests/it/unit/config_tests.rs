//! Config file loading.

use wallplanner::PlannerConfig;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::load_or_default(&dir.path().join("absent.json"));
    assert_eq!(&config, PlannerConfig::defaults());
}

#[test]
fn test_overrides_and_sanitizing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "wall": {"width": 0, "height": 50},
            "gridSize": 0,
            "pxPerInch": 4,
            "storageKey": "otherWall",
            "frameWidthOptionsMm": [-1, 15]
        }"#,
    )
    .unwrap();

    let config = PlannerConfig::load(&path).unwrap();
    assert_eq!(config.wall, PlannerConfig::defaults().wall);
    assert_eq!(config.grid_size, 0.0);
    assert_eq!(config.px_per_inch, 4.0);
    assert_eq!(config.storage_key, "otherWall");
    assert_eq!(config.frame_width_options_mm, vec![15.0]);
}

#[test]
fn test_canvas_scale_follows_config() {
    let config = PlannerConfig {
        px_per_inch: 4.0,
        ..PlannerConfig::default()
    };
    let planner = wallplanner::LayoutPlanner::new(config, wallplanner::MemoryStore::new());
    assert_eq!(planner.canvas().wall_to_client((10.0, 5.0)), (40.0, 20.0));
}
