//! Collision, snapping and marquee geometry.

use wallplanner::geometry::{FrameRect, bounding_marquee, snap_to_grid};
use wallplanner::spatial_index::SpatialIndex;

#[test]
fn test_snap_to_grid() {
    assert_eq!(snap_to_grid(3.3, 0.5), 3.5);
    assert_eq!(snap_to_grid(3.2, 0.5), 3.0);
    assert_eq!(snap_to_grid(3.3, 0.0), 3.3);
}

#[test]
fn test_spacing_counts_as_collision() {
    let a = FrameRect::new(1, 0.0, 0.0, 10.0, 10.0);
    let b = FrameRect::new(2, 10.9, 0.0, 10.0, 10.0);
    assert!(a.collides_with(&b, 1.0));
    assert!(!a.collides_with(&b.at(11.0, 0.0), 1.0));
}

#[test]
fn test_index_finds_only_real_collisions() {
    let index = SpatialIndex::from_rects(&[
        FrameRect::new(1, 0.0, 0.0, 10.0, 10.0),
        FrameRect::new(2, 40.0, 40.0, 10.0, 10.0),
    ]);
    let candidate = FrameRect::new(3, 45.0, 45.0, 10.0, 10.0);
    assert_eq!(index.first_collision(&candidate, 1.0).map(|r| r.id), Some(2));
    let clear = FrameRect::new(3, 20.0, 20.0, 5.0, 5.0);
    assert!(index.first_collision(&clear, 1.0).is_none());
}

#[test]
fn test_marquee_skips_invalid_frames() {
    let rects = [
        FrameRect::new(1, 1.0, 1.0, 12.0, 15.0),
        FrameRect::new(2, f64::NAN, 0.0, 12.0, 15.0),
        FrameRect::new(3, 30.0, 20.0, 0.0, 15.0),
        FrameRect::new(4, 14.0, 1.0, 12.0, 15.0),
    ];
    let marquee = bounding_marquee(&rects).unwrap();
    assert_eq!(marquee.label(), "25.0\" × 15.0\"");
    assert!(bounding_marquee(&rects[1..3]).is_none());
    assert!(bounding_marquee(&[]).is_none());
}
