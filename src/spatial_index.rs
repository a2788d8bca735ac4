//! Spatial Index Module
//!
//! R-tree broad phase for collision queries against every frame on the wall.
//! Entries remember their position in planner iteration order so that
//! "first colliding frame" stays deterministic no matter how the tree
//! happens to be balanced.

use crate::geometry::FrameRect;
use crate::types::FrameId;
use rstar::{AABB, RTree, RTreeObject};

/// A frame's outer box plus its ordinal in planner order.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub ordinal: usize,
    pub rect: FrameRect,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.x, self.rect.y],
            [self.rect.right(), self.rect.bottom()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.rect.id == other.rect.id
    }
}

/// Spatial index over frame rectangles.
///
/// Built per query batch (one placement run, one drag tick); frames only
/// move one at a time so rebuilding from the live list is cheap and never
/// goes stale.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    len: usize,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            len: 0,
        }
    }

    /// Bulk load from rects in planner order.
    pub fn from_rects<'a, I>(rects: I) -> Self
    where
        I: IntoIterator<Item = &'a FrameRect>,
    {
        let entries: Vec<SpatialEntry> = rects
            .into_iter()
            .filter(|r| r.is_finite())
            .enumerate()
            .map(|(ordinal, rect)| SpatialEntry {
                ordinal,
                rect: *rect,
            })
            .collect();
        let len = entries.len();
        Self {
            tree: RTree::bulk_load(entries),
            len,
        }
    }

    /// Append a rect after everything already indexed.
    pub fn insert(&mut self, rect: FrameRect) {
        if !rect.is_finite() {
            tracing::warn!(frame_id = rect.id, "Refusing to index non-finite frame rect");
            return;
        }
        self.tree.insert(SpatialEntry {
            ordinal: self.len,
            rect,
        });
        self.len += 1;
    }

    /// First indexed frame (in planner order) whose inflated box overlaps
    /// `candidate`. Frames with the candidate's own id are ignored.
    pub fn first_collision(&self, candidate: &FrameRect, spacing: f64) -> Option<FrameRect> {
        if !candidate.is_finite() {
            return None;
        }
        let reach = spacing.max(0.0);
        let envelope = AABB::from_corners(
            [candidate.x - reach, candidate.y - reach],
            [candidate.right() + reach, candidate.bottom() + reach],
        );

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.rect.id != candidate.id)
            .filter(|entry| candidate.collides_with(&entry.rect, spacing))
            .min_by_key(|entry| entry.ordinal)
            .map(|entry| entry.rect)
    }

    /// Ids of every indexed frame that overlaps `candidate`.
    pub fn all_collisions(&self, candidate: &FrameRect, spacing: f64) -> Vec<FrameId> {
        let reach = spacing.max(0.0);
        let envelope = AABB::from_corners(
            [candidate.x - reach, candidate.y - reach],
            [candidate.right() + reach, candidate.bottom() + reach],
        );
        let mut hits: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.rect.id != candidate.id)
            .filter(|entry| candidate.collides_with(&entry.rect, spacing))
            .collect();
        hits.sort_by_key(|entry| entry.ordinal);
        hits.into_iter().map(|entry| entry.rect.id).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
