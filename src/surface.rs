//! Rendering-surface registry.
//!
//! The planner does not draw. It keeps track of what the host has attached
//! to the wall (frame elements and legend entries) plus the transient
//! visual flags it owns: collision highlights and the "dragging" marker.
//! Deletion verification and cross-tab validation both scan this registry.

use crate::types::{CollectionId, FrameId};
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct WallSurface {
    frames: Vec<FrameId>,
    legend: Vec<CollectionId>,
    collisions: HashSet<FrameId>,
    dragging: Option<FrameId>,
}

impl WallSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_frame(&mut self, frame_id: FrameId) {
        if !self.frames.contains(&frame_id) {
            self.frames.push(frame_id);
        }
    }

    /// Returns whether the element was attached.
    pub fn detach_frame(&mut self, frame_id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|&id| id != frame_id);
        self.collisions.remove(&frame_id);
        if self.dragging == Some(frame_id) {
            self.dragging = None;
        }
        self.frames.len() != before
    }

    pub fn is_attached(&self, frame_id: FrameId) -> bool {
        self.frames.contains(&frame_id)
    }

    /// Attached frame elements in attach order
    pub fn attached_frames(&self) -> &[FrameId] {
        &self.frames
    }

    pub fn attach_legend(&mut self, collection_id: CollectionId) {
        if !self.legend.contains(&collection_id) {
            self.legend.push(collection_id);
        }
    }

    pub fn detach_legend(&mut self, collection_id: CollectionId) -> bool {
        let before = self.legend.len();
        self.legend.retain(|&id| id != collection_id);
        self.legend.len() != before
    }

    pub fn has_legend(&self, collection_id: CollectionId) -> bool {
        self.legend.contains(&collection_id)
    }

    pub fn legend_entries(&self) -> &[CollectionId] {
        &self.legend
    }

    pub fn mark_collision(&mut self, frame_id: FrameId) {
        self.collisions.insert(frame_id);
    }

    pub fn clear_collision_marks(&mut self) {
        self.collisions.clear();
    }

    pub fn has_collision_mark(&self, frame_id: FrameId) -> bool {
        self.collisions.contains(&frame_id)
    }

    pub fn collision_count(&self) -> usize {
        self.collisions.len()
    }

    pub fn set_dragging(&mut self, frame_id: Option<FrameId>) {
        self.dragging = frame_id;
    }

    pub fn dragging(&self) -> Option<FrameId> {
        self.dragging
    }

    /// Detach everything.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.legend.clear();
        self.collisions.clear();
        self.dragging = None;
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.legend.is_empty()
    }
}
