//! Initial placement for a new collection.
//!
//! Frames go onto a row-major grid whose cells are one frame plus the
//! spacing. A cell that collides with anything already on the wall (or with
//! a frame placed earlier in the same run) triggers a spiral search around
//! the grid center; if the search finds nothing the frame keeps its original
//! cell and the user sorts it out by hand.

use crate::geometry::FrameRect;
use crate::perf::PLACEMENT_BUDGET_MS;
use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use crate::types::{FrameId, Wall};
use tracing::{debug, info, warn};

/// Read access to every frame currently on the wall.
///
/// Handed to placement at construction time instead of a reference back to
/// the planner.
pub trait FrameRects {
    fn frame_rects(&self) -> Vec<FrameRect>;
}

impl FrameRects for [FrameRect] {
    fn frame_rects(&self) -> Vec<FrameRect> {
        self.to_vec()
    }
}

impl FrameRects for Vec<FrameRect> {
    fn frame_rects(&self) -> Vec<FrameRect> {
        self.clone()
    }
}

/// A cell in the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: i64,
    pub col: i64,
}

/// Everything placement needs besides the existing frames.
#[derive(Debug, Clone, Copy)]
pub struct PlacementParams {
    pub wall: Wall,
    /// Outer frame width in inches
    pub frame_width: f64,
    /// Outer frame height in inches
    pub frame_height: f64,
    pub spacing: f64,
    /// Row bound for the spiral search
    pub spiral_rows: usize,
}

impl PlacementParams {
    fn cell_size(&self) -> (f64, f64) {
        (self.frame_width + self.spacing, self.frame_height + self.spacing)
    }

    /// Number of grid columns that fit the wall, at least one.
    pub fn max_cols(&self) -> usize {
        let (cell_w, _) = self.cell_size();
        let cols = ((self.wall.width - self.spacing) / cell_w).floor();
        if cols.is_finite() && cols >= 1.0 {
            cols as usize
        } else {
            warn!(
                wall_width = self.wall.width,
                cell_w, "Frame wider than the wall, using a single column"
            );
            1
        }
    }

    fn cell_origin(&self, cell: GridCell) -> (f64, f64) {
        let (cell_w, cell_h) = self.cell_size();
        (
            self.spacing + cell.col as f64 * cell_w,
            self.spacing + cell.row as f64 * cell_h,
        )
    }

    fn fits_wall(&self, x: f64, y: f64) -> bool {
        x + self.frame_width <= self.wall.width && y + self.frame_height <= self.wall.height
    }
}

/// Grid cells in spiral order around the center of a `max_cols` x `max_rows`
/// grid, center first, clipped to the grid.
pub fn spiral_cells(max_cols: usize, max_rows: usize) -> Vec<GridCell> {
    let cols = max_cols as i64;
    let rows = max_rows as i64;
    let center = GridCell {
        row: rows / 2,
        col: cols / 2,
    };

    let mut cells = vec![center];
    for layer in 1..=cols.max(rows) {
        // top edge, left to right
        for c in (-layer + 1)..=layer {
            cells.push(GridCell {
                row: center.row - layer,
                col: center.col + c,
            });
        }
        // right edge, downwards
        for r in (-layer + 1)..=layer {
            cells.push(GridCell {
                row: center.row + r,
                col: center.col + layer,
            });
        }
        // bottom edge, right to left
        for c in (-layer..=(layer - 1)).rev() {
            cells.push(GridCell {
                row: center.row + layer,
                col: center.col + c,
            });
        }
        // left edge, upwards
        for r in (-layer..=(layer - 1)).rev() {
            cells.push(GridCell {
                row: center.row + r,
                col: center.col - layer,
            });
        }
    }

    cells.retain(|cell| cell.row >= 0 && cell.row < rows && cell.col >= 0 && cell.col < cols);
    cells
}

/// Top-left positions for frames `ids`, in order.
pub fn place_frames(
    params: &PlacementParams,
    ids: &[FrameId],
    existing: &dyn FrameRects,
) -> Vec<(f64, f64)> {
    profile_scope!("place_frames", PLACEMENT_BUDGET_MS);

    let mut working = SpatialIndex::from_rects(&existing.frame_rects());
    let max_cols = params.max_cols();
    let mut spiral: Option<Vec<GridCell>> = None;
    let mut positions = Vec::with_capacity(ids.len());

    for (i, &id) in ids.iter().enumerate() {
        let cell = GridCell {
            row: (i / max_cols) as i64,
            col: (i % max_cols) as i64,
        };
        let (mut x, mut y) = params.cell_origin(cell);
        let collides = |x: f64, y: f64, index: &SpatialIndex| {
            let candidate = FrameRect::new(id, x, y, params.frame_width, params.frame_height);
            index.first_collision(&candidate, params.spacing).is_some()
        };

        if collides(x, y, &working) {
            debug!(frame_id = id, x, y, "Grid cell occupied, searching spiral");
            let cells = spiral.get_or_insert_with(|| spiral_cells(max_cols, params.spiral_rows));
            let free = cells
                .iter()
                .map(|&c| params.cell_origin(c))
                .filter(|&(cx, cy)| params.fits_wall(cx, cy))
                .find(|&(cx, cy)| !collides(cx, cy, &working));

            match free {
                Some((fx, fy)) => {
                    x = fx;
                    y = fy;
                }
                None => info!(
                    frame_id = id,
                    x, y, "No free cell found, keeping overlapping placement"
                ),
            }
        }

        working.insert(FrameRect::new(
            id,
            x,
            y,
            params.frame_width,
            params.frame_height,
        ));
        positions.push((x, y));
    }
    positions
}
