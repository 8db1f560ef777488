//! Content placement within cells
//!
//! This module computes the usable cell size for a canvas and fits each
//! source page into its cell, centered and without distortion.

use crate::types::{GridError, Result};

use super::{CanvasSize, CellSize, GridSpec, Placement, Rect, SourcePageRef, Spacing};

/// Calculate the size of one grid cell on `canvas`.
///
/// Fails with `DegenerateCell` when the padding and gaps leave no room.
pub fn cell_dimensions(canvas: CanvasSize, grid: GridSpec, spacing: Spacing) -> Result<CellSize> {
    let columns = grid.columns as f32;
    let rows = grid.rows as f32;

    let available_width = canvas.width - 2.0 * spacing.padding - (columns - 1.0) * spacing.gap;
    let available_height = canvas.height - 2.0 * spacing.padding - (rows - 1.0) * spacing.gap;

    let width = available_width / columns;
    let height = available_height / rows;

    // Also rejects NaN from a zero-column grid
    if !(width > 0.0 && height > 0.0) {
        return Err(GridError::DegenerateCell { width, height });
    }

    Ok(CellSize { width, height })
}

/// Fit `page` into the cell whose top-left corner is `cell_origin`.
///
/// The page keeps its aspect ratio, touches the cell on the limiting axis
/// and is centered on the other.
pub fn place_page(page: &SourcePageRef, cell_origin: (f32, f32), cell: CellSize) -> Placement {
    let (cell_x, cell_y) = cell_origin;
    let page_aspect = page.aspect_ratio();

    if page_aspect > cell.aspect_ratio() {
        let width = cell.width;
        let height = cell.width / page_aspect;
        let y_offset = (cell.height - height) / 2.0;
        Placement::WidthLimited(Rect::new(cell_x, cell_y + y_offset, width, height))
    } else {
        let height = cell.height;
        let width = cell.height * page_aspect;
        let x_offset = (cell.width - width) / 2.0;
        Placement::HeightLimited(Rect::new(cell_x + x_offset, cell_y, width, height))
    }
}
