//! Grid resolution and page assignment
//!
//! This module decides how many rows the grid has and which source pages
//! land on which output page.

use crate::types::{GridError, Result};

use super::{CellSize, GridPosition, GridSpec, OutputPageAssignment, Rect, Spacing};

// =============================================================================
// Grid Resolution
// =============================================================================

/// Resolve the grid for `total_pages` thumbnails.
///
/// Supplied rows are returned unchanged even when the grid holds fewer
/// thumbnails than there are pages; the remainder spills onto additional
/// output pages. Missing rows become `ceil(total_pages / columns)`.
pub fn resolve_grid(total_pages: usize, columns: usize, rows: Option<usize>) -> Result<GridSpec> {
    if total_pages == 0 {
        return Err(GridError::InvalidGrid(
            "page count must be greater than 0".to_string(),
        ));
    }
    if columns == 0 {
        return Err(GridError::InvalidGrid(
            "columns must be greater than 0".to_string(),
        ));
    }

    let rows = match rows {
        Some(0) => {
            return Err(GridError::InvalidGrid(
                "rows must be greater than 0".to_string(),
            ));
        }
        Some(rows) => rows,
        None => total_pages.div_ceil(columns),
    };

    if columns.checked_mul(rows).is_none() {
        return Err(GridError::InvalidGrid(format!(
            "{} x {} thumbnails per page is too many",
            columns, rows
        )));
    }

    Ok(GridSpec::new(columns, rows))
}

// =============================================================================
// Page Assignment
// =============================================================================

/// Split `[0, total_pages)` into consecutive blocks of at most
/// `grid.capacity()` pages, one block per output page.
pub fn assign_pages(total_pages: usize, grid: GridSpec) -> Vec<OutputPageAssignment> {
    let capacity = grid.capacity();
    if capacity == 0 {
        return Vec::new();
    }

    (0..total_pages)
        .step_by(capacity)
        .enumerate()
        .map(|(output_page_index, start)| OutputPageAssignment {
            output_page_index,
            source_indices: start..start.saturating_add(capacity).min(total_pages),
        })
        .collect()
}

// =============================================================================
// Cell Geometry
// =============================================================================

/// Top-left corner of the cell at `pos`
pub fn cell_origin(pos: GridPosition, cell: CellSize, spacing: Spacing) -> (f32, f32) {
    let x = spacing.padding + pos.col as f32 * (cell.width + spacing.gap);
    let y = spacing.padding + pos.row as f32 * (cell.height + spacing.gap);
    (x, y)
}

/// Bounds of the cell at `pos`
pub fn cell_bounds(pos: GridPosition, cell: CellSize, spacing: Spacing) -> Rect {
    let (x, y) = cell_origin(pos, cell, spacing);
    Rect::new(x, y, cell.width, cell.height)
}

// =============================================================================
// Tests
// =============================================================================
