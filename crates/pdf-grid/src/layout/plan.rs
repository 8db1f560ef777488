//! Full layout planning
//!
//! Chains grid resolution, canvas sizing and cell placement into a single
//! `LayoutPlan` that the renderer consumes.

use rayon::prelude::*;

use crate::types::{GridError, Result};

use super::{
    CanvasSizeRequest, LayoutParams, LayoutPlan, OutputPageLayout, PagePlacement, SourcePageRef,
    assign_pages, cell_bounds, cell_dimensions, place_page, resolve_grid, size_canvas,
};

/// Plan the placement of every source page.
///
/// The first page's aspect ratio drives auto-sizing. Placements are
/// computed in parallel and returned in source order.
///
/// # Arguments
/// * `pages` - Source page sizes, in document order
/// * `columns` - Requested columns
/// * `rows` - Requested rows, derived from the page count when `None`
/// * `params` - Spacing, orientation and auto-size tuning
/// * `canvas` - Auto-derive or use an explicit canvas size
pub fn plan_layout(
    pages: &[SourcePageRef],
    columns: usize,
    rows: Option<usize>,
    params: &LayoutParams,
    canvas: CanvasSizeRequest,
) -> Result<LayoutPlan> {
    let first = pages.first().ok_or(GridError::EmptyDocument)?;

    if let Some(page) = pages
        .iter()
        .find(|p| !(p.width.is_finite() && p.width > 0.0 && p.height.is_finite() && p.height > 0.0))
    {
        return Err(GridError::InvalidLayout(format!(
            "source page {} has a non-positive size {} x {}",
            page.index, page.width, page.height
        )));
    }

    let grid = resolve_grid(pages.len(), columns, rows)?;
    let sized = size_canvas(grid, first.aspect_ratio(), params, canvas)?;
    let cell = cell_dimensions(sized.size, grid, sized.spacing)?;

    log::debug!(
        "Grid {}x{}, cell {:.2} x {:.2} pt, gap {:.2}, padding {:.2}",
        grid.columns,
        grid.rows,
        cell.width,
        cell.height,
        sized.spacing.gap,
        sized.spacing.padding
    );

    let output_pages = assign_pages(pages.len(), grid)
        .into_par_iter()
        .map(|assignment| {
            let placements = pages[assignment.source_indices.clone()]
                .iter()
                .enumerate()
                .map(|(local_index, page)| {
                    let grid_pos = grid.position(local_index);
                    let bounds = cell_bounds(grid_pos, cell, sized.spacing);
                    PagePlacement {
                        source_index: page.index,
                        grid_pos,
                        cell: bounds,
                        placement: place_page(page, (bounds.x, bounds.y), cell),
                    }
                })
                .collect();

            OutputPageLayout {
                assignment,
                placements,
            }
        })
        .collect();

    Ok(LayoutPlan {
        grid,
        canvas: sized,
        cell,
        pages: output_pages,
    })
}
