//! Output canvas sizing
//!
//! The canvas is either derived from the content (auto) or taken from a
//! fixed size and normalised to the requested orientation (explicit).
//! The two paths use different spacing on purpose: auto-sized canvases
//! compact the requested gap and padding, explicit ones keep them as given.

use crate::constants::pt_to_in;
use crate::types::{GridError, Orientation, Result};

use super::{CanvasSize, CanvasSizeRequest, GridSpec, LayoutParams, SizedCanvas, Spacing};

/// Choose the output page size for a grid.
///
/// # Arguments
/// * `grid` - Resolved grid dimensions
/// * `reference_aspect_ratio` - Width / height of the first source page
/// * `params` - Spacing, orientation and auto-size tuning
/// * `request` - Auto-derive or use an explicit size
pub fn size_canvas(
    grid: GridSpec,
    reference_aspect_ratio: f32,
    params: &LayoutParams,
    request: CanvasSizeRequest,
) -> Result<SizedCanvas> {
    if grid.columns == 0 || grid.rows == 0 {
        return Err(GridError::InvalidLayout(format!(
            "grid must have at least one column and row, got {}x{}",
            grid.columns, grid.rows
        )));
    }
    if !(reference_aspect_ratio.is_finite() && reference_aspect_ratio > 0.0) {
        return Err(GridError::InvalidLayout(format!(
            "reference aspect ratio must be positive, got {}",
            reference_aspect_ratio
        )));
    }

    match request {
        CanvasSizeRequest::Auto => auto_canvas(grid, reference_aspect_ratio, params),
        CanvasSizeRequest::Explicit(size) => explicit_canvas(size, params),
    }
}

/// Derive a canvas that wraps `grid` thumbnails of the reference aspect ratio
pub fn auto_canvas(
    grid: GridSpec,
    reference_aspect_ratio: f32,
    params: &LayoutParams,
) -> Result<SizedCanvas> {
    let tuning = &params.tuning;
    if !(tuning.base_thumb_height.is_finite() && tuning.base_thumb_height > 0.0) {
        return Err(GridError::InvalidLayout(format!(
            "base thumbnail height must be positive, got {}",
            tuning.base_thumb_height
        )));
    }

    let thumb_height = tuning.base_thumb_height;
    let thumb_width = thumb_height * reference_aspect_ratio;

    let spacing = Spacing {
        gap: params.gap * tuning.gap_factor,
        padding: params.padding * tuning.padding_factor,
    };

    let columns = grid.columns as f32;
    let rows = grid.rows as f32;
    let width = columns * thumb_width + (columns - 1.0) * spacing.gap + 2.0 * spacing.padding;
    let height = rows * thumb_height + (rows - 1.0) * spacing.gap + 2.0 * spacing.padding;

    log::info!(
        "Auto-calculated page size: {:.2} x {:.2} pt ({:.2} x {:.2} in)",
        width,
        height,
        pt_to_in(width),
        pt_to_in(height)
    );

    Ok(SizedCanvas {
        size: CanvasSize::new(width, height),
        spacing,
        auto: true,
    })
}

/// Use a fixed, portrait-authored size, swapped for landscape
pub fn explicit_canvas(size: CanvasSize, params: &LayoutParams) -> Result<SizedCanvas> {
    if !(size.width.is_finite() && size.width > 0.0 && size.height.is_finite() && size.height > 0.0)
    {
        return Err(GridError::InvalidLayout(format!(
            "canvas size must be positive, got {} x {}",
            size.width, size.height
        )));
    }

    let size = match params.orientation {
        Orientation::Portrait => size,
        Orientation::Landscape => size.swapped(),
    };

    log::info!(
        "Using specified page size: {:.2} x {:.2} pt ({:?})",
        size.width,
        size.height,
        params.orientation
    );

    Ok(SizedCanvas {
        size,
        spacing: Spacing {
            gap: params.gap,
            padding: params.padding,
        },
        auto: false,
    })
}
