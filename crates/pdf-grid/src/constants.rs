//! Shared constants for grid layout
//!
//! This module centralizes the magic numbers used by the layout engine
//! and the PDF renderer.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert points to inches
#[inline]
pub fn pt_to_in(pt: f32) -> f32 {
    pt / POINTS_PER_INCH
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Auto-sized Canvas
// =============================================================================

/// Height of one thumbnail when the canvas is derived from the content (points)
pub const AUTO_BASE_THUMB_HEIGHT_PT: f32 = 300.0;

/// Factor applied to the requested gap on auto-sized canvases
pub const AUTO_GAP_FACTOR: f32 = 0.5;

/// Factor applied to the requested padding on auto-sized canvases
pub const AUTO_PADDING_FACTOR: f32 = 0.8;

// =============================================================================
// Option Defaults
// =============================================================================

/// Rasterization hint handed to renderers (dots per inch)
pub const DEFAULT_DPI: u32 = 150;

/// Spacing between thumbnails (points)
pub const DEFAULT_GAP_PT: f32 = 3.0;

/// Margin around the grid (points)
pub const DEFAULT_PADDING_PT: f32 = 10.0;

// =============================================================================
// Borders
// =============================================================================

/// Line width of the border drawn around each thumbnail (points)
pub const BORDER_LINE_WIDTH: f32 = 0.5;
