//! Layout data types for grid composition
//!
//! These are the values passed between the grid resolver, the canvas
//! sizer and the cell placer. All lengths are in points and every
//! rectangle uses a top-left origin with y growing downward; the renderer
//! converts to PDF user space.

use crate::constants::{AUTO_BASE_THUMB_HEIGHT_PT, AUTO_GAP_FACTOR, AUTO_PADDING_FACTOR};
use crate::types::Orientation;
use std::ops::Range;

/// Columns and rows of thumbnails on one output page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: usize,
    pub rows: usize,
}

impl GridSpec {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Thumbnails per output page
    pub fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Row-major position of the nth cell on a page
    pub fn position(&self, local_index: usize) -> GridPosition {
        GridPosition::new(local_index / self.columns, local_index % self.columns)
    }
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Output page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The same size with width and height exchanged
    pub fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// How the output page size is chosen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CanvasSizeRequest {
    /// Derive the size from the grid and the content's aspect ratio
    #[default]
    Auto,
    /// Use a fixed size, authored in portrait
    Explicit(CanvasSize),
}

/// Density tuning for auto-sized canvases.
///
/// Auto-sized canvases have no paper format to respect, so the
/// requested spacing is compacted by these factors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoSizeTuning {
    /// Thumbnail height the canvas is built around (points)
    pub base_thumb_height: f32,
    /// Multiplier applied to the gap
    pub gap_factor: f32,
    /// Multiplier applied to the padding
    pub padding_factor: f32,
}

impl Default for AutoSizeTuning {
    fn default() -> Self {
        Self {
            base_thumb_height: AUTO_BASE_THUMB_HEIGHT_PT,
            gap_factor: AUTO_GAP_FACTOR,
            padding_factor: AUTO_PADDING_FACTOR,
        }
    }
}

/// Spacing and orientation parameters for one layout run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Space between adjacent thumbnails
    pub gap: f32,
    /// Margin between the grid and the page edge
    pub padding: f32,
    /// Rasterization hint; does not change geometry
    pub dpi: u32,
    pub orientation: Orientation,
    pub tuning: AutoSizeTuning,
}

/// Gap and padding actually used to lay out cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub gap: f32,
    pub padding: f32,
}

/// Result of canvas sizing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedCanvas {
    pub size: CanvasSize,
    /// Spacing to use for the cells on this canvas
    pub spacing: Spacing,
    /// True when the size was derived rather than given
    pub auto: bool,
}

/// Usable size of one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// Intrinsic size of one source page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePageRef {
    /// Zero-based page index in the source document
    pub index: usize,
    /// Visible width in points
    pub width: f32,
    /// Visible height in points
    pub height: f32,
}

impl SourcePageRef {
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// A rectangular area in points, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies inside this rectangle, allowing `epsilon` of slack
    pub fn contains(&self, other: &Rect, epsilon: f32) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

/// Where a source page lands inside its cell.
///
/// The variant records which axis limited the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The page is relatively wider than the cell: full cell width, centered vertically
    WidthLimited(Rect),
    /// The page is relatively taller (or equal): full cell height, centered horizontally
    HeightLimited(Rect),
}

impl Placement {
    pub fn rect(&self) -> Rect {
        match self {
            Placement::WidthLimited(rect) | Placement::HeightLimited(rect) => *rect,
        }
    }
}

/// The block of consecutive source pages that goes onto one output page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPageAssignment {
    pub output_page_index: usize,
    pub source_indices: Range<usize>,
}

impl OutputPageAssignment {
    pub fn len(&self) -> usize {
        self.source_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_indices.is_empty()
    }
}

/// Final placement of a source page on its output page
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlacement {
    pub source_index: usize,
    pub grid_pos: GridPosition,
    /// Full cell bounds
    pub cell: Rect,
    pub placement: Placement,
}

/// All placements for one output page, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPageLayout {
    pub assignment: OutputPageAssignment,
    pub placements: Vec<PagePlacement>,
}

/// The complete geometry of one run
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub grid: GridSpec,
    pub canvas: SizedCanvas,
    pub cell: CellSize,
    pub pages: Vec<OutputPageLayout>,
}

impl LayoutPlan {
    pub fn output_page_count(&self) -> usize {
        self.pages.len()
    }
}
