use crate::layout::{CanvasSize, GridSpec};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error(
        "Degenerate cell ({width:.2} x {height:.2} pt): gap and padding consume the whole canvas"
    )]
    DegenerateCell { width: f32, height: f32 },
    #[error("Failed to read source document: {0}")]
    SourceRead(#[from] SourceReadError),
    #[error("Failed to write output document: {0}")]
    SourceWrite(#[source] std::io::Error),
    #[error("Source document has no pages")]
    EmptyDocument,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GridError>;

/// Why the source document could not be read
#[derive(Error, Debug)]
pub enum SourceReadError {
    #[error(transparent)]
    Parse(#[from] lopdf::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for GridError {
    fn from(err: lopdf::Error) -> Self {
        GridError::SourceRead(err.into())
    }
}

/// Output page orientation.
///
/// Only applied to explicitly sized canvases: presets are authored in
/// portrait and swapped for landscape. Auto-sized canvases follow the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Portrait,
    /// Landscape is the default since multi-column grids read better wide
    #[default]
    Landscape,
}

/// Standard output page sizes, in points, authored in portrait
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Custom { width_pt: f32, height_pt: f32 },
}

impl PaperSize {
    /// Base dimensions (width, height) in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (841.890, 1190.551),
            PaperSize::A4 => (595.276, 841.890),
            PaperSize::A5 => (419.528, 595.276),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }

    pub fn canvas_size(self) -> CanvasSize {
        let (width, height) = self.dimensions_pt();
        CanvasSize::new(width, height)
    }
}

/// Stroke drawn around every placed thumbnail
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderStyle {
    /// Line width in points
    pub width_pt: f32,
    /// Stroke color as RGB components in 0.0..=1.0
    pub color: [f32; 3],
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            width_pt: crate::constants::BORDER_LINE_WIDTH,
            color: [0.0, 0.0, 0.0],
        }
    }
}

/// File-level compression applied when saving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compression {
    /// Write objects as they were built
    None,
    /// Drop unreferenced objects, renumber, and deflate streams
    #[default]
    Standard,
}

/// Progress of a grid composition run, reported after each output page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridProgress {
    /// Output pages finished so far
    pub current: usize,
    /// Output pages in the whole run
    pub total: usize,
}

/// Statistics about a grid layout
#[derive(Debug, Clone, PartialEq)]
pub struct GridStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Resolved grid
    pub grid: GridSpec,
    /// Thumbnails that fit on one output page
    pub cells_per_page: usize,
    /// Number of output pages produced
    pub output_pages: usize,
    /// Unused cells on the last output page
    pub empty_cells: usize,
    /// Output page size
    pub canvas: CanvasSize,
    /// Whether the canvas was derived from the content
    pub auto_sized: bool,
    /// Rasterization hint carried through from the options
    pub dpi: u32,
}
