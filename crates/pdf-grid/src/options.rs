use crate::constants::{DEFAULT_DPI, DEFAULT_GAP_PT, DEFAULT_PADDING_PT};
use crate::layout::{AutoSizeTuning, CanvasSizeRequest, LayoutParams};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid composition configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    // Files
    pub input_file: PathBuf,
    pub output_file: PathBuf,

    // Grid
    pub columns: usize,
    /// Derived from the page count when `None`
    pub rows: Option<usize>,

    // Output page
    pub canvas: CanvasSizeRequest,
    pub orientation: Orientation,
    /// Rasterization hint for renderers; pages are embedded as vectors
    pub dpi: u32,

    // Spacing (points)
    pub gap: f32,
    pub padding: f32,

    // Decoration and output
    pub border: Option<BorderStyle>,
    pub compression: Compression,

    /// Spacing compaction for auto-sized canvases
    pub auto_size: AutoSizeTuning,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: PathBuf::new(),
            columns: 4,
            rows: None,
            canvas: CanvasSizeRequest::Auto,
            orientation: Orientation::Landscape,
            dpi: DEFAULT_DPI,
            gap: DEFAULT_GAP_PT,
            padding: DEFAULT_PADDING_PT,
            border: Some(BorderStyle::default()),
            compression: Compression::Standard,
            auto_size: AutoSizeTuning::default(),
        }
    }
}

/// Quick layouts offered by the front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GridPreset {
    /// A4 landscape, 3 columns x 2 rows
    A4Landscape3x2,
    /// A4 landscape, 4 columns x 3 rows
    A4Landscape4x3,
    /// A3 landscape, 5 columns x 3 rows
    A3Landscape5x3,
    /// Auto-sized canvas, 4 columns, rows from the page count
    AutoLayout,
}

impl GridPreset {
    /// (columns, rows, paper size or `None` for auto)
    pub fn settings(self) -> (usize, Option<usize>, Option<PaperSize>) {
        match self {
            GridPreset::A4Landscape3x2 => (3, Some(2), Some(PaperSize::A4)),
            GridPreset::A4Landscape4x3 => (4, Some(3), Some(PaperSize::A4)),
            GridPreset::A3Landscape5x3 => (5, Some(3), Some(PaperSize::A3)),
            GridPreset::AutoLayout => (4, None, None),
        }
    }
}

impl GridOptions {
    /// Options for `input` → `output` with `columns` and everything else default
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, columns: usize) -> Self {
        Self {
            input_file: input.into(),
            output_file: output.into(),
            columns,
            ..Default::default()
        }
    }

    /// Overwrite grid, canvas and orientation with a preset
    pub fn apply_preset(&mut self, preset: GridPreset) {
        let (columns, rows, paper) = preset.settings();
        self.columns = columns;
        self.rows = rows;
        self.canvas = match paper {
            Some(paper) => CanvasSizeRequest::Explicit(paper.canvas_size()),
            None => CanvasSizeRequest::Auto,
        };
        self.orientation = Orientation::Landscape;
    }

    /// Layout parameters for the engine
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            gap: self.gap,
            padding: self.padding,
            dpi: self.dpi,
            orientation: self.orientation,
            tuning: self.auto_size,
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| GridError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| GridError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(GridError::Config("No input file specified".to_string()));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(GridError::Config("No output file specified".to_string()));
        }

        if self.columns == 0 {
            return Err(GridError::InvalidGrid(
                "Columns must be greater than 0".to_string(),
            ));
        }
        if self.rows == Some(0) {
            return Err(GridError::InvalidGrid(
                "Rows must be greater than 0".to_string(),
            ));
        }

        if self.dpi == 0 {
            return Err(GridError::Config("DPI must be greater than 0".to_string()));
        }

        for (name, value) in [("Gap", self.gap), ("Padding", self.padding)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let tuning = &self.auto_size;
        if !(tuning.base_thumb_height.is_finite() && tuning.base_thumb_height > 0.0) {
            return Err(GridError::Config(format!(
                "Auto-size thumbnail height must be positive, got {}",
                tuning.base_thumb_height
            )));
        }
        for (name, value) in [
            ("Auto-size gap factor", tuning.gap_factor),
            ("Auto-size padding factor", tuning.padding_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if let CanvasSizeRequest::Explicit(size) = self.canvas {
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(GridError::Config(format!(
                    "Canvas size must be positive, got {} x {}",
                    size.width, size.height
                )));
            }
        }

        if let Some(border) = &self.border {
            if !(border.width_pt > 0.0) {
                return Err(GridError::Config(format!(
                    "Border width must be positive, got {}",
                    border.width_pt
                )));
            }
        }

        Ok(())
    }
}
