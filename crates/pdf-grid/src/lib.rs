pub mod compose;
pub mod constants;
pub mod layout;
mod options;
mod preview;
pub mod render;
mod stats;
mod types;

pub use compose::{
    build_grid, build_grid_document, build_grid_document_with_progress, build_grid_with_progress,
    load_pdf, save_pdf,
};
pub use layout::{CanvasSize, CanvasSizeRequest, GridSpec};
pub use options::*;
pub use preview::generate_preview;
pub use stats::calculate_statistics;
pub use types::*;
