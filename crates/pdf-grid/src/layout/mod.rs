//! Layout calculation modules for grid composition
//!
//! This module handles all the geometric calculations:
//! - Grid resolution (rows from page count) and page assignment
//! - Canvas sizing (auto-derived or explicit)
//! - Cell sizing and aspect-preserving placement

mod canvas;
mod grid;
mod placement;
mod plan;
mod types;

pub use canvas::*;
pub use grid::*;
pub use placement::*;
pub use plan::*;
pub use types::*;
