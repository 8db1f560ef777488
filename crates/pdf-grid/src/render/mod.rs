//! PDF rendering modules for grid composition
//!
//! This module handles all PDF-specific operations:
//! - Reading source page boxes and rotation
//! - Creating XObjects from source pages
//! - Building output pages with placement matrices and borders
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::render_grid_page;
pub use xobject::{
    PageBox, SourcePage, collect_source_pages, copy_object_deep, create_page_xobject,
    get_page_box,
};
