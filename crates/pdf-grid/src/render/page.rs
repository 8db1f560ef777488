//! Output page rendering for grid composition
//!
//! Turns one `OutputPageLayout` into a PDF page: every placement becomes a
//! Form XObject drawn through a transformation matrix, optionally framed
//! by a border.

use crate::layout::{CanvasSize, OutputPageLayout, Rect};
use crate::types::{BorderStyle, GridError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::{PageBox, SourcePage, create_page_xobject};

/// Render one grid page into `output`.
///
/// # Arguments
/// * `output` - The output document
/// * `source` - The source document containing the pages
/// * `source_pages` - All source pages, indexed by source page index
/// * `layout` - Placements for this output page
/// * `canvas` - Output page size in points
/// * `parent_pages_id` - The parent Pages object ID
/// * `border` - Border drawn around each thumbnail, if any
/// * `cache` - Deep-copy cache shared across the output document
#[allow(clippy::too_many_arguments)]
pub fn render_grid_page(
    output: &mut Document,
    source: &Document,
    source_pages: &[SourcePage],
    layout: &OutputPageLayout,
    canvas: CanvasSize,
    parent_pages_id: ObjectId,
    border: Option<&BorderStyle>,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(canvas.width),
            Object::Real(canvas.height),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for placement in &layout.placements {
        let page = source_pages.get(placement.source_index).ok_or_else(|| {
            GridError::InvalidLayout(format!(
                "placement refers to missing source page {}",
                placement.source_index
            ))
        })?;

        let xobject_name = format!("P{}", placement.source_index);
        let xobject_id = create_page_xobject(output, source, page, cache)?;
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        let rect = to_pdf_space(&placement.placement.rect(), canvas);
        content_ops.push(generate_placement_command(
            &xobject_name,
            &page.page_box,
            &rect,
        ));

        if let Some(style) = border {
            content_ops.push(generate_border_command(&rect, style));
        }
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Flip a top-left-origin rectangle into PDF user space (bottom-left origin)
fn to_pdf_space(rect: &Rect, canvas: CanvasSize) -> Rect {
    Rect::new(
        rect.x,
        canvas.height - rect.y - rect.height,
        rect.width,
        rect.height,
    )
}

/// Matrix `[a b c d e f]` mapping the page box, rotated for display,
/// onto `rect` (PDF space).
pub(crate) fn placement_matrix(page_box: &PageBox, rect: &Rect) -> [f32; 6] {
    let (w, h) = (page_box.width, page_box.height);
    let (visible_width, _) = page_box.visible_size();

    // Display rotation of the origin-anchored box
    let (a, b, c, d, e, f) = match page_box.rotation {
        90 => (0.0, -1.0, 1.0, 0.0, 0.0, w),
        180 => (-1.0, 0.0, 0.0, -1.0, w, h),
        270 => (0.0, 1.0, -1.0, 0.0, h, 0.0),
        _ => (1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
    };

    let scale = rect.width / visible_width;
    let (llx, lly) = (page_box.llx, page_box.lly);

    [
        scale * a,
        scale * b,
        scale * c,
        scale * d,
        scale * (e - a * llx - c * lly) + rect.x,
        scale * (f - b * llx - d * lly) + rect.y,
    ]
}

/// Generate the PDF content stream command to place a page.
fn generate_placement_command(xobject_name: &str, page_box: &PageBox, rect: &Rect) -> String {
    let [a, b, c, d, e, f] = placement_matrix(page_box, rect);
    format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, xobject_name
    )
}

/// Generate a stroked rectangle around a placed page.
fn generate_border_command(rect: &Rect, style: &BorderStyle) -> String {
    let [r, g, b] = style.color;
    format!(
        "q {} {} {} RG {} w {} {} {} {} re S Q\n",
        r, g, b, style.width_pt, rect.x, rect.y, rect.width, rect.height
    )
}
