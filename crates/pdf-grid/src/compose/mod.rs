//! PDF grid composition - arranging page thumbnails on larger pages
//!
//! This module orchestrates one run:
//! 1. Read source page boxes
//! 2. Plan the layout (grid, canvas, placements)
//! 3. Render each output page
//! 4. Save atomically

mod io;

pub use io::{load_pdf, save_pdf};

use crate::layout::{LayoutPlan, SourcePageRef, plan_layout};
use crate::options::GridOptions;
use crate::render::{SourcePage, collect_source_pages, render_grid_page};
use crate::stats::statistics_for_plan;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Compose the grid document for an already loaded source
pub async fn build_grid(document: &Document, options: &GridOptions) -> Result<Document> {
    options.validate()?;

    let document = document.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || build_grid_with_progress(&document, &options, |_| {}))
        .await?
}

/// Compose the grid document, reporting progress after every output page.
///
/// All layout errors surface before any output page is built.
pub fn build_grid_with_progress(
    document: &Document,
    options: &GridOptions,
    progress: impl FnMut(GridProgress),
) -> Result<Document> {
    let (source_pages, plan) = plan_document(document, options)?;
    compose_plan(document, &source_pages, &plan, options, progress)
}

/// Load `options.input_file`, compose it and save to `options.output_file`.
///
/// Nothing is written unless composition succeeds.
pub async fn build_grid_document(options: &GridOptions) -> Result<GridStatistics> {
    build_grid_document_with_progress(options, |_| {}).await
}

/// `build_grid_document` with a progress callback
pub async fn build_grid_document_with_progress(
    options: &GridOptions,
    progress: impl FnMut(GridProgress) + Send + 'static,
) -> Result<GridStatistics> {
    options.validate()?;

    let source = load_pdf(&options.input_file).await?;
    let task_options = options.clone();
    let (output, stats) = tokio::task::spawn_blocking(move || {
        let (source_pages, plan) = plan_document(&source, &task_options)?;
        let stats = statistics_for_plan(&plan, source_pages.len(), task_options.dpi);
        let output = compose_plan(&source, &source_pages, &plan, &task_options, progress)?;
        Ok::<_, GridError>((output, stats))
    })
    .await??;

    save_pdf(output, &options.output_file, options.compression).await?;
    log::info!(
        "Wrote {} thumbnails on {} page(s) to {}",
        stats.source_pages,
        stats.output_pages,
        options.output_file.display()
    );

    Ok(stats)
}

/// Read the source pages and plan their layout
pub(crate) fn plan_document(
    document: &Document,
    options: &GridOptions,
) -> Result<(Vec<SourcePage>, LayoutPlan)> {
    let source_pages = collect_source_pages(document)?;
    if source_pages.is_empty() {
        return Err(GridError::EmptyDocument);
    }

    let page_refs: Vec<SourcePageRef> = source_pages
        .iter()
        .enumerate()
        .map(|(index, page)| page.page_ref(index))
        .collect();

    let plan = plan_layout(
        &page_refs,
        options.columns,
        options.rows,
        &options.layout_params(),
        options.canvas,
    )?;

    log::info!(
        "Laying out {} pages as {}x{} on {} output page(s) of {:.2} x {:.2} pt",
        page_refs.len(),
        plan.grid.columns,
        plan.grid.rows,
        plan.output_page_count(),
        plan.canvas.size.width,
        plan.canvas.size.height
    );

    Ok((source_pages, plan))
}

/// Render a finished plan into a new document
pub(crate) fn compose_plan(
    source: &Document,
    source_pages: &[SourcePage],
    plan: &LayoutPlan,
    options: &GridOptions,
    mut progress: impl FnMut(GridProgress),
) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::new();
    let mut cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    let total = plan.pages.len();

    for layout in &plan.pages {
        let page_id = render_grid_page(
            &mut output,
            source,
            source_pages,
            layout,
            plan.canvas.size,
            pages_tree_id,
            options.border.as_ref(),
            &mut cache,
        )?;
        page_refs.push(Object::Reference(page_id));

        log::debug!(
            "Rendered output page {}/{} (source pages {}..{})",
            layout.assignment.output_page_index + 1,
            total,
            layout.assignment.source_indices.start + 1,
            layout.assignment.source_indices.end
        );
        progress(GridProgress {
            current: page_refs.len(),
            total,
        });
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    Ok(output)
}
