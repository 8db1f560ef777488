use crate::compose::{compose_plan, plan_document};
use crate::options::GridOptions;
use crate::types::*;
use lopdf::Document;

/// Generate a preview of the grid.
/// Returns a document holding only the first `max_output_pages` output pages,
/// laid out exactly as they would be in the full run.
pub async fn generate_preview(
    document: &Document,
    options: &GridOptions,
    max_output_pages: usize,
) -> Result<Document> {
    options.validate()?;
    if max_output_pages == 0 {
        return Err(GridError::Config(
            "Preview needs at least one output page".to_string(),
        ));
    }

    let document = document.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        let (source_pages, mut plan) = plan_document(&document, &options)?;
        plan.pages.truncate(max_output_pages);
        compose_plan(&document, &source_pages, &plan, &options, |_| {})
    })
    .await?
}
