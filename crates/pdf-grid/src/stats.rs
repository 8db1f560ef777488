use crate::compose::plan_document;
use crate::layout::LayoutPlan;
use crate::options::GridOptions;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for a grid run without composing it
pub fn calculate_statistics(document: &Document, options: &GridOptions) -> Result<GridStatistics> {
    options.validate()?;

    let (source_pages, plan) = plan_document(document, options)?;
    Ok(statistics_for_plan(&plan, source_pages.len(), options.dpi))
}

pub(crate) fn statistics_for_plan(
    plan: &LayoutPlan,
    source_pages: usize,
    dpi: u32,
) -> GridStatistics {
    let cells_per_page = plan.grid.capacity();
    let output_pages = plan.output_page_count();
    let empty_cells = output_pages
        .saturating_mul(cells_per_page)
        .saturating_sub(source_pages);

    GridStatistics {
        source_pages,
        grid: plan.grid,
        cells_per_page,
        output_pages,
        empty_cells,
        canvas: plan.canvas.size,
        auto_sized: plan.canvas.auto,
        dpi,
    }
}
