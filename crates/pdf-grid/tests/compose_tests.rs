mod common;

use common::*;
use lopdf::Document;
use pdf_grid::*;
use std::sync::{Arc, Mutex};

fn options(columns: usize) -> GridOptions {
    GridOptions::new("input.pdf", "output.pdf", columns)
}

#[tokio::test]
async fn test_seven_pages_fit_one_output_page() {
    let doc = create_test_pdf(7);

    let output = build_grid(&doc, &options(3)).await.unwrap();
    assert_eq!(output.get_pages().len(), 1);

    let page_id = page_ids(&output)[0];
    let content = page_content(&output, page_id);
    for index in 0..7 {
        assert!(content.contains(&format!("/P{} Do", index)));
    }
    assert!(!content.contains("/P7 Do"));
}

#[tokio::test]
async fn test_auto_canvas_page_size() {
    let doc = create_test_pdf(6);
    let output = build_grid(&doc, &options(3)).await.unwrap();

    // 3x2 thumbnails of 300pt height at the letter aspect ratio,
    // gap 3 * 0.5 and padding 10 * 0.8
    let thumb_width = 300.0 * 612.0 / 792.0;
    let expected_width = 3.0 * thumb_width + 2.0 * 1.5 + 16.0;
    let expected_height = 2.0 * 300.0 + 1.5 + 16.0;

    let (width, height) = media_box_size(&output, page_ids(&output)[0]);
    assert!((width - expected_width).abs() < 1e-2);
    assert!((height - expected_height).abs() < 1e-2);
}

#[tokio::test]
async fn test_explicit_canvas_spills_to_extra_pages() {
    let doc = create_test_pdf(20);
    let mut opts = options(3);
    opts.rows = Some(2);
    opts.canvas = CanvasSizeRequest::Explicit(PaperSize::A4.canvas_size());

    let output = build_grid(&doc, &opts).await.unwrap();
    let ids = page_ids(&output);
    assert_eq!(ids.len(), 4);

    // Landscape A4 on every page
    for &id in &ids {
        let (width, height) = media_box_size(&output, id);
        assert!((width - 841.890).abs() < 1e-2);
        assert!((height - 595.276).abs() < 1e-2);
    }

    let last = page_content(&output, ids[3]);
    assert!(last.contains("/P18 Do"));
    assert!(last.contains("/P19 Do"));
    assert_eq!(last.matches(" Do ").count(), 2);
}

#[tokio::test]
async fn test_portrait_explicit_canvas() {
    let doc = create_test_pdf(4);
    let mut opts = options(2);
    opts.canvas = CanvasSizeRequest::Explicit(PaperSize::Letter.canvas_size());
    opts.orientation = Orientation::Portrait;

    let output = build_grid(&doc, &opts).await.unwrap();
    let (width, height) = media_box_size(&output, page_ids(&output)[0]);
    assert_eq!((width, height), (612.0, 792.0));
}

#[tokio::test]
async fn test_border_toggle() {
    let doc = create_test_pdf(2);

    let output = build_grid(&doc, &options(2)).await.unwrap();
    let content = page_content(&output, page_ids(&output)[0]);
    assert_eq!(content.matches(" re S").count(), 2);

    let mut opts = options(2);
    opts.border = None;
    let output = build_grid(&doc, &opts).await.unwrap();
    let content = page_content(&output, page_ids(&output)[0]);
    assert!(!content.contains(" re S"));
}

#[tokio::test]
async fn test_empty_document() {
    let doc = create_test_pdf(0);
    let result = build_grid(&doc, &options(3)).await;
    assert!(matches!(result, Err(GridError::EmptyDocument)));
}

#[tokio::test]
async fn test_invalid_columns() {
    let doc = create_test_pdf(3);
    let result = build_grid(&doc, &options(0)).await;
    assert!(matches!(result, Err(GridError::InvalidGrid(_))));
}

#[tokio::test]
async fn test_degenerate_cells() {
    let doc = create_test_pdf(3);
    let mut opts = options(3);
    opts.canvas = CanvasSizeRequest::Explicit(PaperSize::A5.canvas_size());
    opts.padding = 400.0;

    let result = build_grid(&doc, &opts).await;
    assert!(matches!(result, Err(GridError::DegenerateCell { .. })));
}

#[test]
fn test_progress_reported_per_output_page() {
    let doc = create_test_pdf(10);
    let mut opts = options(2);
    opts.rows = Some(2);

    let mut seen = Vec::new();
    let output = build_grid_with_progress(&doc, &opts, |p| seen.push(p)).unwrap();

    assert_eq!(output.get_pages().len(), 3);
    assert_eq!(
        seen,
        vec![
            GridProgress { current: 1, total: 3 },
            GridProgress { current: 2, total: 3 },
            GridProgress { current: 3, total: 3 },
        ]
    );
}

#[tokio::test]
async fn test_build_grid_document_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.pdf");
    let output = dir.path().join("grid.pdf");

    let mut doc = create_test_pdf_with_sizes(&[
        (612, 792),
        (792, 612),
        (612, 792),
        (595, 842),
        (612, 792),
    ]);
    write_test_pdf(&mut doc, &input);

    let opts = GridOptions::new(&input, &output, 2);
    let progress = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&progress);
    let stats = build_grid_document_with_progress(&opts, move |p| {
        *counter.lock().unwrap() = p.current;
    })
    .await
    .unwrap();

    assert_eq!(stats.source_pages, 5);
    assert_eq!(stats.grid, GridSpec::new(2, 3));
    assert_eq!(stats.output_pages, 1);
    assert_eq!(stats.empty_cells, 1);
    assert!(stats.auto_sized);
    assert_eq!(*progress.lock().unwrap(), 1);

    let written = Document::load(&output).unwrap();
    assert_eq!(written.get_pages().len(), 1);

    // Only the final file remains next to the output
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.pdf");
    let output = dir.path().join("grid.pdf");

    let mut doc = create_test_pdf(0);
    write_test_pdf(&mut doc, &input);

    let result = build_grid_document(&GridOptions::new(&input, &output, 2)).await;
    assert!(matches!(result, Err(GridError::EmptyDocument)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unreadable_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    let output = dir.path().join("grid.pdf");
    std::fs::write(&input, b"this is not a pdf").unwrap();

    let result = build_grid_document(&GridOptions::new(&input, &output, 2)).await;
    assert!(matches!(
        result,
        Err(GridError::SourceRead(SourceReadError::Parse(_)))
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let result = build_grid_document(&GridOptions::new(
        dir.path().join("missing.pdf"),
        dir.path().join("grid.pdf"),
        2,
    ))
    .await;
    assert!(matches!(
        result,
        Err(GridError::SourceRead(SourceReadError::Io(_)))
    ));
}

#[tokio::test]
async fn test_save_and_reload_compressed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let doc = create_test_pdf(9);
    let output = build_grid(&doc, &options(3)).await.unwrap();
    save_pdf(output, &path, Compression::Standard).await.unwrap();

    let loaded = load_pdf(&path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
}

#[tokio::test]
async fn test_preview_limits_output_pages() {
    let doc = create_test_pdf(30);
    let mut opts = options(2);
    opts.rows = Some(2);

    let preview = generate_preview(&doc, &opts, 2).await.unwrap();
    assert_eq!(preview.get_pages().len(), 2);

    let result = generate_preview(&doc, &opts, 0).await;
    assert!(matches!(result, Err(GridError::Config(_))));
}
