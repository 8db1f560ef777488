use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfgrid",
    about = "Arrange PDF pages as a grid of thumbnails on larger pages",
    version
)]
struct Cli {
    /// Input PDF file
    input: PathBuf,

    /// Output PDF file
    output: PathBuf,

    /// Number of grid columns
    #[arg(short = 'n', long, required_unless_present_any = ["preset", "config"])]
    columns: Option<usize>,

    /// Number of grid rows (derived from the page count if omitted)
    #[arg(short = 'm', long)]
    rows: Option<usize>,

    /// Output page size; "auto" derives it from the content
    #[arg(long, value_enum)]
    page_size: Option<PageSizeArg>,

    /// Custom output page size in points, e.g. 800x600 (portrait-authored)
    #[arg(long, value_name = "WxH", conflicts_with = "page_size")]
    canvas: Option<String>,

    /// Orientation applied to fixed page sizes
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Thumbnail DPI hint
    #[arg(long)]
    dpi: Option<u32>,

    /// Spacing between thumbnails (points)
    #[arg(long)]
    gap: Option<f32>,

    /// Page margins (points)
    #[arg(long)]
    padding: Option<f32>,

    /// Start from a quick layout preset
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Don't draw borders around thumbnails
    #[arg(long)]
    no_border: bool,

    /// Border line width (points)
    #[arg(long, conflicts_with = "no_border")]
    border_width: Option<f32>,

    /// Save without pruning and deflating objects
    #[arg(long)]
    no_compress: bool,

    /// Load options from a JSON file; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Only generate the first N output pages
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    Auto,
    A3,
    A4,
    A5,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    #[value(name = "a4-3x2")]
    A4Grid3x2,
    #[value(name = "a4-4x3")]
    A4Grid4x3,
    #[value(name = "a3-5x3")]
    A3Grid5x3,
    Auto,
}

impl From<PageSizeArg> for pdf_grid::CanvasSizeRequest {
    fn from(arg: PageSizeArg) -> Self {
        let paper = match arg {
            PageSizeArg::Auto => return Self::Auto,
            PageSizeArg::A3 => pdf_grid::PaperSize::A3,
            PageSizeArg::A4 => pdf_grid::PaperSize::A4,
            PageSizeArg::A5 => pdf_grid::PaperSize::A5,
            PageSizeArg::Letter => pdf_grid::PaperSize::Letter,
        };
        Self::Explicit(paper.canvas_size())
    }
}

impl From<OrientationArg> for pdf_grid::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<PresetArg> for pdf_grid::GridPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::A4Grid3x2 => Self::A4Landscape3x2,
            PresetArg::A4Grid4x3 => Self::A4Landscape4x3,
            PresetArg::A3Grid5x3 => Self::A3Landscape5x3,
            PresetArg::Auto => Self::AutoLayout,
        }
    }
}

/// Parse `800x600` into a canvas size in points
fn parse_canvas(value: &str) -> Result<pdf_grid::CanvasSize> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("Canvas size must look like WxH, got {:?}", value))?;
    let width: f32 = width.trim().parse().context("Invalid canvas width")?;
    let height: f32 = height.trim().parse().context("Invalid canvas height")?;
    if width <= 0.0 || height <= 0.0 {
        bail!("Canvas size must be positive, got {} x {}", width, height);
    }
    Ok(pdf_grid::CanvasSize::new(width, height))
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

async fn build_options(cli: &Cli) -> Result<pdf_grid::GridOptions> {
    let mut options = match &cli.config {
        Some(path) => pdf_grid::GridOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => pdf_grid::GridOptions::default(),
    };

    options.input_file = cli.input.clone();
    options.output_file = cli.output.clone();

    if let Some(preset) = cli.preset {
        options.apply_preset(preset.into());
    }
    if let Some(columns) = cli.columns {
        options.columns = columns;
    }
    if cli.rows.is_some() {
        options.rows = cli.rows;
    }
    if let Some(page_size) = cli.page_size {
        options.canvas = page_size.into();
    }
    if let Some(canvas) = &cli.canvas {
        options.canvas = pdf_grid::CanvasSizeRequest::Explicit(parse_canvas(canvas)?);
    }
    if let Some(orientation) = cli.orientation {
        options.orientation = orientation.into();
    }
    if let Some(dpi) = cli.dpi {
        options.dpi = dpi;
    }
    if let Some(gap) = cli.gap {
        options.gap = gap;
    }
    if let Some(padding) = cli.padding {
        options.padding = padding;
    }
    if cli.no_border {
        options.border = None;
    } else if let Some(width_pt) = cli.border_width {
        options.border = Some(pdf_grid::BorderStyle {
            width_pt,
            ..options.border.unwrap_or_default()
        });
    }
    if cli.no_compress {
        options.compression = pdf_grid::Compression::None;
    }

    options.validate()?;
    Ok(options)
}

fn print_statistics(stats: &pdf_grid::GridStatistics) {
    println!("Grid Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Grid: {} x {}", stats.grid.columns, stats.grid.rows);
    println!("  Thumbnails per page: {}", stats.cells_per_page);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Empty cells: {}", stats.empty_cells);
    println!(
        "  Page size: {:.2} x {:.2} pt ({:.2} x {:.2} in){}",
        stats.canvas.width,
        stats.canvas.height,
        pdf_grid::constants::pt_to_in(stats.canvas.width),
        pdf_grid::constants::pt_to_in(stats.canvas.height),
        if stats.auto_sized { ", auto" } else { "" }
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let options = build_options(&cli).await?;

    if let Some(path) = &cli.save_config {
        options
            .save(path)
            .await
            .with_context(|| format!("Failed to save config {}", path.display()))?;
        log::info!("Saved options to {}", path.display());
    }

    if cli.stats_only {
        let document = pdf_grid::load_pdf(&options.input_file).await?;
        let stats = pdf_grid::calculate_statistics(&document, &options)?;
        print_statistics(&stats);
        return Ok(());
    }

    if let Some(max_pages) = cli.preview {
        let document = pdf_grid::load_pdf(&options.input_file).await?;
        let preview = pdf_grid::generate_preview(&document, &options, max_pages).await?;
        pdf_grid::save_pdf(preview, &options.output_file, options.compression).await?;
        println!("Preview → {}", options.output_file.display());
        return Ok(());
    }

    let stats = pdf_grid::build_grid_document_with_progress(&options, |progress| {
        log::info!(
            "Rendered output page {}/{}",
            progress.current,
            progress.total
        );
    })
    .await?;

    print_statistics(&stats);
    println!("Grid → {}", options.output_file.display());

    Ok(())
}
