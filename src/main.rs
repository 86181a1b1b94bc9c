// Entry point: loads a consensus matrix, validates it and renders its heatmap
// into an in-memory bitmap, then reports the render path taken.
use std::error::Error;

use clap::Parser;
use plotters::prelude::*;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use consensus_heatmap::cli::{Args, render_summary};
use consensus_heatmap::config::HeatmapConfig;
use consensus_heatmap::core::heatmap::{RenderRequest, render};
use consensus_heatmap::core::matrix::{load_matrix, validate};
use consensus_heatmap::core::raster::BitmapRasterizer;
use consensus_heatmap::core::resample::AreaResampler;
use consensus_heatmap::core::verbosity::Verbosity;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Config warnings go through a provisional subscriber; the real one needs the
    // verbosity merged from the config file and the command line.
    let provisional = FmtSubscriber::builder()
        .with_max_level(Verbosity(args.verbose).tracing_level())
        .with_target(false)
        .finish();
    let mut cfg = tracing::subscriber::with_default(provisional, || {
        HeatmapConfig::load_or_default(&args.config)
    });
    cfg.apply_args(&args);
    let options = cfg.render.options();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(options.verbosity.tracing_level())
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let matrix = load_matrix(&args.matrix_path)?;
    let (rows, cols) = matrix.dim();
    info!("Loaded {rows}x{cols} matrix from {}", args.matrix_path.display());

    if args.validate_only {
        validate(matrix.view())?;
        println!("{}: valid consensus matrix", args.matrix_path.display());
        return Ok(());
    }

    let surface = cfg.figure.figure().full();
    let (w, h) = surface.measure();
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
    let mut rasterizer = BitmapRasterizer::new(root);

    let request = RenderRequest {
        matrix: matrix.view(),
        surface,
        colormap: cfg.render.colormap,
        downsample: cfg.render.downsample,
    };
    let handle = render(&request, &AreaResampler, &mut rasterizer, &options)?;
    rasterizer.into_area().present()?;

    println!("{}", render_summary((rows, cols), (w, h), &handle));
    Ok(())
}
