use clap::Parser;
use std::path::PathBuf;

use crate::core::colormap::Colormap;
use crate::core::raster::RasterHandle;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Validate a consensus matrix and plan its heatmap")]
pub struct Args {
    /// Consensus matrix file (one row per line, whitespace or comma separated)
    #[arg(value_name = "MATRIX_PATH")]
    pub matrix_path: PathBuf,

    /// Path to config TOML
    #[arg(long, default_value = "heatmap.toml")]
    pub config: String,

    /// Colormap name (overrides config)
    #[arg(long)]
    pub colormap: Option<Colormap>,

    /// Never downsample before rasterizing (overrides config)
    #[arg(long, default_value_t = false)]
    pub no_downsample: bool,

    /// Validate the matrix before rendering (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub strict: Option<bool>,

    /// Only validate the matrix, do not render
    #[arg(long, default_value_t = false)]
    pub validate_only: bool,

    /// Increase verbosity (-v user level, -vvvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One-line report of a finished render.
pub fn render_summary(
    matrix_dim: (usize, usize),
    surface_px: (u32, u32),
    handle: &RasterHandle,
) -> String {
    let (rows, cols) = matrix_dim;
    let (w, h) = surface_px;
    format!(
        "Rendered {rows}x{cols} matrix on {w}x{h} px: source {side}x{side}, interpolation {:?}, colormap {}",
        handle.interpolation,
        handle.colormap,
        side = handle.source_side,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::heatmap::Interpolation;

    #[test]
    fn summary_reports_rows_and_columns() {
        let handle = RasterHandle {
            offset: (0, 0),
            width_px: 60,
            height_px: 60,
            source_side: 3,
            interpolation: Interpolation::Nearest,
            colormap: Colormap::Greys,
        };
        let line = render_summary((2, 3), (60, 60), &handle);
        assert!(line.starts_with("Rendered 2x3 matrix on 60x60 px"), "{line}");
        assert!(line.contains("source 3x3"));
        assert!(line.contains("Nearest"));
        assert!(line.ends_with("colormap greys"));
    }

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "consensus-heatmap",
            "m.txt",
            "--colormap",
            "greys",
            "--no-downsample",
            "--strict",
            "-vvvv",
        ])
        .unwrap();
        assert_eq!(args.matrix_path, PathBuf::from("m.txt"));
        assert_eq!(args.colormap, Some(Colormap::Greys));
        assert!(args.no_downsample);
        assert_eq!(args.strict, Some(true));
        assert_eq!(args.verbose, 4);
        assert_eq!(args.config, "heatmap.toml");
    }

    #[test]
    fn rejects_unknown_colormap() {
        assert!(Args::try_parse_from(["consensus-heatmap", "m.txt", "--colormap", "jet"]).is_err());
    }
}
