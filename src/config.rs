use crate::cli::Args;
use crate::core::colormap::Colormap;
use crate::core::heatmap::RenderOptions;
use crate::core::surface::Figure;
use crate::core::verbosity::Verbosity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "FigureConfig::default_width_in")]
    pub width_in: f64,
    #[serde(default = "FigureConfig::default_height_in")]
    pub height_in: f64,
    #[serde(default = "FigureConfig::default_dpi")]
    pub dpi: f64,
}

impl FigureConfig {
    fn default_width_in() -> f64 {
        6.0
    }
    fn default_height_in() -> f64 {
        6.0
    }
    fn default_dpi() -> f64 {
        100.0
    }

    pub fn figure(&self) -> Figure {
        Figure::new(self.width_in, self.height_in, self.dpi)
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: Self::default_width_in(),
            height_in: Self::default_height_in(),
            dpi: Self::default_dpi(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub colormap: Colormap,
    #[serde(default = "RenderConfig::default_downsample")]
    pub downsample: bool,
    #[serde(default = "RenderConfig::default_strict")]
    pub strict: bool,
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl RenderConfig {
    fn default_downsample() -> bool {
        true
    }
    fn default_strict() -> bool {
        true
    }

    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            strict: self.strict,
            verbosity: self.verbosity,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colormap: Colormap::default(),
            downsample: Self::default_downsample(),
            strict: Self::default_strict(),
            verbosity: Verbosity::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeatmapConfig {
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl HeatmapConfig {
    /// Comment out every key of a serialized config, keeping section headers.
    fn commented(text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                out.push('\n');
            } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                out.push_str(line);
                out.push('\n');
            } else {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Command-line overrides. Verbosity is the larger of the two sources.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(cmap) = args.colormap {
            self.render.colormap = cmap;
        }
        if args.no_downsample {
            self.render.downsample = false;
        }
        if let Some(strict) = args.strict {
            self.render.strict = strict;
        }
        self.render.verbosity = self.render.verbosity.max(Verbosity(args.verbose));
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, Self::commented(&text)) {
                    warn!("Failed to write default config to {path}: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}"),
        }
        default_cfg
    }
}
