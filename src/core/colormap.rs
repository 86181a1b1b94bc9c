use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named colormaps for heatmap rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Colormap {
    /// white (0) to black (1)
    Greys,
    Blues,
    Hot,
    #[default]
    Viridis,
}

// (position, r, g, b), positions ascending from 0 to 1
type Stop = (f64, u8, u8, u8);

const GREYS: &[Stop] = &[(0.0, 255, 255, 255), (1.0, 0, 0, 0)];
const BLUES: &[Stop] = &[
    (0.0, 247, 251, 255),
    (0.5, 107, 174, 214),
    (1.0, 8, 48, 107),
];
const HOT: &[Stop] = &[
    (0.0, 10, 0, 0),
    (0.365, 255, 0, 0),
    (0.746, 255, 255, 0),
    (1.0, 255, 255, 255),
];
const VIRIDIS: &[Stop] = &[
    (0.0, 68, 1, 84),
    (0.25, 59, 82, 139),
    (0.5, 33, 145, 140),
    (0.75, 94, 201, 98),
    (1.0, 253, 231, 37),
];

impl Colormap {
    pub const ALL: [Colormap; 4] = [
        Colormap::Greys,
        Colormap::Blues,
        Colormap::Hot,
        Colormap::Viridis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Greys => "greys",
            Colormap::Blues => "blues",
            Colormap::Hot => "hot",
            Colormap::Viridis => "viridis",
        }
    }

    fn stops(&self) -> &'static [Stop] {
        match self {
            Colormap::Greys => GREYS,
            Colormap::Blues => BLUES,
            Colormap::Hot => HOT,
            Colormap::Viridis => VIRIDIS,
        }
    }

    /// Color for an already-normalized value. Input is clamped to [0,1]; NaN
    /// maps to the low end.
    pub fn color(&self, v: f64) -> RGBColor {
        let t = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        let stops = self.stops();
        let mut lo = stops[0];
        for &hi in &stops[1..] {
            if t <= hi.0 {
                let span = hi.0 - lo.0;
                let f = if span > 0.0 { (t - lo.0) / span } else { 0.0 };
                return RGBColor(lerp(lo.1, hi.1, f), lerp(lo.2, hi.2, f), lerp(lo.3, hi.3, f));
            }
            lo = hi;
        }
        RGBColor(lo.1, lo.2, lo.3)
    }
}

fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown colormap {0:?}")]
pub struct UnknownColormap(pub String);

impl FromStr for Colormap {
    type Err = UnknownColormap;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Colormap::ALL
            .into_iter()
            .find(|c| c.name() == key)
            .ok_or_else(|| UnknownColormap(s.to_string()))
    }
}
