//! Drawing surfaces and their pixel size.
//!
//! A `Figure` is the physical canvas (inches + dpi). A `DrawSurface` is a
//! rectangular region of a figure given as fractions of the figure's extent,
//! the way a plotting axes sits inside its parent figure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64, dpi: f64) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    pub fn square(side_in: f64, dpi: f64) -> Self {
        Self::new(side_in, side_in, dpi)
    }

    /// Pixel size of the whole figure, unrounded.
    pub fn size_px(&self) -> (f64, f64) {
        (self.width_in * self.dpi, self.height_in * self.dpi)
    }

    /// One surface covering the entire figure.
    pub fn full(&self) -> DrawSurface {
        DrawSurface {
            figure: *self,
            extent: Extent::FULL,
        }
    }

    /// Tile the figure into a `rows x cols` grid of equal surfaces, row-major,
    /// first row at the top.
    pub fn subplots(&self, rows: usize, cols: usize) -> Vec<DrawSurface> {
        if rows == 0 || cols == 0 {
            return Vec::new();
        }
        let w = 1.0 / cols as f64;
        let h = 1.0 / rows as f64;
        let mut out = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                out.push(DrawSurface {
                    figure: *self,
                    extent: Extent {
                        x0: c as f64 * w,
                        // figure coordinates grow upward
                        y0: 1.0 - (r + 1) as f64 * h,
                        width: w,
                        height: h,
                    },
                });
            }
        }
        out
    }
}

/// Fractional placement inside a figure, in [0,1] figure coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const FULL: Extent = Extent {
        x0: 0.0,
        y0: 0.0,
        width: 1.0,
        height: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSurface {
    pub figure: Figure,
    pub extent: Extent,
}

impl DrawSurface {
    pub fn new(figure: Figure, extent: Extent) -> Self {
        Self { figure, extent }
    }

    /// Pixel size of this surface, rounded to the nearest pixel.
    pub fn measure(&self) -> (u32, u32) {
        measure(self)
    }

    pub fn is_square(&self) -> bool {
        let (w, h) = self.measure();
        w == h
    }
}

/// Pixel width and height of `surface`.
///
/// Approximate: results come from floating-point products, so compare against
/// independently computed sizes with a tolerance.
pub fn measure(surface: &DrawSurface) -> (u32, u32) {
    let (fig_w, fig_h) = surface.figure.size_px();
    let w = (surface.extent.width * fig_w).round().max(0.0);
    let h = (surface.extent.height * fig_h).round().max(0.0);
    (w as u32, h as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_surface_matches_figure() {
        let fig = Figure::new(4.0, 9.0, 100.0);
        assert_eq!(fig.full().measure(), (400, 900));
    }

    #[test]
    fn rounds_to_nearest_pixel() {
        let fig = Figure::new(0.87, 0.4445, 43.793);
        // 38.1 x 19.47
        assert_eq!(fig.full().measure(), (38, 19));
    }

    #[test]
    fn subplots_tile_top_to_bottom() {
        let fig = Figure::new(3.0, 5.0, 100.0);
        let axes = fig.subplots(5, 3);
        assert_eq!(axes.len(), 15);
        assert!(axes[0].extent.y0 > axes[3].extent.y0);
        for ax in &axes {
            assert_eq!(ax.measure(), (100, 100));
            assert!(ax.is_square());
        }
    }

    #[test]
    fn empty_grid_has_no_surfaces() {
        assert!(Figure::square(1.0, 100.0).subplots(0, 3).is_empty());
    }
}
