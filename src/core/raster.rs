//! `plotters` backed rasterizer for consensus heatmaps.

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::*;

use crate::core::colormap::Colormap;
use crate::core::heatmap::{Aspect, Interpolation, Origin, RasterSpec, Rasterizer};

/// What was drawn, in pixels of the target area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterHandle {
    /// Top-left corner of the image inside the drawing area.
    pub offset: (i32, i32),
    pub width_px: u32,
    pub height_px: u32,
    pub source_side: usize,
    pub interpolation: Interpolation,
    pub colormap: Colormap,
}

/// Fills pixels of a `plotters` drawing area from a matrix.
///
/// Every pixel takes the color of the cell under its center. For `None` and
/// `Nearest` this is the same lookup; the handle records which one was asked
/// for.
pub struct BitmapRasterizer<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    background: RGBColor,
}

impl<DB: DrawingBackend> BitmapRasterizer<DB> {
    pub fn new(area: DrawingArea<DB, Shift>) -> Self {
        Self {
            area,
            background: WHITE,
        }
    }

    pub fn with_background(mut self, color: RGBColor) -> Self {
        self.background = color;
        self
    }

    pub fn area(&self) -> &DrawingArea<DB, Shift> {
        &self.area
    }

    pub fn into_area(self) -> DrawingArea<DB, Shift> {
        self.area
    }

    fn layout(&self, aspect: Aspect) -> ((i32, i32), (u32, u32)) {
        let (aw, ah) = self.area.dim_in_pixel();
        match aspect {
            Aspect::Auto => ((0, 0), (aw, ah)),
            Aspect::Equal => {
                let side = aw.min(ah);
                (
                    (((aw - side) / 2) as i32, ((ah - side) / 2) as i32),
                    (side, side),
                )
            }
        }
    }
}

/// Source index under the center of pixel `p` out of `extent` pixels.
fn cell_index(p: u32, extent: u32, cells: usize) -> usize {
    let pos = (p as f64 + 0.5) * cells as f64 / extent as f64;
    (pos as usize).min(cells - 1)
}

impl<DB> Rasterizer for BitmapRasterizer<DB>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    type Handle = RasterHandle;
    type Error = DrawingAreaErrorKind<DB::ErrorType>;

    fn rasterize(&mut self, spec: RasterSpec<'_>) -> Result<RasterHandle, Self::Error> {
        self.area.fill(&self.background)?;
        let (offset, (width, height)) = self.layout(spec.aspect);
        let (rows, cols) = spec.source.dim();

        if rows > 0 && cols > 0 {
            for py in 0..height {
                let mut row = cell_index(py, height, rows);
                if spec.origin == Origin::Lower {
                    row = rows - 1 - row;
                }
                for px in 0..width {
                    let col = cell_index(px, width, cols);
                    let v = spec.norm.apply(spec.source[[row, col]]);
                    let color = spec.colormap.color(v);
                    self.area
                        .draw_pixel((offset.0 + px as i32, offset.1 + py as i32), &color)?;
                }
            }
        }

        Ok(RasterHandle {
            offset,
            width_px: width,
            height_px: height,
            source_side: rows.max(cols),
            interpolation: spec.interpolation,
            colormap: spec.colormap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::norm;
    use ndarray::array;

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> (u8, u8, u8) {
        let i = ((y * width + x) * 3) as usize;
        (buf[i], buf[i + 1], buf[i + 2])
    }

    fn spec(source: ndarray::ArrayView2<'_, f64>, origin: Origin, aspect: Aspect) -> RasterSpec<'_> {
        RasterSpec {
            source,
            colormap: Colormap::Greys,
            norm: norm::IDENTITY,
            aspect,
            interpolation: Interpolation::Nearest,
            origin,
        }
    }

    #[test]
    fn cell_index_covers_all_cells() {
        assert_eq!(cell_index(0, 4, 2), 0);
        assert_eq!(cell_index(1, 4, 2), 0);
        assert_eq!(cell_index(2, 4, 2), 1);
        assert_eq!(cell_index(3, 4, 2), 1);
        assert_eq!(cell_index(9, 10, 100), 95);
    }

    #[test]
    fn upper_origin_puts_row_zero_on_top() {
        let m = array![[1.0, 1.0], [0.0, 0.0]];
        let mut buf = vec![0u8; 4 * 4 * 3];
        let handle = {
            let root = BitMapBackend::with_buffer(&mut buf, (4, 4)).into_drawing_area();
            let mut r = BitmapRasterizer::new(root);
            let h = r.rasterize(spec(m.view(), Origin::Upper, Aspect::Equal)).unwrap();
            r.into_area().present().unwrap();
            h
        };
        assert_eq!(handle.width_px, 4);
        assert_eq!(handle.offset, (0, 0));
        assert_eq!(pixel(&buf, 4, 0, 0), (0, 0, 0));
        assert_eq!(pixel(&buf, 4, 3, 3), (255, 255, 255));
    }

    #[test]
    fn lower_origin_flips_rows() {
        let m = array![[1.0, 1.0], [0.0, 0.0]];
        let mut buf = vec![0u8; 4 * 4 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (4, 4)).into_drawing_area();
            let mut r = BitmapRasterizer::new(root);
            r.rasterize(spec(m.view(), Origin::Lower, Aspect::Equal)).unwrap();
            r.into_area().present().unwrap();
        }
        assert_eq!(pixel(&buf, 4, 0, 0), (255, 255, 255));
        assert_eq!(pixel(&buf, 4, 0, 3), (0, 0, 0));
    }

    #[test]
    fn equal_aspect_centers_square_image() {
        let m = array![[1.0]];
        let mut buf = vec![0u8; 8 * 4 * 3];
        let handle = {
            let root = BitMapBackend::with_buffer(&mut buf, (8, 4)).into_drawing_area();
            let mut r = BitmapRasterizer::new(root).with_background(RED);
            let h = r.rasterize(spec(m.view(), Origin::Upper, Aspect::Equal)).unwrap();
            r.into_area().present().unwrap();
            h
        };
        assert_eq!(handle.offset, (2, 0));
        assert_eq!((handle.width_px, handle.height_px), (4, 4));
        assert_eq!(pixel(&buf, 8, 0, 0), (255, 0, 0));
        assert_eq!(pixel(&buf, 8, 2, 0), (0, 0, 0));
        assert_eq!(pixel(&buf, 8, 7, 3), (255, 0, 0));
    }
}
