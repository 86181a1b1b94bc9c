//! Matrix shrinking for heatmap downsampling.

use ndarray::{Array2, ArrayView2};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResampleError {
    #[error("cannot resample an empty {rows}x{cols} matrix to {target_rows}x{target_cols}")]
    EmptySource {
        rows: usize,
        cols: usize,
        target_rows: usize,
        target_cols: usize,
    },
    #[error("resampler returned {got:?}, expected {expected:?}")]
    WrongShape {
        got: (usize, usize),
        expected: (usize, usize),
    },
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Produces a matrix of exactly `shape` from `mat`.
pub trait Resampler {
    fn resample(
        &self,
        mat: ArrayView2<'_, f64>,
        shape: (usize, usize),
    ) -> Result<Array2<f64>, ResampleError>;
}

/// Area-weighted averaging: each output cell is the mean of the source region
/// it covers, with fractional weights at the region edges.
///
/// Output values stay inside the input's value range, and a symmetric square
/// input resampled to a square shape stays symmetric.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaResampler;

impl AreaResampler {
    /// For each output bin, the contributing source indices and their weights
    /// (weights of one bin sum to 1).
    fn axis_weights(src: usize, dst: usize) -> Vec<Vec<(usize, f64)>> {
        let scale = src as f64 / dst as f64;
        (0..dst)
            .map(|o| {
                let lo = o as f64 * scale;
                let hi = (o + 1) as f64 * scale;
                let first = lo.floor() as usize;
                let last = (hi.ceil() as usize).min(src);
                let mut w = Vec::with_capacity(last - first);
                for i in first..last {
                    let overlap = (hi.min((i + 1) as f64) - lo.max(i as f64)).max(0.0);
                    if overlap > 0.0 {
                        w.push((i, overlap / scale));
                    }
                }
                w
            })
            .collect()
    }
}

impl Resampler for AreaResampler {
    fn resample(
        &self,
        mat: ArrayView2<'_, f64>,
        shape: (usize, usize),
    ) -> Result<Array2<f64>, ResampleError> {
        let (rows, cols) = mat.dim();
        let (target_rows, target_cols) = shape;
        if target_rows == 0 || target_cols == 0 {
            return Ok(Array2::zeros(shape));
        }
        if rows == 0 || cols == 0 {
            return Err(ResampleError::EmptySource {
                rows,
                cols,
                target_rows,
                target_cols,
            });
        }

        let wr = Self::axis_weights(rows, target_rows);
        let wc = Self::axis_weights(cols, target_cols);
        let mut out = Array2::<f64>::zeros(shape);
        for (orow, row_w) in wr.iter().enumerate() {
            for (ocol, col_w) in wc.iter().enumerate() {
                let mut acc = 0.0;
                for &(r, a) in row_w {
                    for &(c, b) in col_w {
                        acc += a * b * mat[[r, c]];
                    }
                }
                out[[orow, ocol]] = acc;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn weights_sum_to_one() {
        for (src, dst) in [(10, 3), (7, 7), (1000, 100), (5, 9)] {
            for bin in AreaResampler::axis_weights(src, dst) {
                let total: f64 = bin.iter().map(|(_, w)| w).sum();
                assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn integer_factor_is_block_mean() {
        let m = array![
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.5],
            [0.0, 0.0, 0.5, 1.0],
        ];
        let out = AreaResampler.resample(m.view(), (2, 2)).unwrap();
        assert_abs_diff_eq!(out, array![[1.0, 0.0], [0.0, 0.75]], epsilon = 1e-12);
    }

    #[test]
    fn same_shape_is_identity() {
        let m = array![[1.0, 0.2, 0.3], [0.2, 1.0, 0.4], [0.3, 0.4, 1.0]];
        let out = AreaResampler.resample(m.view(), (3, 3)).unwrap();
        assert_abs_diff_eq!(out, m, epsilon = 1e-12);
    }

    #[test]
    fn empty_source_is_an_error() {
        let m = Array2::<f64>::zeros((0, 0));
        assert!(matches!(
            AreaResampler.resample(m.view(), (2, 2)),
            Err(ResampleError::EmptySource { .. })
        ));
    }
}
