//! Consensus matrix checks and text input.
//!
//! A consensus matrix is square, symmetric, holds values in [0,1] and has ones on
//! its diagonal. The checks here are structural only: a matrix can pass them and
//! still not be the output of any real consensus-clustering run.

use std::fmt;
use std::fs;
use std::path::Path;

use ndarray::{Array2, ArrayView2};
use thiserror::Error;

/// Absolute tolerance for `m[i][j]` vs `m[j][i]`. Relative tolerance is zero.
pub const SYMMETRY_ATOL: f64 = 1e-7;
/// Absolute tolerance for diagonal entries vs 1.0.
pub const DIAGONAL_ATOL: f64 = 1e-8;

/// Which structural property a matrix failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixCheck {
    Shape,
    Range,
    Symmetry,
    Diagonal,
}

impl fmt::Display for MatrixCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixCheck::Shape => "shape",
            MatrixCheck::Range => "range",
            MatrixCheck::Symmetry => "symmetry",
            MatrixCheck::Diagonal => "diagonal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid consensus matrix ({check}): {detail}")]
pub struct MatrixError {
    pub check: MatrixCheck,
    pub detail: String,
}

impl MatrixError {
    fn new(check: MatrixCheck, detail: impl Into<String>) -> Self {
        Self {
            check,
            detail: detail.into(),
        }
    }
}

/// Validate `mat` as a consensus matrix.
///
/// Checks run in order shape, range, symmetry, diagonal; the first failure is
/// reported. NaN entries fail the range check.
pub fn validate(mat: ArrayView2<'_, f64>) -> Result<(), MatrixError> {
    let (rows, cols) = mat.dim();
    if rows != cols {
        return Err(MatrixError::new(
            MatrixCheck::Shape,
            format!("expected a square matrix, got {rows}x{cols}"),
        ));
    }

    if let Some(((i, j), v)) = mat
        .indexed_iter()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        return Err(MatrixError::new(
            MatrixCheck::Range,
            format!("entry ({i}, {j}) = {v} is outside [0, 1]"),
        ));
    }

    for i in 0..rows {
        for j in (i + 1)..cols {
            let diff = (mat[[i, j]] - mat[[j, i]]).abs();
            if diff > SYMMETRY_ATOL {
                return Err(MatrixError::new(
                    MatrixCheck::Symmetry,
                    format!(
                        "entries ({i}, {j}) = {} and ({j}, {i}) = {} differ by {diff:e}",
                        mat[[i, j]],
                        mat[[j, i]]
                    ),
                ));
            }
        }
    }

    if let Some((i, v)) = mat
        .diag()
        .iter()
        .enumerate()
        .find(|(_, v)| (**v - 1.0).abs() > DIAGONAL_ATOL)
    {
        return Err(MatrixError::new(
            MatrixCheck::Diagonal,
            format!("diagonal entry {i} = {v}, expected 1"),
        ));
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read matrix file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: cannot parse {token:?} as a number")]
    Parse { line: usize, token: String },
    #[error("line {line}: expected {expected} values, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// Parse a dense matrix from text.
///
/// One row per line, values separated by whitespace and/or commas. Blank lines
/// and `#` comments are skipped. Empty input yields a 0x0 matrix.
pub fn parse_matrix(text: &str) -> Result<Array2<f64>, LoadError> {
    let mut values = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let start = values.len();
        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let v = token.parse::<f64>().map_err(|_| LoadError::Parse {
                line: idx + 1,
                token: token.to_string(),
            })?;
            values.push(v);
        }
        let found = values.len() - start;
        match cols {
            None => cols = Some(found),
            Some(expected) if expected != found => {
                return Err(LoadError::Ragged {
                    line: idx + 1,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.unwrap_or(0);
    Ok(Array2::from_shape_vec((rows, cols), values)?)
}

pub fn load_matrix(path: &Path) -> Result<Array2<f64>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_matrix(&text)
}
