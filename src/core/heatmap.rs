//! Consensus heatmap rendering policy.
//!
//! Rendering a large matrix cell-for-cell is wasted work once the matrix is
//! denser than the pixels it lands on: the rasterizer would have to shrink it
//! again while drawing. The policy here decides, per request:
//!
//! - whether to shrink the matrix first (only when asked, and only when the
//!   matrix side exceeds twice the surface width),
//! - the interpolation mode handed to the rasterizer (`None` when the source is
//!   at least as dense as the surface, `Nearest` otherwise),
//!
//! and then passes the source to a [`Rasterizer`] with identity normalization,
//! equal aspect and row 0 at the top.

use ndarray::{Array2, ArrayView2};
use thiserror::Error;
use tracing::debug;

use crate::core::colormap::Colormap;
use crate::core::matrix::{self, MatrixError};
use crate::core::norm::{self, Normalization};
use crate::core::resample::{ResampleError, Resampler};
use crate::core::surface::DrawSurface;
use crate::core::verbosity::Verbosity;

#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error(transparent)]
    InvalidConsensusMatrix(#[from] MatrixError),
    #[error("drawing surface must be square, got {width}x{height} px")]
    NonSquareSurface { width: u32, height: u32 },
    #[error(transparent)]
    Resample(#[from] ResampleError),
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// No resampling filter. Used when the source is at least as dense as the
    /// surface so cluster boundaries stay sharp.
    None,
    /// Nearest-neighbour upscaling. Used when the source is sparser than the
    /// surface; requested explicitly because some backends only treat `None`
    /// as nearest for certain output formats.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    /// Square cells.
    Equal,
    /// Stretch to fill the target area.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Row 0 at the top.
    Upper,
    /// Row 0 at the bottom.
    Lower,
}

/// Everything a rendering backend receives for one heatmap.
#[derive(Debug, Clone, Copy)]
pub struct RasterSpec<'a> {
    pub source: ArrayView2<'a, f64>,
    pub colormap: Colormap,
    pub norm: Normalization,
    pub aspect: Aspect,
    pub interpolation: Interpolation,
    pub origin: Origin,
}

/// External rendering backend. Its handle is returned to the caller untouched.
pub trait Rasterizer {
    type Handle;
    type Error: std::error::Error + Send + Sync + 'static;

    fn rasterize(&mut self, spec: RasterSpec<'_>) -> Result<Self::Handle, Self::Error>;
}

/// Input of one render call. The matrix should already be reordered so members
/// of a cluster are contiguous, otherwise there is no block-diagonal pattern.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub matrix: ArrayView2<'a, f64>,
    pub surface: DrawSurface,
    pub colormap: Colormap,
    pub downsample: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Validate the matrix before rendering.
    pub strict: bool,
    pub verbosity: Verbosity,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strict: cfg!(debug_assertions),
            verbosity: Verbosity::QUIET,
        }
    }
}

#[derive(Debug, Clone)]
pub enum RasterSource<'a> {
    Original(ArrayView2<'a, f64>),
    Downsampled(Array2<f64>),
}

impl RasterSource<'_> {
    pub fn view(&self) -> ArrayView2<'_, f64> {
        match self {
            RasterSource::Original(v) => v.view(),
            RasterSource::Downsampled(m) => m.view(),
        }
    }

    pub fn side(&self) -> usize {
        let (r, c) = self.view().dim();
        r.max(c)
    }

    pub fn is_downsampled(&self) -> bool {
        matches!(self, RasterSource::Downsampled(_))
    }
}

/// The decision for one request, before anything is drawn.
#[derive(Debug, Clone)]
pub struct RenderPlan<'a> {
    pub source: RasterSource<'a>,
    /// Surface width (== height) in pixels.
    pub surface_px: u32,
    pub interpolation: Interpolation,
    pub colormap: Colormap,
}

impl RenderPlan<'_> {
    pub fn spec(&self) -> RasterSpec<'_> {
        RasterSpec {
            source: self.source.view(),
            colormap: self.colormap,
            norm: norm::IDENTITY,
            aspect: Aspect::Equal,
            interpolation: self.interpolation,
            origin: Origin::Upper,
        }
    }
}

/// Side length to shrink an `n x n` matrix to for a surface `width_px` wide, or
/// `None` when the matrix is already at most twice the surface width.
pub fn downsample_target(n: usize, width_px: u32) -> Option<usize> {
    let target = 2 * width_px as usize;
    (n > target).then_some(target)
}

pub fn choose_interpolation(source_side: usize, width_px: u32) -> Interpolation {
    if source_side >= width_px as usize {
        Interpolation::None
    } else {
        Interpolation::Nearest
    }
}

/// Measure the surface, pick the source matrix and interpolation mode.
pub fn plan<'a, R>(
    request: &RenderRequest<'a>,
    resampler: &R,
    options: &RenderOptions,
) -> Result<RenderPlan<'a>, HeatmapError>
where
    R: Resampler + ?Sized,
{
    let (width, height) = request.surface.measure();
    if width != height {
        return Err(HeatmapError::NonSquareSurface { width, height });
    }
    if options.strict {
        matrix::validate(request.matrix)?;
    }

    let (rows, cols) = request.matrix.dim();
    let n = rows.max(cols);
    let target = if request.downsample {
        downsample_target(n, width)
    } else {
        None
    };

    let source = match target {
        Some(t) => {
            let shrunk = resampler.resample(request.matrix, (t, t))?;
            if shrunk.dim() != (t, t) {
                return Err(ResampleError::WrongShape {
                    got: shrunk.dim(),
                    expected: (t, t),
                }
                .into());
            }
            RasterSource::Downsampled(shrunk)
        }
        None => RasterSource::Original(request.matrix),
    };

    let interpolation = choose_interpolation(source.side(), width);
    if options.verbosity.is_debug() {
        debug!(
            n,
            surface_px = width,
            downsample = request.downsample,
            source_side = source.side(),
            downsampled = source.is_downsampled(),
            ?interpolation,
            "consensus heatmap render path"
        );
    }

    Ok(RenderPlan {
        source,
        surface_px: width,
        interpolation,
        colormap: request.colormap,
    })
}

/// Plan the request and hand the result to `backend`.
///
/// Backend failures are returned as [`HeatmapError::Backend`] wrapping the
/// backend's own error.
pub fn render<R, B>(
    request: &RenderRequest<'_>,
    resampler: &R,
    backend: &mut B,
    options: &RenderOptions,
) -> Result<B::Handle, HeatmapError>
where
    R: Resampler + ?Sized,
    B: Rasterizer + ?Sized,
{
    let plan = plan(request, resampler, options)?;
    backend
        .rasterize(plan.spec())
        .map_err(|e| HeatmapError::Backend(Box::new(e)))
}
