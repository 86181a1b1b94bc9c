use ndarray::{Array, ArrayBase, Data, Dimension};

/// Linear map from `[vmin, vmax]` onto `[0, 1]` before colormap lookup.
///
/// Heatmaps always use [`IDENTITY`]: consensus values are already in [0,1] and
/// must be colored as-is, not stretched to the observed min/max of the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub vmin: f64,
    pub vmax: f64,
}

pub const IDENTITY: Normalization = Normalization {
    vmin: 0.0,
    vmax: 1.0,
};

impl Normalization {
    pub const fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    pub fn is_identity(&self) -> bool {
        *self == IDENTITY
    }

    /// No clipping: values outside `[vmin, vmax]` map outside [0,1].
    pub fn apply(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            return 0.0;
        }
        (v - self.vmin) / span
    }

    pub fn apply_array<S, D>(&self, values: &ArrayBase<S, D>) -> Array<f64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        values.mapv(|v| self.apply(v))
    }
}

impl Default for Normalization {
    fn default() -> Self {
        IDENTITY
    }
}
