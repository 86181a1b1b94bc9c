pub mod colormap;
pub mod heatmap;
pub mod matrix;
pub mod norm;
pub mod raster;
pub mod resample;
pub mod surface;
pub mod verbosity;
