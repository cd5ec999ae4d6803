#![doc = include_str!("../README.md")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod estimator;
pub mod hough;
pub mod image;
pub mod types;
pub mod vdisparity;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::EstimateError;
pub use crate::estimator::{DetailedEstimate, EstimatorParams, HorizonEstimator};
pub use crate::types::CameraEstimate;

pub use crate::diagnostics::EstimateReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use vdisparity_horizon::prelude::*;
///
/// # fn main() {
/// let (rows, cols) = (375usize, 1242usize);
/// let disparity = vec![0.0f32; rows * cols];
///
/// let estimator = HorizonEstimator::new(EstimatorParams::new(384.0, 0.8, 704.7082, 128));
/// match estimator.compute(&disparity, rows, cols) {
///     Ok(est) => println!("horizon_row={} pitch={:.4}", est.horizon_row, est.pitch),
///     Err(err) => println!("horizon undetermined: {err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{DisparityImage, DisparityMap};
    pub use crate::{CameraEstimate, EstimateError, EstimatorParams, HorizonEstimator};
}
