//! Horizon, pitch and camera height from a single disparity map.
//!
//! Overview
//! - Builds the v-disparity histogram of the map (`rows × max_dis`).
//! - Binarizes it against a fraction of its maximum.
//! - Runs a 1 px / 1° Hough transform and walks the lines strongest first.
//! - Converts each line into horizon row, pitch, slope and height and stops at
//!   the first line whose pitch lies in the configured range.
//!
//! Modules
//! - [`params`] – estimator configuration and its validation.
//! - `geometry` – line → camera conversion with degeneracy checks.
//! - `engine` – the [`HorizonEstimator`] itself.
//!
//! The estimator keeps no scratch state between calls: every buffer lives on
//! the call stack of [`HorizonEstimator::estimate`], so a single instance can
//! be shared across threads.

mod engine;
mod geometry;
pub mod params;

pub use engine::{DetailedEstimate, HorizonEstimator};
pub use geometry::{CameraGeometry, DegenerateGeometry, RigModel, GEOMETRY_EPS};
pub use params::EstimatorParams;
