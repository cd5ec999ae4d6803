//! Serializable trace of one estimation run.
//!
//! [`EstimateReport`] is returned next to the estimate by
//! [`HorizonEstimator::estimate_detailed`](crate::HorizonEstimator) and
//! describes what each stage saw: the histogram occupancy, the Hough
//! candidates that were examined and why they were rejected, and per-stage
//! timings.

pub mod line_search;
pub mod report;
pub mod timing;

pub use line_search::{CandidateOutcome, CandidateReport, LineSearchStage};
pub use report::{EstimateReport, HistogramStage, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
