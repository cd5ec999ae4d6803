use thiserror::Error;

/// Failure modes of a single horizon estimation.
///
/// None of them is fatal for the caller: every variant means "horizon
/// undetermined for this frame".
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("disparity map is empty ({rows}x{cols})")]
    EmptyMap { rows: usize, cols: usize },
    #[error("disparity buffer size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("max_dis={max_dis} leaves too few disparity bins for a line search")]
    InsufficientResolution { max_dis: usize },
    #[error("invalid estimator parameters: {0}")]
    InvalidParams(String),
    #[error("v-disparity histogram holds no valid disparity observations")]
    NoSignal,
    #[error(
        "no plausible road line among {candidates} Hough candidates \
         ({degenerate} degenerate, {rejected} outside pitch range)"
    )]
    NoPlausibleLine {
        candidates: usize,
        degenerate: usize,
        rejected: usize,
    },
}
