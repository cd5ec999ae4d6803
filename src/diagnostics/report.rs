use super::{LineSearchStage, TimingBreakdown};
use crate::types::CameraEstimate;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Occupancy of the v-disparity histogram and of its binarized mask.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramStage {
    pub rows: usize,
    pub bins: usize,
    pub valid_pixels: usize,
    pub clamped_pixels: usize,
    pub max_count: u32,
    /// Cells surviving binarization; zero when binarization failed
    pub on_cells: usize,
    pub bin_threshold: f32,
}

/// Full trace of one estimation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub input: InputDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<CameraEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<HistogramStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_search: Option<LineSearchStage>,
    pub timings: TimingBreakdown,
}

impl EstimateReport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            input: InputDescriptor { width, height },
            estimate: None,
            error: None,
            histogram: None,
            line_search: None,
            timings: TimingBreakdown::default(),
        }
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let total = self.timings.total_ms;
        match (&self.estimate, &self.error) {
            (Some(est), _) => format!(
                "horizon_row={} pitch_deg={:.3} height={:.3} slope={:.4} latency_ms={:.3}",
                est.horizon_row,
                est.pitch.to_degrees(),
                est.camera_height,
                est.slope,
                total
            ),
            (None, Some(err)) => format!("no estimate: {err} latency_ms={total:.3}"),
            (None, None) => format!("no estimate latency_ms={total:.3}"),
        }
    }
}
