use crate::estimator::DegenerateGeometry;
use crate::hough::LineCandidate;
use serde::Serialize;

/// Verdict on a single Hough candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "reason")]
pub enum CandidateOutcome {
    Accepted,
    PitchOutOfRange,
    Degenerate(DegenerateGeometry),
}

/// One examined candidate, in search order.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub rho: f32,
    pub theta_deg: f32,
    pub votes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizon_point: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_deg: Option<f32>,
    pub outcome: CandidateOutcome,
}

impl CandidateReport {
    pub fn new(line: &LineCandidate, outcome: CandidateOutcome) -> Self {
        Self {
            rho: line.rho,
            theta_deg: line.theta.to_degrees(),
            votes: line.votes,
            horizon_point: None,
            pitch_deg: None,
            outcome,
        }
    }
}

/// Outcome of the dominant-line search.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSearchStage {
    /// Lines returned by the Hough transform
    pub candidates: usize,
    /// Lines converted before the search stopped
    pub examined: usize,
    pub degenerate: usize,
    pub rejected_pitch: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_index: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<CandidateReport>,
}

impl LineSearchStage {
    /// Maximum number of candidate reports kept in `samples`.
    pub const SAMPLE_CAP: usize = 32;

    pub(crate) fn record(&mut self, report: CandidateReport) {
        self.examined += 1;
        match report.outcome {
            CandidateOutcome::Accepted => self.accepted_index = Some(self.examined - 1),
            CandidateOutcome::PitchOutOfRange => self.rejected_pitch += 1,
            CandidateOutcome::Degenerate(_) => self.degenerate += 1,
        }
        if self.samples.len() < Self::SAMPLE_CAP {
            self.samples.push(report);
        }
    }
}
