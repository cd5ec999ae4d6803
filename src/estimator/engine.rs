use super::geometry::RigModel;
use super::params::EstimatorParams;
use crate::diagnostics::{
    CandidateOutcome, CandidateReport, EstimateReport, HistogramStage, LineSearchStage,
};
use crate::error::EstimateError;
use crate::hough::{hough_lines, LineCandidate};
use crate::image::{DisparityMap, ImageView};
use crate::types::CameraEstimate;
use crate::vdisparity::{binarize, BinaryMask, VDisparityHistogram};
use log::debug;
use std::time::Instant;

/// Estimate together with the binarized histogram and the stage trace.
#[derive(Clone, Debug)]
pub struct DetailedEstimate {
    pub result: Result<CameraEstimate, EstimateError>,
    /// Binarized v-disparity image fed to the line search, when it was built
    pub mask: Option<BinaryMask>,
    pub report: EstimateReport,
}

/// Stateless v-disparity horizon estimator.
#[derive(Clone, Debug)]
pub struct HorizonEstimator {
    params: EstimatorParams,
}

impl HorizonEstimator {
    pub fn new(params: EstimatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// Estimates the camera pose from a tightly packed `rows × cols` buffer.
    pub fn compute(
        &self,
        data: &[f32],
        rows: usize,
        cols: usize,
    ) -> Result<CameraEstimate, EstimateError> {
        let map = DisparityMap::from_slice(data, rows, cols)?;
        self.estimate(&map)
    }

    /// Estimates the camera pose from a disparity map.
    pub fn estimate<I: ImageView<Pixel = f32>>(
        &self,
        map: &I,
    ) -> Result<CameraEstimate, EstimateError> {
        self.estimate_detailed(map).result
    }

    /// Same as [`Self::estimate`] but also returns the binary v-disparity
    /// image and a trace of every stage.
    pub fn estimate_detailed<I: ImageView<Pixel = f32>>(&self, map: &I) -> DetailedEstimate {
        let t0 = Instant::now();
        let mut report = EstimateReport::new(map.width(), map.height());
        let mut mask = None;
        let result = self.run(map, &mut report, &mut mask);
        report.timings.total_ms = t0.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(est) => report.estimate = Some(est.clone()),
            Err(err) => report.error = Some(err.to_string()),
        }
        DetailedEstimate {
            result,
            mask,
            report,
        }
    }

    fn run<I: ImageView<Pixel = f32>>(
        &self,
        map: &I,
        report: &mut EstimateReport,
        mask_out: &mut Option<BinaryMask>,
    ) -> Result<CameraEstimate, EstimateError> {
        self.params.validate()?;
        if map.width() == 0 || map.height() == 0 {
            return Err(EstimateError::EmptyMap {
                rows: map.height(),
                cols: map.width(),
            });
        }

        // 1) v-disparity histogram
        let t_hist = Instant::now();
        let hist = VDisparityHistogram::build(map, self.params.max_dis);
        report
            .timings
            .push("histogram", t_hist.elapsed().as_secs_f64() * 1000.0);
        let mut hist_stage = HistogramStage {
            rows: hist.rows(),
            bins: hist.bins(),
            valid_pixels: hist.valid_pixels(),
            clamped_pixels: hist.clamped_pixels(),
            max_count: hist.max_count(),
            on_cells: 0,
            bin_threshold: self.params.bin_thr,
        };
        if hist.clamped_pixels() > 0 {
            debug!(
                "VDISP: clamped {} pixels with disparity >= max_dis={}",
                hist.clamped_pixels(),
                self.params.max_dis
            );
        }

        // 2) normalize + threshold
        let t_bin = Instant::now();
        let binarized = binarize(&hist, self.params.bin_thr);
        report
            .timings
            .push("binarize", t_bin.elapsed().as_secs_f64() * 1000.0);
        let mask = match binarized {
            Ok(mask) => mask,
            Err(err) => {
                report.histogram = Some(hist_stage);
                return Err(err);
            }
        };
        hist_stage.on_cells = mask.on_count();
        report.histogram = Some(hist_stage);

        // 3) Hough lines, strongest first
        let t_hough = Instant::now();
        let lines = hough_lines(&mask, &self.params.hough_params());
        report
            .timings
            .push("hough", t_hough.elapsed().as_secs_f64() * 1000.0);

        // 4) first line with a plausible pitch
        let t_select = Instant::now();
        let (selected, stage) = self.select_line(&lines, hist.rows());
        report
            .timings
            .push("select", t_select.elapsed().as_secs_f64() * 1000.0);
        *mask_out = Some(mask);

        let outcome = selected.ok_or(EstimateError::NoPlausibleLine {
            candidates: stage.candidates,
            degenerate: stage.degenerate,
            rejected: stage.rejected_pitch,
        });
        match &outcome {
            Ok(est) => debug!(
                "VDISP: accepted line {} of {} rho={:.2} theta_deg={:.1} votes={} horizon_row={} pitch_deg={:.3} height={:.3}",
                stage.examined,
                stage.candidates,
                est.rho,
                est.theta.to_degrees(),
                est.votes,
                est.horizon_row,
                est.pitch.to_degrees(),
                est.camera_height
            ),
            Err(_) => debug!(
                "VDISP: no plausible road line (candidates={} degenerate={} rejected_pitch={})",
                stage.candidates, stage.degenerate, stage.rejected_pitch
            ),
        }
        report.line_search = Some(stage);
        outcome
    }

    /// Walks `lines` in order and converts the first one whose pitch lies in
    /// the configured range. `rows` is the histogram height.
    ///
    /// Degenerate lines are skipped. The returned stage records every line
    /// that was examined.
    pub fn select_line(
        &self,
        lines: &[LineCandidate],
        rows: usize,
    ) -> (Option<CameraEstimate>, LineSearchStage) {
        let mut stage = LineSearchStage {
            candidates: lines.len(),
            ..Default::default()
        };
        if rows == 0 {
            return (None, stage);
        }
        let rig = RigModel {
            camera_center_y: self.params.camera_center_y,
            focal: self.params.focal,
            baseline: self.params.baseline,
        };
        let last_row = (rows - 1) as f32;

        for line in lines {
            let rho = line.rho.abs();
            let theta = line.theta;
            let geometry = match rig.camera_from_line(rho, theta, last_row) {
                Ok(g) => g,
                Err(reason) => {
                    debug!(
                        "VDISP: skipping degenerate line rho={:.2} theta_deg={:.1} ({:?})",
                        rho,
                        theta.to_degrees(),
                        reason
                    );
                    stage.record(CandidateReport::new(
                        line,
                        CandidateOutcome::Degenerate(reason),
                    ));
                    continue;
                }
            };

            let accepted = self.params.pitch_in_range(geometry.pitch);
            let mut entry = CandidateReport::new(
                line,
                if accepted {
                    CandidateOutcome::Accepted
                } else {
                    CandidateOutcome::PitchOutOfRange
                },
            );
            entry.horizon_point = Some(geometry.horizon_point);
            entry.pitch_deg = Some(geometry.pitch.to_degrees());
            stage.record(entry);
            if !accepted {
                continue;
            }

            let estimate = CameraEstimate {
                horizon_row: geometry.horizon_point.ceil() as i32,
                horizon_point: geometry.horizon_point,
                pitch: geometry.pitch,
                camera_height: geometry.camera_height,
                slope: geometry.slope,
                rho,
                theta,
                votes: line.votes,
                height_within_bounds: self.params.height_in_range(geometry.camera_height),
            };
            return (Some(estimate), stage);
        }
        (None, stage)
    }
}
