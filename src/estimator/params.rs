//! Parameters of the horizon estimator.
//!
//! The camera block (`camera_center_y`, `baseline`, `focal`) and the histogram
//! width `max_dis` describe the stereo rig. The remaining knobs keep their
//! defaults for most road sequences: a Hough vote threshold of 25, a
//! binarization threshold of half the histogram maximum and a ±50° plausible
//! pitch range. Camera height bounds are carried for reporting only.

use crate::error::EstimateError;
use crate::hough::HoughParams;

/// Immutable configuration of a [`HorizonEstimator`](super::HorizonEstimator).
#[derive(Clone, Debug, PartialEq)]
pub struct EstimatorParams {
    /// Vertical optical center in pixels.
    pub camera_center_y: f32,
    /// Stereo baseline; the camera height is reported in the same unit.
    pub baseline: f32,
    /// Focal length in pixels.
    pub focal: f32,
    /// Number of disparity bins (histogram width).
    pub max_dis: usize,
    /// Minimum number of supporting cells for a Hough line (exclusive).
    pub hough_accum_thr: u32,
    /// Threshold on the max-normalized histogram.
    pub bin_thr: f32,
    /// Lowest accepted pitch in radians.
    pub min_pitch: f32,
    /// Highest accepted pitch in radians.
    pub max_pitch: f32,
    pub min_camera_height: f32,
    pub max_camera_height: f32,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self::new(384.0, 0.8, 704.7082, 128)
    }
}

impl EstimatorParams {
    /// Camera description with default search knobs.
    pub fn new(camera_center_y: f32, baseline: f32, focal: f32, max_dis: usize) -> Self {
        Self {
            camera_center_y,
            baseline,
            focal,
            max_dis,
            hough_accum_thr: 25,
            bin_thr: 0.5,
            min_pitch: (-50.0f32).to_radians(),
            max_pitch: 50.0f32.to_radians(),
            min_camera_height: 1.30,
            max_camera_height: 1.90,
        }
    }

    /// Replaces the plausible pitch range, given in degrees.
    pub fn with_pitch_range_deg(mut self, min_deg: f32, max_deg: f32) -> Self {
        self.min_pitch = min_deg.to_radians();
        self.max_pitch = max_deg.to_radians();
        self
    }

    pub fn hough_params(&self) -> HoughParams {
        HoughParams {
            threshold: self.hough_accum_thr,
            ..HoughParams::default()
        }
    }

    pub fn pitch_in_range(&self, pitch: f32) -> bool {
        pitch >= self.min_pitch && pitch <= self.max_pitch
    }

    pub fn height_in_range(&self, height: f32) -> bool {
        height >= self.min_camera_height && height <= self.max_camera_height
    }

    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.max_dis < 2 {
            return Err(EstimateError::InsufficientResolution {
                max_dis: self.max_dis,
            });
        }
        if !self.camera_center_y.is_finite() {
            return Err(invalid("camera_center_y must be finite"));
        }
        if !(self.focal.is_finite() && self.focal > 0.0) {
            return Err(invalid("focal must be finite and positive"));
        }
        if !(self.baseline.is_finite() && self.baseline > 0.0) {
            return Err(invalid("baseline must be finite and positive"));
        }
        if !(self.bin_thr.is_finite() && (0.0..1.0).contains(&self.bin_thr)) {
            return Err(invalid("bin_thr must lie in [0, 1)"));
        }
        if !(self.min_pitch.is_finite() && self.max_pitch.is_finite())
            || self.min_pitch > self.max_pitch
        {
            return Err(invalid("pitch range must be finite with min <= max"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> EstimateError {
    EstimateError::InvalidParams(msg.to_string())
}
