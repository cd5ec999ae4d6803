use crate::estimator::EstimatorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct HorizonDemoConfig {
    /// 16-bit disparity PNG (`raw / 256`)
    #[serde(rename = "input")]
    pub input: PathBuf,
    pub camera: CameraConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    pub output: HorizonOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    pub camera_center_y: f32,
    pub baseline: f32,
    pub focal: f32,
    pub max_dis: usize,
}

/// Optional overrides of the estimator defaults. Angles are in degrees.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct EstimatorConfig {
    pub hough_accum_thr: Option<u32>,
    pub bin_thr: Option<f32>,
    pub min_pitch_deg: Option<f32>,
    pub max_pitch_deg: Option<f32>,
    pub min_camera_height: Option<f32>,
    pub max_camera_height: Option<f32>,
}

impl EstimatorConfig {
    pub fn resolve(&self, camera: &CameraConfig) -> EstimatorParams {
        let base = EstimatorParams::new(
            camera.camera_center_y,
            camera.baseline,
            camera.focal,
            camera.max_dis,
        );
        EstimatorParams {
            hough_accum_thr: self.hough_accum_thr.unwrap_or(base.hough_accum_thr),
            bin_thr: self.bin_thr.unwrap_or(base.bin_thr),
            min_pitch: self
                .min_pitch_deg
                .map(f32::to_radians)
                .unwrap_or(base.min_pitch),
            max_pitch: self
                .max_pitch_deg
                .map(f32::to_radians)
                .unwrap_or(base.max_pitch),
            min_camera_height: self.min_camera_height.unwrap_or(base.min_camera_height),
            max_camera_height: self.max_camera_height.unwrap_or(base.max_camera_height),
            ..base
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HorizonOutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
    /// Where to save the binarized v-disparity image, if anywhere
    #[serde(default)]
    pub vdisparity_image: Option<PathBuf>,
}

pub fn parse_config(json: &str) -> Result<HorizonDemoConfig, String> {
    serde_json::from_str(json).map_err(|e| format!("Failed to parse config: {e}"))
}

pub fn load_config(path: &Path) -> Result<HorizonDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
