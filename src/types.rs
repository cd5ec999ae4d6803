use serde::Serialize;

/// Camera pose derived from the dominant road line of the v-disparity image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CameraEstimate {
    /// Image row of the horizon, `ceil(horizon_point)`
    pub horizon_row: i32,
    /// Continuous row where the road line reaches zero disparity
    pub horizon_point: f32,
    /// Camera tilt in radians; negative when looking down
    pub pitch: f32,
    /// Mounting height above the road, in baseline units
    pub camera_height: f32,
    /// Disparity change per row along the road line
    pub slope: f32,
    /// Accepted line, `|rho|` in histogram pixels
    pub rho: f32,
    pub theta: f32,
    pub votes: u32,
    /// Whether `camera_height` lies in the configured (non-enforced) bounds
    pub height_within_bounds: bool,
}
