//! Conversion of a v-disparity road line into camera pose.
//!
//! The line `x·cos θ + y·sin θ = ρ` lives in histogram coordinates (`x` =
//! disparity, `y` = image row). Its crossing with the zero-disparity column
//! is the horizon; its crossing with the last row gives the disparity of the
//! closest road point. Both are computed as intersections of homogeneous
//! lines, so a vanishing third component flags a parallel configuration.
use nalgebra::Vector3;
use serde::Serialize;

/// Denominators below this magnitude are treated as zero.
pub const GEOMETRY_EPS: f32 = 1e-6;

/// Why a line could not be turned into a camera pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DegenerateGeometry {
    /// Line parallel to the zero-disparity column (`sin θ ≈ 0`).
    HorizonAtInfinity,
    /// Line parallel to the image rows (`cos θ ≈ 0`).
    ParallelToRows,
    /// Horizon falls on the last histogram row.
    HorizonOnLastRow,
    /// Disparity does not change along the line.
    FlatSlope,
    NonFinite,
}

/// Camera quantities implied by one line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraGeometry {
    pub horizon_point: f32,
    pub pitch: f32,
    pub slope: f32,
    pub camera_height: f32,
}

/// Stereo rig constants needed by the conversion.
#[derive(Clone, Copy, Debug)]
pub struct RigModel {
    pub camera_center_y: f32,
    pub focal: f32,
    pub baseline: f32,
}

impl RigModel {
    /// Converts the polar line `(rho, theta)` of a histogram whose last row
    /// index is `last_row`.
    pub fn camera_from_line(
        &self,
        rho: f32,
        theta: f32,
        last_row: f32,
    ) -> Result<CameraGeometry, DegenerateGeometry> {
        let line = Vector3::new(theta.cos(), theta.sin(), -rho);
        let zero_disparity = Vector3::new(1.0, 0.0, 0.0);
        let bottom_row = Vector3::new(0.0, 1.0, -last_row);

        let horizon = line.cross(&zero_disparity);
        if horizon.z.abs() < GEOMETRY_EPS {
            return Err(DegenerateGeometry::HorizonAtInfinity);
        }
        let horizon_point = horizon.y / horizon.z;

        // It is negative because the image y axis points down.
        let pitch = -((self.camera_center_y - horizon_point) / self.focal).atan();

        let bottom = line.cross(&bottom_row);
        if bottom.z.abs() < GEOMETRY_EPS {
            return Err(DegenerateGeometry::ParallelToRows);
        }
        let disparity_down = bottom.x / bottom.z;

        let rise = horizon_point - last_row;
        if rise.abs() < GEOMETRY_EPS {
            return Err(DegenerateGeometry::HorizonOnLastRow);
        }
        let slope = (0.0 - disparity_down) / rise;
        if !slope.is_finite() || slope.abs() < GEOMETRY_EPS {
            return Err(DegenerateGeometry::FlatSlope);
        }

        let camera_height = self.baseline * pitch.cos() / slope;
        if !(horizon_point.is_finite() && pitch.is_finite() && camera_height.is_finite()) {
            return Err(DegenerateGeometry::NonFinite);
        }
        Ok(CameraGeometry {
            horizon_point,
            pitch,
            slope,
            camera_height,
        })
    }
}
