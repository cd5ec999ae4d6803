//! Disparity buffers consumed by the estimator.
//!
//! A disparity of `0.0` marks a pixel without a valid stereo match. Negative
//! and non-finite values are treated the same way.
use super::traits::ImageView;
use crate::error::EstimateError;

/// Fixed-point scale of 16-bit disparity images (`d = raw / 256`).
pub const DISPARITY_SCALE: f32 = 256.0;

/// Returns `true` when `v` is a measured disparity.
#[inline]
pub fn is_valid_disparity(v: f32) -> bool {
    v > 0.0 && v.is_finite()
}

/// Borrowed row-major disparity map.
///
/// The fields are public for cheap construction; a hand-built value must keep
/// `stride >= w` and `data.len() >= (h - 1) * stride + w`, otherwise row
/// access panics. [`DisparityMap::with_stride`] checks both.
#[derive(Clone, Copy, Debug)]
pub struct DisparityMap<'a> {
    pub w: usize,
    pub h: usize,
    /// Number of f32 elements between consecutive rows
    pub stride: usize,
    pub data: &'a [f32],
}

impl<'a> DisparityMap<'a> {
    /// Wraps a tightly packed `rows × cols` buffer.
    pub fn from_slice(data: &'a [f32], rows: usize, cols: usize) -> Result<Self, EstimateError> {
        Self::with_stride(data, rows, cols, cols)
    }

    /// Wraps a padded buffer whose rows start `stride` elements apart.
    pub fn with_stride(
        data: &'a [f32],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self, EstimateError> {
        if rows == 0 || cols == 0 {
            return Err(EstimateError::EmptyMap { rows, cols });
        }
        if stride < cols {
            return Err(EstimateError::SizeMismatch {
                expected: cols,
                actual: stride,
            });
        }
        let expected = (rows - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(cols))
            .ok_or(EstimateError::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < expected {
            return Err(EstimateError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            w: cols,
            h: rows,
            stride,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.stride + x]
    }

    /// Number of pixels carrying a valid disparity.
    pub fn valid_count(&self) -> usize {
        self.rows()
            .map(|row| row.iter().filter(|&&v| is_valid_disparity(v)).count())
            .sum()
    }
}

impl<'a> ImageView for DisparityMap<'a> {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

/// Owned disparity buffer in row-major layout (stride == width).
#[derive(Clone, Debug)]
pub struct DisparityImage {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl DisparityImage {
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Result<Self, EstimateError> {
        if data.len() != w * h {
            return Err(EstimateError::SizeMismatch {
                expected: w * h,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Converts raw 16-bit disparities (`raw / DISPARITY_SCALE`).
    pub fn from_u16_scaled(w: usize, h: usize, raw: &[u16]) -> Result<Self, EstimateError> {
        if raw.len() != w * h {
            return Err(EstimateError::SizeMismatch {
                expected: w * h,
                actual: raw.len(),
            });
        }
        let data = raw.iter().map(|&d| d as f32 / DISPARITY_SCALE).collect();
        Ok(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    /// Borrow as a read-only map.
    pub fn as_map(&self) -> DisparityMap<'_> {
        DisparityMap {
            w: self.w,
            h: self.h,
            stride: self.w,
            data: &self.data,
        }
    }
}

impl ImageView for DisparityImage {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        Some(&self.data)
    }
}
