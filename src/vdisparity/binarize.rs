use super::histogram::VDisparityHistogram;
use crate::error::EstimateError;
use crate::image::ImageView;
use log::debug;

/// Intensity of an "on" cell, matching an 8-bit line-detection input.
pub const MASK_ON: u8 = 255;

/// Binary image of the same shape as the histogram it was derived from.
///
/// `data.len() == w * h` is assumed by every accessor.
#[derive(Clone, Debug)]
pub struct BinaryMask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl BinaryMask {
    #[inline]
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    pub fn on_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

impl ImageView for BinaryMask {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

/// Normalizes `hist` by its maximum and keeps cells strictly above `bin_thr`.
///
/// Fails with [`EstimateError::NoSignal`] when the histogram is empty.
pub fn binarize(hist: &VDisparityHistogram, bin_thr: f32) -> Result<BinaryMask, EstimateError> {
    let Some(norm) = hist.normalized() else {
        debug!(
            "VDISP: empty v-disparity histogram ({}x{}), nothing to binarize",
            hist.rows(),
            hist.bins()
        );
        return Err(EstimateError::NoSignal);
    };
    let data = norm
        .into_iter()
        .map(|v| if v > bin_thr { MASK_ON } else { 0 })
        .collect();
    Ok(BinaryMask {
        w: hist.bins(),
        h: hist.rows(),
        data,
    })
}
