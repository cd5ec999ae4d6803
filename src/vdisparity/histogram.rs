use crate::image::disparity::is_valid_disparity;
use crate::image::ImageView;

/// Row-by-disparity accumulator.
///
/// Cell `(row, bin)` counts the valid pixels of image row `row` whose
/// disparity truncates to `bin`.
#[derive(Clone, Debug)]
pub struct VDisparityHistogram {
    rows: usize,
    bins: usize,
    counts: Vec<u32>,
    valid: usize,
    clamped: usize,
}

impl VDisparityHistogram {
    /// Accumulates `map` into a `map.height() × max_dis` histogram.
    pub fn build<I: ImageView<Pixel = f32>>(map: &I, max_dis: usize) -> Self {
        let rows = map.height();
        let mut hist = VDisparityHistogram {
            rows,
            bins: max_dis,
            counts: vec![0; rows * max_dis],
            valid: 0,
            clamped: 0,
        };
        if max_dis == 0 {
            return hist;
        }
        for (y, row) in map.rows().enumerate() {
            let dst = &mut hist.counts[y * max_dis..(y + 1) * max_dis];
            for &v in row {
                if !is_valid_disparity(v) {
                    continue;
                }
                let mut bin = v as usize;
                if bin >= max_dis {
                    bin = max_dis - 1;
                    hist.clamped += 1;
                }
                dst[bin] += 1;
                hist.valid += 1;
            }
        }
        hist
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Histogram width, i.e. the configured `max_dis`.
    pub fn bins(&self) -> usize {
        self.bins
    }

    #[inline]
    pub fn get(&self, row: usize, bin: usize) -> u32 {
        self.counts[row * self.bins + bin]
    }

    /// Sum over all cells; equals [`Self::valid_pixels`].
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn valid_pixels(&self) -> usize {
        self.valid
    }

    /// Pixels whose disparity was at or beyond `max_dis`.
    pub fn clamped_pixels(&self) -> usize {
        self.clamped
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Cells scaled into `[0, 1]` by the global maximum; `None` when empty.
    pub fn normalized(&self) -> Option<Vec<f32>> {
        let max = self.max_count();
        if max == 0 {
            return None;
        }
        let inv = 1.0 / max as f32;
        Some(self.counts.iter().map(|&c| c as f32 * inv).collect())
    }
}
