//! Standard (rho, theta) Hough line transform on binary images.
//!
//! Lines are parametrized as `x·cos θ + y·sin θ = ρ` with `x` the column and
//! `y` the row, `θ ∈ [0, π)` and signed `ρ`. Every non-zero pixel votes once
//! per angle into a padded accumulator; a cell becomes a line when its votes
//! exceed the threshold and it is a local maximum over its four neighbours
//! (strict towards lower indices, non-strict towards higher ones so that flat
//! plateaus keep exactly one representative). Lines are returned strongest
//! first, ties broken by accumulator position.
use crate::image::ImageView;
use rayon::prelude::*;
use serde::Serialize;
use std::f32::consts::PI;

/// Line in polar form with the number of pixels that voted for it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LineCandidate {
    pub rho: f32,
    pub theta: f32,
    pub votes: u32,
}

/// Resolution and acceptance threshold of the accumulator.
#[derive(Clone, Debug)]
pub struct HoughParams {
    /// Distance resolution in pixels
    pub rho_res: f32,
    /// Angular resolution in radians
    pub theta_res: f32,
    /// A line must collect strictly more votes than this
    pub threshold: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho_res: 1.0,
            theta_res: PI / 180.0,
            threshold: 25,
        }
    }
}

/// Runs the transform over every non-zero pixel of `img`.
pub fn hough_lines<I: ImageView<Pixel = u8>>(img: &I, params: &HoughParams) -> Vec<LineCandidate> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 || params.rho_res <= 0.0 || params.theta_res <= 0.0 {
        return Vec::new();
    }

    let mut num_angle = (PI / params.theta_res).round() as usize;
    if num_angle > 1 && (PI - (num_angle - 1) as f32 * params.theta_res).abs() < params.theta_res * 0.5
    {
        num_angle -= 1;
    }
    let num_rho = (((w + h) * 2 + 1) as f32 / params.rho_res).round() as usize;
    if num_angle == 0 || num_rho == 0 {
        return Vec::new();
    }

    let points: Vec<(f32, f32)> = img
        .rows()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(x, _)| (x as f32, y as f32))
        })
        .collect();
    if points.is_empty() {
        return Vec::new();
    }

    // Padded by one cell on every side so the local-maximum test needs no
    // bounds checks; row n+1 holds angle n.
    let row_len = num_rho + 2;
    let rho_offset = ((num_rho - 1) / 2) as isize;
    let irho = 1.0 / params.rho_res;
    let mut accum = vec![0u32; (num_angle + 2) * row_len];
    accum
        .par_chunks_mut(row_len)
        .enumerate()
        .skip(1)
        .take(num_angle)
        .for_each(|(row_idx, acc_row)| {
            let angle = (row_idx - 1) as f32 * params.theta_res;
            let (sin_t, cos_t) = (angle.sin() * irho, angle.cos() * irho);
            for &(x, y) in &points {
                let r = (x * cos_t + y * sin_t).round() as isize + rho_offset;
                if r >= 0 && (r as usize) < num_rho {
                    acc_row[r as usize + 1] += 1;
                }
            }
        });

    let mut peaks = Vec::new();
    for n in 0..num_angle {
        for r in 0..num_rho {
            let base = (n + 1) * row_len + r + 1;
            let v = accum[base];
            if v > params.threshold
                && v > accum[base - 1]
                && v >= accum[base + 1]
                && v > accum[base - row_len]
                && v >= accum[base + row_len]
            {
                peaks.push(base);
            }
        }
    }
    peaks.sort_by(|&a, &b| accum[b].cmp(&accum[a]).then(a.cmp(&b)));

    peaks
        .into_iter()
        .map(|idx| {
            let n = idx / row_len - 1;
            let r = idx - (n + 1) * row_len - 1;
            LineCandidate {
                rho: (r as f32 - (num_rho - 1) as f32 * 0.5) * params.rho_res,
                theta: n as f32 * params.theta_res,
                votes: accum[idx],
            }
        })
        .collect()
}
