//! V-disparity accumulation and binarization.
//!
//! Every image row of a disparity map is turned into a histogram of its
//! quantized disparities. A planar road seen by a forward-looking stereo rig
//! shows up as a straight, slanted line in this `(row, disparity)` space whose
//! zero-disparity crossing is the horizon.
//!
//! Pipeline
//! - [`VDisparityHistogram::build`]: `rows × max_dis` integer accumulator;
//!   invalid pixels (`0`, negative, non-finite) are skipped and disparities at
//!   or beyond `max_dis` are clamped into the last bin.
//! - [`binarize`]: normalizes by the global maximum and keeps the cells whose
//!   normalized value exceeds the threshold, producing a [`BinaryMask`] ready
//!   for the Hough transform.

mod binarize;
mod histogram;

pub use binarize::{binarize, BinaryMask, MASK_ON};
pub use histogram::VDisparityHistogram;
