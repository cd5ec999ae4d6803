//! I/O helpers for disparity images, v-disparity masks and JSON.
//!
//! - `load_disparity_png`: read a 16-bit PNG into an owned disparity buffer.
//! - `save_binary_mask`: write a binarized v-disparity image to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::DisparityImage;
use crate::vdisparity::BinaryMask;
use image::{GrayImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a 16-bit disparity image and convert it with the fixed `1/256` scale.
pub fn load_disparity_png(path: &Path) -> Result<DisparityImage, String> {
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma16();
    let width = img.width() as usize;
    let height = img.height() as usize;
    DisparityImage::from_u16_scaled(width, height, img.as_raw())
        .map_err(|e| format!("Failed to convert {}: {e}", path.display()))
}

/// Save a binary mask as an 8-bit grayscale PNG (rows × disparity bins).
pub fn save_binary_mask(mask: &BinaryMask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image: GrayImage = ImageBuffer::from_raw(mask.w as u32, mask.h as u32, mask.data.clone())
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
