// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module decodes image files into RGBA pixels suitable for uploading
//! as an egui texture.

use anyhow::{Context, Result};
use std::path::Path;

/// A decoded image ready for display.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    /// Convert the pixels into an egui image.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }

    pub fn size(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

/// Decode an in-memory image of any format the `image` crate supports.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode image")?;
    Ok(into_loaded(img))
}

/// Load and decode an image file from disk.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path).with_context(|| format!("Failed to open image {}", path.display()))?;
    let loaded = into_loaded(img);
    log::info!("Loaded image: {} ({}x{})", path.display(), loaded.width, loaded.height);
    Ok(loaded)
}

fn into_loaded(img: image::DynamicImage) -> LoadedImage {
    let rgba = img.to_rgba8();
    LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    }
}
