// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bounding box image annotation tool.
//!
//! A desktop application for drawing labeled bounding boxes on an image
//! and saving or loading them as a JSON file.

mod app;
mod config;
mod interaction;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::AnnotatorApp;
use config::{AppConfig, DEFAULT_CONFIG_FILE};
use models::annotation::Annotation;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = AppConfig::load_or_default(&config_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Image Data Annotation Tool"),
        ..Default::default()
    };

    eframe::run_native(
        "Image Data Annotation Tool",
        options,
        Box::new(move |_cc| {
            let app = AnnotatorApp::new(config).with_save_callback(Box::new(|annotations: &[Annotation]| {
                log::info!("Save callback received {} annotations", annotations.len());
            }));
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
