// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings come from an optional TOML file. Every key is optional and falls
//! back to its default, so a missing file is equivalent to an empty one.

use crate::models::annotation::DEFAULT_BOX_SIZE;
use crate::util::geometry::DEFAULT_MAX_HEIGHT_FRACTION;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "annotator.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Image shown at startup.
    pub default_image: Option<PathBuf>,
    /// Side length of new boxes, in canvas pixels.
    pub box_size: f64,
    /// Fraction of the window height the canvas may use.
    pub max_height_fraction: f32,
    /// File name suggested by the save dialog.
    pub export_file_name: String,
    pub stroke_width: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_image: Some(PathBuf::from("assets/default.png")),
            box_size: DEFAULT_BOX_SIZE,
            max_height_fraction: DEFAULT_MAX_HEIGHT_FRACTION,
            export_file_name: "annotations.json".to_string(),
            stroke_width: 2.0,
            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl AppConfig {
    /// Parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Reject sizes that would make boxes, strokes or the window unusable.
    pub fn validate(&self) -> Result<()> {
        ensure!(positive(self.box_size), "box_size must be positive, got {}", self.box_size);
        ensure!(
            positive(self.stroke_width as f64),
            "stroke_width must be positive, got {}",
            self.stroke_width
        );
        ensure!(
            positive(self.max_height_fraction as f64) && self.max_height_fraction <= 1.0,
            "max_height_fraction must be in (0, 1], got {}",
            self.max_height_fraction
        );
        ensure!(
            positive(self.window_width as f64) && positive(self.window_height as f64),
            "window size must be positive, got {}x{}",
            self.window_width,
            self.window_height
        );
        Ok(())
    }

    /// Load `path` if it exists, otherwise use defaults.
    ///
    /// A file that exists but cannot be parsed or holds unusable values is
    /// reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join(DEFAULT_CONFIG_FILE));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.box_size, 50.0);
        assert_eq!(config.export_file_name, "annotations.json");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "box_size = 32.0\ndefault_image = \"photo.jpg\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.box_size, 32.0);
        assert_eq!(config.default_image, Some(PathBuf::from("photo.jpg")));
        assert_eq!(config.max_height_fraction, 0.8);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "box_size = \"large\"").unwrap();

        assert!(AppConfig::load(&path).is_err());
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unusable_sizes_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        for text in [
            "box_size = 0.0",
            "box_size = -5.0",
            "box_size = nan",
            "stroke_width = 0.0",
            "stroke_width = -1.0",
            "max_height_fraction = 1.5",
        ] {
            std::fs::write(&path, text).unwrap();
            assert!(AppConfig::load(&path).is_err(), "accepted {text}");
            assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
        }
    }
}
