// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the canvas sizing policy: fit an image into the
//! available width and a fraction of the viewport height while keeping its
//! aspect ratio.

use egui::Vec2;

/// Fraction of the viewport height the canvas may occupy by default.
pub const DEFAULT_MAX_HEIGHT_FRACTION: f32 = 0.8;

/// Compute the canvas size for an image.
///
/// The canvas takes the full container width; if the resulting height
/// exceeds `max_height_fraction` of the viewport, the height is clamped and
/// the width recomputed from it. Returns `None` when any dimension is
/// missing (zero, negative or not finite).
pub fn fit_canvas(
    image_size: Vec2,
    container_width: f32,
    viewport_height: f32,
    max_height_fraction: f32,
) -> Option<Vec2> {
    let inputs = [
        image_size.x,
        image_size.y,
        container_width,
        viewport_height,
        max_height_fraction,
    ];
    if inputs.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return None;
    }

    let aspect = image_size.x / image_size.y;
    let max_height = viewport_height * max_height_fraction;

    let mut width = container_width;
    let mut height = width / aspect;

    if height > max_height {
        height = max_height;
        width = height * aspect;
    }

    Some(Vec2::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspect(v: Vec2) -> f32 {
        v.x / v.y
    }

    #[test]
    fn test_wide_image_fills_width() {
        let size = fit_canvas(Vec2::new(1920.0, 1080.0), 800.0, 1000.0, 0.8).unwrap();
        assert_eq!(size.x, 800.0);
        assert!((size.y - 450.0).abs() < 0.001);
    }

    #[test]
    fn test_tall_image_clamped_to_viewport() {
        let size = fit_canvas(Vec2::new(1000.0, 2000.0), 800.0, 1000.0, 0.8).unwrap();
        assert!((size.y - 800.0).abs() < 0.001);
        assert!((size.x - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_sizing_is_idempotent() {
        let image = Vec2::new(640.0, 480.0);
        let first = fit_canvas(image, 1017.0, 733.0, 0.8);
        let second = fit_canvas(image, 1017.0, 733.0, 0.8);
        assert_eq!(first, second);
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let cases = [
            (Vec2::new(1920.0, 1080.0), 1200.0, 900.0),
            (Vec2::new(300.0, 1200.0), 1200.0, 900.0),
            (Vec2::new(512.0, 512.0), 640.0, 300.0),
            (Vec2::new(4000.0, 3.0), 50.0, 10.0),
        ];

        for (image, width, viewport) in cases {
            let size = fit_canvas(image, width, viewport, DEFAULT_MAX_HEIGHT_FRACTION).unwrap();
            assert!((aspect(size) - aspect(image)).abs() / aspect(image) < 1e-4);
            assert!(size.x <= width + 1e-3);
            assert!(size.y <= viewport * DEFAULT_MAX_HEIGHT_FRACTION + 1e-3);
        }
    }

    #[test]
    fn test_missing_dimensions_skip_sizing() {
        assert_eq!(fit_canvas(Vec2::new(0.0, 100.0), 800.0, 600.0, 0.8), None);
        assert_eq!(fit_canvas(Vec2::new(100.0, 100.0), 0.0, 600.0, 0.8), None);
        assert_eq!(fit_canvas(Vec2::new(100.0, 100.0), 800.0, f32::NAN, 0.8), None);
    }
}
