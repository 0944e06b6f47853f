// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas surface state and render sync.
//!
//! The surface is bound to one background image. It owns the derived
//! rectangle shapes, which are always regenerated in full from the
//! annotation store, and maps screen positions to canvas-local coordinates.
//!
//! Canvas pixel space is fixed to the size computed at bind time. Later
//! resizes only change the display scale, so existing boxes stay over the
//! same part of the image.

use crate::models::{annotation::Annotation, store::AnnotationStore};
use crate::util::geometry::fit_canvas;
use egui::{Pos2, Rect, Vec2};

/// A rectangle drawn on the surface, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnRect {
    pub id: u64,
    pub rect: Rect,
}

/// Layout of a bound surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    /// Source image dimensions in pixels.
    pub image_size: Vec2,
    /// Canvas size at bind time; defines canvas pixel space.
    pub base_size: Vec2,
    /// Current on-screen size.
    pub size: Vec2,
    /// Inputs of the last sizing pass (container width, viewport height).
    pub layout: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceState {
    Unbound,
    Bound(Binding),
}

/// Drawable area bound 1:1 to a background image.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    state: SurfaceState,
    origin: Pos2,
    shapes: Vec<DrawnRect>,
    max_height_fraction: f32,
}

impl CanvasSurface {
    pub fn new(max_height_fraction: f32) -> Self {
        Self {
            state: SurfaceState::Unbound,
            origin: Pos2::ZERO,
            shapes: Vec::new(),
            max_height_fraction,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, SurfaceState::Bound(_))
    }

    /// Bind (or re-bind in place) to an image of the given size.
    ///
    /// Returns `None` and leaves the surface untouched when the container or
    /// image dimensions are not available yet.
    pub fn bind(&mut self, image_size: Vec2, container_width: f32, viewport_height: f32) -> Option<Vec2> {
        let size = fit_canvas(image_size, container_width, viewport_height, self.max_height_fraction)?;

        self.state = SurfaceState::Bound(Binding {
            image_size,
            base_size: size,
            size,
            layout: (container_width, viewport_height),
        });
        self.shapes.clear();
        log::info!(
            "Canvas bound to {}x{} image at {:.0}x{:.0}",
            image_size.x,
            image_size.y,
            size.x,
            size.y
        );
        Some(size)
    }

    /// Reapply the sizing policy after the viewport changed.
    pub fn resize(&mut self, container_width: f32, viewport_height: f32) -> Option<Vec2> {
        let SurfaceState::Bound(binding) = &mut self.state else {
            return None;
        };

        let size = fit_canvas(
            binding.image_size,
            container_width,
            viewport_height,
            self.max_height_fraction,
        )?;
        binding.size = size;
        binding.layout = (container_width, viewport_height);
        Some(size)
    }

    /// Resize only when the layout inputs differ from the last sizing pass.
    pub fn relayout(&mut self, container_width: f32, viewport_height: f32) -> Option<Vec2> {
        let state = self.state;
        match state {
            SurfaceState::Bound(binding) if binding.layout != (container_width, viewport_height) => {
                self.resize(container_width, viewport_height)
            }
            SurfaceState::Bound(binding) => Some(binding.size),
            SurfaceState::Unbound => None,
        }
    }

    /// Current on-screen size, if bound.
    pub fn size(&self) -> Option<Vec2> {
        match self.state {
            SurfaceState::Bound(binding) => Some(binding.size),
            SurfaceState::Unbound => None,
        }
    }

    /// Display scale relative to canvas pixel space.
    pub fn scale(&self) -> f32 {
        match self.state {
            SurfaceState::Bound(binding) => binding.size.x / binding.base_size.x,
            SurfaceState::Unbound => 1.0,
        }
    }

    /// Screen position of the canvas' top-left corner.
    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    /// Convert a screen position to canvas-local coordinates.
    ///
    /// Returns `None` when unbound or when the position is outside the canvas.
    pub fn pointer_to_local(&self, pos: Pos2) -> Option<Pos2> {
        let size = self.size()?;
        let screen_rect = Rect::from_min_size(self.origin, size);
        if !screen_rect.contains(pos) {
            return None;
        }

        let scale = self.scale();
        Some(((pos - self.origin) / scale).to_pos2())
    }

    /// Convert a canvas-local rectangle to screen space.
    pub fn local_to_screen(&self, rect: Rect) -> Rect {
        let scale = self.scale();
        Rect::from_min_size(
            self.origin + rect.min.to_vec2() * scale,
            rect.size() * scale,
        )
    }

    /// Remove every drawn rectangle.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    /// Draw one rectangle per record. No-op while unbound.
    pub fn draw_shapes(&mut self, records: &[Annotation]) {
        if !self.is_bound() {
            return;
        }

        self.shapes.extend(records.iter().map(|a| DrawnRect {
            id: a.id,
            rect: Rect::from_min_size(
                Pos2::new(a.left as f32, a.top as f32),
                Vec2::new(a.width as f32, a.height as f32),
            ),
        }));
    }

    pub fn shapes(&self) -> &[DrawnRect] {
        &self.shapes
    }
}

/// Keeps the surface's shapes reconciled with the store.
#[derive(Debug, Default)]
pub struct RenderSync {
    synced_revision: Option<u64>,
}

impl RenderSync {
    /// Force a redraw on the next `sync`, e.g. after re-binding.
    pub fn invalidate(&mut self) {
        self.synced_revision = None;
    }

    /// Clear and redraw all shapes if the store changed since the last sync.
    ///
    /// Returns whether a redraw happened.
    pub fn sync(&mut self, store: &AnnotationStore, surface: &mut CanvasSurface) -> bool {
        if !surface.is_bound() || self.synced_revision == Some(store.revision()) {
            return false;
        }

        surface.clear_shapes();
        surface.draw_shapes(store.annotations());
        self.synced_revision = Some(store.revision());
        true
    }
}
