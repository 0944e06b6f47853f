// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer interaction on the canvas.
//!
//! Every primary pointer press over the bound canvas creates a new
//! fixed-size box at the pointer position.

use crate::models::{annotation::Annotation, store::AnnotationStore};
use crate::ui::surface::CanvasSurface;
use egui::Pos2;

/// Append a `box_size`×`box_size` box at the pressed screen position.
///
/// Returns the new record, or `None` when the surface is unbound, the
/// position falls outside the canvas, or no identifier is left.
pub fn handle_pointer_down(
    surface: &CanvasSurface,
    store: &mut AnnotationStore,
    screen_pos: Pos2,
    box_size: f64,
) -> Option<Annotation> {
    let local = surface.pointer_to_local(screen_pos)?;
    let annotation = match store.append(local.x as f64, local.y as f64, box_size, box_size) {
        Ok(annotation) => annotation.clone(),
        Err(e) => {
            log::warn!("Cannot add annotation: {}", e);
            return None;
        }
    };

    log::info!(
        "Added annotation {} at ({:.1}, {:.1}), total: {}",
        annotation.id,
        annotation.left,
        annotation.top,
        store.len()
    );
    Some(annotation)
}
