// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and annotation.
//!
//! This module paints the background image and the surface's rectangles,
//! and reports pointer presses on the canvas.

use crate::ui::surface::CanvasSurface;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    PointerDown(egui::Pos2),
}

/// Display the canvas and handle pointer presses.
///
/// The surface must already be bound and laid out; otherwise a placeholder
/// is shown.
pub fn show(
    ui: &mut egui::Ui,
    surface: &mut CanvasSurface,
    image_texture: &Option<egui::TextureHandle>,
    stroke_width: f32,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    let (Some(texture), Some(size)) = (image_texture, surface.size()) else {
        show_placeholder(ui);
        return action;
    };

    ui.vertical_centered(|ui| {
        let (image_rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
        surface.set_origin(image_rect.min);

        let painter = ui.painter_at(image_rect);
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        for shape in surface.shapes() {
            painter.rect_stroke(
                surface.local_to_screen(shape.rect),
                0.0,
                egui::Stroke::new(stroke_width, egui::Color32::RED),
            );
        }

        if response.hovered() && ui.input(|i| i.pointer.primary_pressed()) {
            if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
                action = CanvasAction::PointerDown(pos);
            }
        }
    });

    action
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Image Data Annotation Tool")
                    .size(28.0)
                    .color(egui::Color32::from_rgb(0x00, 0xFF, 0x88)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Upload an image to begin annotating")
                    .color(egui::Color32::from_gray(180)),
            );
        });
    });
}
