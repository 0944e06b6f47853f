// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the file operations.

/// Operation requested from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    UploadImage,
    SaveAnnotations,
    LoadAnnotations,
}

/// Display the toolbar buttons.
///
/// `busy` disables the upload buttons while a file read is in flight.
pub fn show(ui: &mut egui::Ui, annotation_count: usize, busy: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.add_enabled(!busy, egui::Button::new("Upload Image")).clicked() {
            action = ToolbarAction::UploadImage;
        }

        if ui
            .add_enabled(annotation_count > 0, egui::Button::new("Save Annotations"))
            .clicked()
        {
            action = ToolbarAction::SaveAnnotations;
        }

        if ui.add_enabled(!busy, egui::Button::new("Load Annotations")).clicked() {
            action = ToolbarAction::LoadAnnotations;
        }

        ui.separator();

        ui.label(
            egui::RichText::new("Click on the image to add a bounding box")
                .italics()
                .weak(),
        );
    });

    action
}
