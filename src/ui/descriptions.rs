// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation description editor.
//!
//! One text field per annotation. Edits are reported immediately and applied
//! to the store by identifier.

use crate::models::annotation::Annotation;

/// An edited description.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionEdit {
    pub id: u64,
    pub text: String,
}

/// Widget id of the text field in row `index`.
///
/// Imported files may repeat identifiers, so rows are keyed by position.
pub fn row_id(index: usize) -> egui::Id {
    egui::Id::new(("annotation_description", index))
}

/// Edit produced by a row whose field now holds `text`.
fn row_edit(annotation: &Annotation, text: String) -> Option<DescriptionEdit> {
    if text == annotation.description {
        return None;
    }

    Some(DescriptionEdit {
        id: annotation.id,
        text,
    })
}

/// Display the description list. Returns the edit made this frame, if any.
pub fn show(ui: &mut egui::Ui, annotations: &[Annotation]) -> Option<DescriptionEdit> {
    let mut edit = None;

    ui.heading("Annotations");
    ui.separator();

    if annotations.is_empty() {
        ui.label(egui::RichText::new("No annotations yet").weak());
        return None;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, annotation) in annotations.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.strong(format!("Annotation {}:", annotation.id));

                let mut text = annotation.description.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut text)
                        .id(row_id(index))
                        .hint_text("Enter description"),
                );
                if response.changed() {
                    if let Some(row) = row_edit(annotation, text) {
                        edit = Some(row);
                    }
                }
            });
        }
    });

    edit
}
