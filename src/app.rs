// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the annotation store and the canvas
//! surface, runs file reads in the background, and routes UI actions to
//! the store.

use crate::config::AppConfig;
use crate::interaction;
use crate::io::{
    loader::BackgroundLoader,
    media::{self, LoadedImage},
    serialization::{self, AnnotationFileError},
};
use crate::models::{annotation::Annotation, store::AnnotationStore};
use crate::ui::{
    canvas, descriptions,
    surface::{CanvasSurface, RenderSync},
    toolbar::{self, ToolbarAction},
};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Host hook invoked with the full annotation list after every save.
pub type SaveCallback = Box<dyn FnMut(&[Annotation])>;

/// Main application state.
pub struct AnnotatorApp {
    config: AppConfig,

    /// Authoritative annotation list
    store: AnnotationStore,

    /// Canvas bound to the current image
    surface: CanvasSurface,

    /// Tracks which store revision the surface shapes reflect
    render_sync: RenderSync,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Image dimensions of the texture
    image_size: Option<egui::Vec2>,

    /// Set when a new image arrived and the surface has not been bound to it yet
    needs_bind: bool,

    image_loader: BackgroundLoader<Result<LoadedImage>>,
    annotation_loader: BackgroundLoader<Result<String, AnnotationFileError>>,

    on_save: Option<SaveCallback>,
}

impl AnnotatorApp {
    /// Create the application and start loading the configured default image.
    pub fn new(config: AppConfig) -> Self {
        let surface = CanvasSurface::new(config.max_height_fraction);
        let default_image = config.default_image.clone();

        let mut app = Self {
            config,
            store: AnnotationStore::new(),
            surface,
            render_sync: RenderSync::default(),
            image_texture: None,
            image_size: None,
            needs_bind: false,
            image_loader: BackgroundLoader::new(),
            annotation_loader: BackgroundLoader::new(),
            on_save: None,
        };

        if let Some(path) = default_image {
            app.load_image_file(path);
        }
        app
    }

    /// Install the host save hook.
    pub fn with_save_callback(mut self, callback: SaveCallback) -> Self {
        self.on_save = Some(callback);
        self
    }

    /// Load an image file in the background. A later call supersedes this one.
    pub fn load_image_file(&mut self, path: PathBuf) {
        self.image_loader.spawn(move || media::load_image(&path));
    }

    /// Read an annotation file in the background. A later call supersedes this one.
    pub fn load_annotations_file(&mut self, path: PathBuf) {
        self.annotation_loader
            .spawn(move || serialization::read_annotations_file(&path));
    }

    /// Write the annotations to `path` and notify the host.
    ///
    /// Returns `Ok(false)` without touching the file when there is nothing to save.
    pub fn save_annotations(&mut self, path: &Path) -> Result<bool> {
        if self.store.is_empty() {
            return Ok(false);
        }

        serialization::write_annotations(self.store.annotations(), path)?;
        log::info!("Saved {} annotations to {}", self.store.len(), path.display());

        if let Some(callback) = self.on_save.as_mut() {
            callback(self.store.annotations());
        }
        Ok(true)
    }

    /// Apply a completed annotation file read to the store.
    ///
    /// On any error the current annotations are kept.
    pub fn apply_annotation_file(
        &mut self,
        result: Result<String, AnnotationFileError>,
    ) -> Result<usize, AnnotationFileError> {
        let count = serialization::apply_import(&mut self.store, &result?)?;
        log::info!("Loaded {} annotations, next id {}", count, self.store.next_id());
        Ok(count)
    }

    /// Apply a description edit from the editor.
    pub fn edit_description(&mut self, id: u64, text: &str) {
        self.store.update_description(id, text);
    }

    /// Size or re-size the canvas for the current layout.
    fn layout_canvas(&mut self, container_width: f32, viewport_height: f32) {
        if self.needs_bind {
            if let Some(image_size) = self.image_size {
                if self
                    .surface
                    .bind(image_size, container_width, viewport_height)
                    .is_some()
                {
                    self.needs_bind = false;
                    self.render_sync.invalidate();
                }
            }
        } else {
            self.surface.relayout(container_width, viewport_height);
        }
    }

    /// Pick up finished background reads.
    fn poll_loads(&mut self, ctx: &egui::Context) {
        if let Some(result) = self.image_loader.poll() {
            match result {
                Ok(loaded) => {
                    let texture = ctx.load_texture(
                        "background_image",
                        loaded.to_color_image(),
                        egui::TextureOptions::LINEAR,
                    );
                    self.image_texture = Some(texture);
                    self.image_size = Some(loaded.size());
                    self.needs_bind = true;
                }
                Err(e) => {
                    log::error!("Error loading image: {:#}", e);
                }
            }
        }

        if let Some(result) = self.annotation_loader.poll() {
            match self.apply_annotation_file(result) {
                Ok(_) => notify(rfd::MessageLevel::Info, "Annotations loaded successfully!"),
                Err(e) => {
                    log::error!("Error parsing annotations file: {}", e);
                    notify(rfd::MessageLevel::Error, "Invalid annotations file.");
                }
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.image_loader.is_loading() || self.annotation_loader.is_loading()
    }

    /// Upload and load controls are disabled while a read is in flight.
    fn uploads_enabled(&self) -> bool {
        !self.is_loading()
    }

    fn pick_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"])
            .pick_file()
        {
            self.load_image_file(path);
        }
    }

    fn pick_annotations(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Annotations", &["json"])
            .pick_file()
        {
            self.load_annotations_file(path);
        }
    }

    fn pick_save_target(&mut self) {
        if self.store.is_empty() {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(&self.config.export_file_name)
            .save_file()
        {
            if let Err(e) = self.save_annotations(&path) {
                log::error!("Failed to save annotations: {:#}", e);
            }
        }
    }

    fn handle_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::UploadImage => self.pick_image(),
            ToolbarAction::SaveAnnotations => self.pick_save_target(),
            ToolbarAction::LoadAnnotations => self.pick_annotations(),
            ToolbarAction::None => {}
        }
    }
}

/// Show a blocking message box.
fn notify(level: rfd::MessageLevel, message: &str) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title("Image Data Annotation Tool")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads(ctx);

        // Keep polling while a read is in flight
        if self.is_loading() {
            ctx.request_repaint();
        }

        let busy = !self.uploads_enabled();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.add_enabled(!busy, egui::Button::new("Upload Image...")).clicked() {
                        self.pick_image();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(!busy, egui::Button::new("Load Annotations..."))
                        .clicked()
                    {
                        self.pick_annotations();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(!self.store.is_empty(), egui::Button::new("Save Annotations..."))
                        .clicked()
                    {
                        self.pick_save_target();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.store.len(), busy))
            .inner;
        self.handle_toolbar(toolbar_action);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Annotations: {}", self.store.len()));
                ui.separator();
                ui.label(if self.surface.is_bound() {
                    "Ready"
                } else {
                    "No image loaded"
                });
            });
        });

        let edit = egui::SidePanel::right("descriptions")
            .default_width(320.0)
            .show(ctx, |ui| descriptions::show(ui, self.store.annotations()))
            .inner;
        if let Some(edit) = edit {
            self.edit_description(edit.id, &edit.text);
        }

        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.image_loader.is_loading() {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    return canvas::CanvasAction::None;
                }

                let viewport_height = ctx.screen_rect().height();
                self.layout_canvas(ui.available_width(), viewport_height);
                self.render_sync.sync(&self.store, &mut self.surface);

                canvas::show(
                    ui,
                    &mut self.surface,
                    &self.image_texture,
                    self.config.stroke_width,
                )
            })
            .inner;

        if let canvas::CanvasAction::PointerDown(pos) = canvas_action {
            if interaction::handle_pointer_down(&self.surface, &mut self.store, pos, self.config.box_size)
                .is_some()
            {
                ctx.request_repaint();
            }
        }
    }
}
