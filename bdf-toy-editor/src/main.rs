//! BDF Toy Editor - interactive front end for the raymarching configurator
//!
//! Hosts a [`ToyApp`] inside an eframe window: the side panel edits the
//! config, the central viewport receives pointer and key input and shows the
//! uniforms and defines the shader would be drawn with.

use std::path::Path;
use std::time::Instant;

use bdf_toy::capture::{save_capture, DEFAULT_CAPTURE_DIR};
use bdf_toy::prelude::*;
use bdf_toy_editor::screenshot::{crop_rgba, screenshot_event, PendingCapture};
use bdf_toy_editor::ui::{render_camera_panel, render_settings_panel, PRESETS};
use bdf_toy_editor::viewport::{collect_input, render_viewport};
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("BDF Toy"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "BDF Toy",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
    )
}

struct EditorApp {
    app: ToyApp<DefineSet, OrbitCamera>,
    uniforms: UniformBlocks,
    current_file: Option<String>,
    /// Settings were edited since the last save or load.
    unsaved_edits: bool,
    status_message: Option<(String, Instant)>,
    pending_capture: PendingCapture,
    /// Where the viewport was drawn last frame.
    viewport_rect: egui::Rect,
}

impl EditorApp {
    fn new() -> Self {
        let mut editor = Self {
            app: ToyApp::new(DefineSet::new(), OrbitCamera::new()),
            uniforms: UniformBlocks::new(),
            current_file: None,
            unsaved_edits: false,
            status_message: None,
            pending_capture: PendingCapture::default(),
            viewport_rect: egui::Rect::NOTHING,
        };
        if let Err(e) = editor.app.on_load() {
            log::error!("Initial emission failed: {}", e);
            editor.show_status(e.to_string());
        }
        editor
    }

    fn show_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    fn apply_config(&mut self, config: &ToyConfig) -> bool {
        match self.app.load_config(config) {
            Ok(_) => {
                self.unsaved_edits = false;
                true
            }
            Err(e) => {
                self.show_status(e.to_string());
                false
            }
        }
    }

    fn save_config(&mut self) {
        if let Some(path) = self.current_file.clone() {
            match self.app.config().save(&path) {
                Ok(()) => {
                    self.unsaved_edits = false;
                    self.show_status(format!("Saved to {}", path));
                }
                Err(e) => self.show_status(format!("Save failed: {}", e)),
            }
        } else {
            self.save_config_as();
        }
    }

    fn save_config_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("{}.json", self.app.label()))
            .save_file()
        {
            let path_str = path.display().to_string();
            match self.app.config().save(&path) {
                Ok(()) => {
                    self.unsaved_edits = false;
                    self.show_status(format!("Saved to {}", path_str));
                    self.current_file = Some(path_str);
                }
                Err(e) => self.show_status(format!("Save failed: {}", e)),
            }
        }
    }

    fn load_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let path_str = path.display().to_string();
            match ToyConfig::load(&path) {
                Ok(config) => {
                    if self.apply_config(&config) {
                        self.show_status(format!("Loaded {}", path_str));
                    }
                    self.current_file = Some(path_str);
                }
                Err(e) => self.show_status(format!("Load failed: {}", e)),
            }
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: HostAction) {
        match action {
            HostAction::CopyLabel(label) => {
                ctx.copy_text(label.clone());
                self.show_status(format!("Copied {}", label));
            }
            HostAction::Capture { file_stem } => {
                self.pending_capture.request(file_stem);
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
            }
        }
    }

    fn route_input(&mut self, ctx: &egui::Context) {
        let input = collect_input(ctx, self.viewport_rect);
        for event in &input.pointer {
            self.app.on_mouse_event(event);
        }
        for event in &input.keys {
            if let Some(action) = self.app.on_key_event(event).action {
                self.handle_action(ctx, action);
            }
        }
    }

    fn finish_capture(&mut self, ctx: &egui::Context) {
        if !self.pending_capture.is_pending() {
            return;
        }
        let Some((stem, image)) = self.pending_capture.complete(screenshot_event(ctx)) else {
            return;
        };

        let (width, height, rgba) = crop_rgba(&image, self.viewport_rect, ctx.pixels_per_point());
        match save_capture(Path::new(DEFAULT_CAPTURE_DIR), &stem, width, height, &rgba) {
            Ok(path) => self.show_status(format!("Captured {}", path.display())),
            Err(e) => self.show_status(format!("Capture failed: {}", e)),
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.finish_capture(ctx);
        self.route_input(ctx);

        // Menu bar
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open...").clicked() {
                        self.load_config();
                        ui.close_menu();
                    }
                    if ui.button("Save").clicked() {
                        self.save_config();
                        ui.close_menu();
                    }
                    if ui.button("Save As...").clicked() {
                        self.save_config_as();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Copy config JSON").clicked() {
                        match serde_json::to_string_pretty(self.app.config()) {
                            Ok(json) => {
                                ctx.copy_text(json);
                                self.show_status("Copied config");
                            }
                            Err(e) => self.show_status(format!("Copy failed: {}", e)),
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Presets", |ui| {
                    for preset in PRESETS {
                        if ui.button(preset.name).on_hover_text(preset.description).clicked() {
                            if self.apply_config(&(preset.config)()) {
                                self.current_file = None;
                                self.show_status(format!("Loaded preset: {}", preset.name));
                            }
                            ui.close_menu();
                        }
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button("Reload shader")
                        .on_hover_text("Re-send the define bundle to a fresh program")
                        .clicked()
                    {
                        self.app.on_hot_reload(HotReload::Program);
                    }

                    let clock = self.app.clock_mut();
                    let btn_text = if clock.is_paused() { "▶ Play" } else { "⏸ Pause" };
                    if ui.button(btn_text).clicked() {
                        clock.toggle_pause();
                    }
                    if ui.button("Restart time").clicked() {
                        clock.restart();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some((msg, time)) = &self.status_message {
                    if time.elapsed().as_secs() < 5 {
                        ui.label(msg);
                    } else {
                        self.status_message = None;
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0} FPS", 1.0 / ctx.input(|i| i.stable_dt)));
                    ui.separator();
                    let marker = if self.unsaved_edits { " *" } else { "" };
                    if let Some(file) = &self.current_file {
                        ui.label(egui::RichText::new(format!("{}{}", file, marker)).small().weak());
                    } else {
                        ui.label(egui::RichText::new("(unsaved)").small().weak());
                    }
                });
            });
        });

        // Settings sidebar
        let mut cycle_result = None;
        let mut edited = false;
        egui::SidePanel::left("settings")
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.collapsing("Camera Controls", |ui| {
                        if render_camera_panel(ui, self.app.camera_mut()) {
                            self.app.reset_camera();
                        }
                    });
                    ui.separator();

                    // The cycle runs every frame so a rejected bundle is retried.
                    cycle_result = Some(self.app.on_gui_render(|config| {
                        edited = render_settings_panel(ui, config);
                    }));
                });
            });
        self.unsaved_edits |= edited;
        if let Some(Err(e)) = cycle_result {
            self.show_status(e.to_string());
        }

        // Per-frame uniforms, sized from the last viewport rect
        let size = self.viewport_rect.size() * ctx.pixels_per_point();
        if size.x >= 1.0 && size.y >= 1.0 {
            self.app.on_resize(size.x as u32, size.y as u32);
            self.app
                .on_frame_render(&mut self.uniforms, Vec2::new(size.x, size.y));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let sink = self.app.sink();
            self.viewport_rect = render_viewport(
                ui,
                self.app.label(),
                &self.uniforms,
                &sink.header(),
                sink.generation(),
            );
        });
        if self.app.sink().needs_recompile() {
            log::debug!("Define generation {} in use", self.app.sink().generation());
            self.app.sink_mut().mark_compiled();
        }

        ctx.request_repaint();
    }
}

impl Drop for EditorApp {
    fn drop(&mut self) {
        self.app.on_shutdown();
    }
}
