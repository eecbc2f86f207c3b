use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use image::RgbaImage;

use tg_app::selection::RectI32;
use tg_app::{Action, Effect, Theme, WorkspaceModel};
use tg_ocr::engine::is_supported_language;
use tg_ocr::{OcrRequest, TesseractEngine, SUPPORTED_LANGUAGES};
use tg_platform::{Dialogs, ScreenCapture, TextClipboard};
use tg_platform_native::{NativeDialogs, ScreenGrabber, SystemClipboard};
use tg_settings::ConfigManager;

use crate::jobs::{JobEvent, JobRunner};
use crate::overlay::{self, OverlayState};

/// The main window host.
///
/// All state changes funnel through the core reducer; this type executes the
/// resulting effects against the collaborator services and draws the widgets.
pub struct TextgrabApp {
    model: WorkspaceModel,
    config: ConfigManager,
    engine: Arc<TesseractEngine>,
    capture: ScreenGrabber,
    clipboard: SystemClipboard,
    dialogs: NativeDialogs,
    jobs: JobRunner,
    overlay: OverlayState,
    /// Frames to wait between hiding the main window and freezing the
    /// screen, so the window has actually left the display.
    overlay_countdown: Option<u8>,
    /// Image staged for the next OCR run (cut from a selection or decoded
    /// from an upload).
    staged_image: Option<RgbaImage>,
    /// Widget-side copy of the displayed text.
    text_buffer: String,
    status: String,
}

impl TextgrabApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ConfigManager::new();
        let settings = config.get();

        let language = if is_supported_language(&settings.ocr_language) {
            settings.ocr_language.clone()
        } else {
            tracing::warn!(language = %settings.ocr_language, "unknown language in settings");
            tg_app::DEFAULT_LANGUAGE.to_string()
        };

        let theme = if settings.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        };
        apply_theme(&cc.egui_ctx, theme);

        let engine = Arc::new(TesseractEngine::new(
            settings.tesseract_path.clone().map(PathBuf::from),
        ));
        let status = engine.status();

        Self {
            model: WorkspaceModel::restored(language, theme, settings.auto_copy),
            config,
            engine,
            capture: ScreenGrabber::new(),
            clipboard: SystemClipboard::new(),
            dialogs: NativeDialogs::new(),
            jobs: JobRunner::new(),
            overlay: OverlayState::new(),
            overlay_countdown: None,
            staged_image: None,
            text_buffer: String::new(),
            status,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, action: Action) {
        let effects = self.model.reduce(action);
        self.run_effects(ctx, effects);
    }

    fn run_effects(&mut self, ctx: &egui::Context, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::HideMainWindow => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
                }

                Effect::ShowMainWindow => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
                }

                Effect::ShowOverlay => self.begin_overlay(ctx),

                Effect::DismissOverlay => self.overlay.close(),

                Effect::CaptureRegion { rect } => self.capture_region(ctx, rect),

                Effect::ShowOpenImageDialog => self.open_image(ctx),

                Effect::RunOcr { language } => self.run_ocr(ctx, language),

                Effect::CopyTextToClipboard { text } => {
                    if let Err(err) = self.clipboard.set_text(&text) {
                        tracing::warn!(error = %err, "clipboard update failed");
                        self.status = format!("Clipboard unavailable: {err}");
                    }
                }

                Effect::ShowSavePdfDialog { default_name } => self.export_pdf(ctx, &default_name),

                Effect::SpeakText { text } => {
                    self.jobs.spawn_speech(text, ctx.clone());
                }

                Effect::ApplyTheme { theme } => {
                    apply_theme(ctx, theme);
                    self.config.update(|s| s.dark_mode = theme == Theme::Dark);
                }

                Effect::Status { message } => self.status = message,
            }
        }
    }

    /// Freeze the screen and open the selection overlay over it.
    ///
    /// Deferred a few frames after the hide command so the frozen frame does
    /// not still contain the main window.
    fn begin_overlay(&mut self, ctx: &egui::Context) {
        self.overlay_countdown = Some(3);
        ctx.request_repaint();
    }

    fn grab_and_open(&mut self, ctx: &egui::Context) {
        let (width, height) = self.capture.screen_size();
        let full_screen = RectI32 {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        };

        match self.capture.capture_region(full_screen) {
            Ok(frame) => self.overlay.open(frame),
            Err(err) => {
                tracing::error!(error = %err, "screen capture failed");
                self.status = format!("Screen capture failed: {err}");
                // Unwind the half-started session and bring the window back.
                self.dispatch(ctx, Action::Selection(tg_app::selection::Action::Cancel));
            }
        }
    }

    /// Deliver the pixels under the confirmed rectangle to the extraction
    /// path.
    fn capture_region(&mut self, ctx: &egui::Context, rect: RectI32) {
        let image = match self.overlay.take_backdrop() {
            Some(frame) => overlay::crop_region(&frame, rect),
            // No frozen frame (should not happen); fall back to a live grab.
            None => match self.capture.capture_region(rect) {
                Ok(image) => image,
                Err(err) => {
                    tracing::error!(error = %err, "region capture failed");
                    self.status = format!("Region capture failed: {err}");
                    self.dispatch(ctx, Action::OcrCompleted {
                        text: String::new(),
                    });
                    return;
                }
            },
        };

        self.staged_image = Some(image);
        self.dispatch(ctx, Action::ImageReady);
    }

    fn open_image(&mut self, ctx: &egui::Context) {
        let Some(path) = self.dialogs.pick_image() else {
            return;
        };

        match image::open(&path) {
            Ok(decoded) => {
                self.staged_image = Some(decoded.to_rgba8());
                self.status = format!("Loaded {}", path.display());
                self.dispatch(ctx, Action::ImageReady);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "image decode failed");
                self.status = format!("Could not open image: {err}");
            }
        }
    }

    fn run_ocr(&mut self, ctx: &egui::Context, language: String) {
        let Some(image) = self.staged_image.take() else {
            tracing::error!("ocr requested without a staged image");
            self.dispatch(ctx, Action::OcrCompleted {
                text: String::new(),
            });
            return;
        };

        let request = OcrRequest {
            language,
            page_seg_mode: self.config.page_seg_mode(),
            preserve_spaces: self.config.preserve_spaces(),
        };
        self.jobs
            .spawn_ocr(self.engine.clone(), image, request, ctx.clone());
    }

    fn export_pdf(&mut self, ctx: &egui::Context, default_name: &str) {
        let Some(path) = self.dialogs.save_pdf(default_name) else {
            return;
        };

        let message = match tg_export::write_document(&path, self.model.text()) {
            Ok(()) => format!("Saved PDF to {}", path.display()),
            Err(err) => {
                tracing::warn!(error = %err, "pdf export failed");
                format!("PDF export failed: {err}")
            }
        };
        self.dispatch(ctx, Action::PdfWritten { message });
    }

    fn handle_job_event(&mut self, ctx: &egui::Context, event: JobEvent) {
        match event {
            JobEvent::OcrFinished { outcome } => {
                let status = if outcome.is_failed() {
                    "Recognition failed".to_string()
                } else if outcome.is_empty() {
                    "No text recognized".to_string()
                } else {
                    let words = tg_app::word_count(&outcome.display_text());
                    format!("Recognized {words} words")
                };

                self.dispatch(ctx, Action::OcrCompleted {
                    text: outcome.display_text(),
                });
                self.text_buffer = self.model.text().to_string();
                self.status = status;
            }

            JobEvent::SpeechFinished { error } => {
                self.dispatch(ctx, Action::SpeechCompleted { error });
            }
        }
    }

    fn toolbar_ui(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            if ui.button("Snip Region").clicked() {
                actions.push(Action::StartSelection);
            }
            if ui.button("Upload Image").clicked() {
                actions.push(Action::UploadImage);
            }

            let theme_label = match self.model.theme() {
                Theme::Light => "Dark Mode",
                Theme::Dark => "Light Mode",
            };
            if ui.button(theme_label).clicked() {
                actions.push(Action::ToggleTheme);
            }

            ui.separator();

            let current = self.model.language().to_string();
            let selected_label = tg_ocr::engine::language_label(&current).unwrap_or("English");
            egui::ComboBox::from_label("Language")
                .selected_text(selected_label)
                .show_ui(ui, |ui| {
                    for lang in SUPPORTED_LANGUAGES {
                        if ui
                            .selectable_label(current == lang.code, lang.label)
                            .clicked()
                        {
                            actions.push(Action::SetLanguage {
                                code: lang.code.to_string(),
                            });
                        }
                    }
                });
        });
    }

    fn status_bar_ui(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            ui.label(format!("Word Count: {}", self.model.word_count()));
            ui.separator();

            if ui.button("Copy to Clipboard").clicked() {
                actions.push(Action::CopyText);
            }
            if ui.button("Save as PDF").clicked() {
                actions.push(Action::ExportPdf);
            }

            let speak = egui::Button::new("Speak");
            if ui
                .add_enabled(!self.model.speech().is_running(), speak)
                .clicked()
            {
                actions.push(Action::Speak);
            }

            let mut auto_copy = self.model.auto_copy();
            if ui.checkbox(&mut auto_copy, "Auto copy").changed() {
                actions.push(Action::SetAutoCopy { enabled: auto_copy });
            }
        });

        if !self.status.is_empty() {
            let palette = tg_ui::theme::palette(self.model.theme());
            ui.colored_label(to_color32(palette.status_text), &self.status);
        }
    }
}

impl eframe::App for TextgrabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.jobs.drain() {
            self.handle_job_event(ctx, event);
        }

        match self.overlay_countdown {
            Some(0) => {
                self.overlay_countdown = None;
                self.grab_and_open(ctx);
            }
            Some(n) => {
                self.overlay_countdown = Some(n - 1);
                ctx.request_repaint();
            }
            None => {}
        }

        if self.overlay.is_active() {
            // Keep frames coming while the hidden main window cannot pump
            // them for us.
            ctx.request_repaint();
            let selection_rect = self.model.selection().visible_selection();
            let selection_actions = overlay::show(ctx, &mut self.overlay, selection_rect);
            for action in selection_actions {
                self.dispatch(ctx, Action::Selection(action));
            }
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(2.0);
            self.toolbar_ui(ui, &mut actions);
            ui.add_space(2.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_space(2.0);
            self.status_bar_ui(ui, &mut actions);
            ui.add_space(2.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.model.ocr().is_running() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Recognizing…");
                });
            }

            let editor = egui::TextEdit::multiline(&mut self.text_buffer)
                .hint_text("Extracted text appears here")
                .desired_width(f32::INFINITY);
            let response = ui.add_sized(ui.available_size(), editor);
            if response.changed() {
                actions.push(Action::TextEdited {
                    text: self.text_buffer.clone(),
                });
            }
        });

        for action in actions {
            if let Action::SetLanguage { code } = &action {
                let code = code.clone();
                self.config.update(|s| s.ocr_language = code);
            }
            if let Action::SetAutoCopy { enabled } = &action {
                let enabled = *enabled;
                self.config.update(|s| s.auto_copy = enabled);
            }
            self.dispatch(ctx, action);
        }
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let palette = tg_ui::theme::palette(theme);
    let mut visuals = match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    };
    visuals.panel_fill = to_color32(palette.window_bg);
    visuals.extreme_bg_color = to_color32(palette.panel_bg);
    visuals.override_text_color = Some(to_color32(palette.text));
    visuals.selection.bg_fill = to_color32(palette.accent).linear_multiply(0.4);
    ctx.set_visuals(visuals);
}

#[inline]
fn to_color32(color: tg_ui::Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (color.r * 255.0) as u8,
        (color.g * 255.0) as u8,
        (color.b * 255.0) as u8,
        (color.a * 255.0) as u8,
    )
}
