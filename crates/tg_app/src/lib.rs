pub mod job;
pub mod selection;

use selection::RectI32;

/// Language code handed to the OCR engine when nothing is configured.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Two-state cosmetic theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Whitespace-token word count, recomputed on every text change.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Top-level application actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Selection(selection::Action),
    /// Begin a snip: hide the main window and arm the overlay.
    StartSelection,
    /// Ask for an image file to run through the extraction path.
    UploadImage,
    /// An image (captured or uploaded) is staged host-side; start OCR on it.
    ImageReady,
    /// OCR job finished; `text` is the display text (result or error string).
    OcrCompleted { text: String },
    /// The user edited the text area directly.
    TextEdited { text: String },
    /// Language picked from the dropdown.
    SetLanguage { code: String },
    /// Mirror-display-to-clipboard setting changed.
    SetAutoCopy { enabled: bool },
    /// Explicit copy of the current text to the clipboard.
    CopyText,
    /// Ask for a target path and export the current text as a PDF.
    ExportPdf,
    /// PDF export finished (either way); `message` is shown to the user.
    PdfWritten { message: String },
    /// Dispatch the current text to the speech collaborator.
    Speak,
    /// Speech job finished.
    SpeechCompleted { error: Option<String> },
    /// Flip the light/dark style.
    ToggleTheme,
}

/// Top-level application effects (executed by the host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    HideMainWindow,
    ShowMainWindow,
    /// Show the full-screen selection overlay.
    ShowOverlay,
    /// Dismiss the selection overlay.
    DismissOverlay,
    /// Capture this display rectangle and stage the image for extraction.
    CaptureRegion { rect: RectI32 },
    /// Open the PNG/JPEG file chooser.
    ShowOpenImageDialog,
    /// Run OCR over the staged image with the given language code.
    RunOcr { language: String },
    /// Set the system clipboard to `text`.
    CopyTextToClipboard { text: String },
    /// Open the save-PDF chooser and write the current text.
    ShowSavePdfDialog { default_name: String },
    /// Speak `text`, one utterance per call.
    SpeakText { text: String },
    /// Restyle the UI for `theme`.
    ApplyTheme { theme: Theme },
    /// Non-fatal notification for the status line.
    Status { message: String },
}

/// Core workspace model.
///
/// Owns the extracted text (the sole source of truth for display, clipboard,
/// PDF export and speech input) and the per-collaborator job phases.
#[derive(Debug)]
pub struct WorkspaceModel {
    selection: selection::Model,
    ocr: job::Model,
    speech: job::Model,
    text: String,
    language: String,
    theme: Theme,
    auto_copy: bool,
}

impl Default for WorkspaceModel {
    fn default() -> Self {
        Self {
            selection: selection::Model::default(),
            ocr: job::Model::default(),
            speech: job::Model::default(),
            text: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            theme: Theme::Light,
            auto_copy: true,
        }
    }
}

impl WorkspaceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the model from persisted settings.
    pub fn restored(language: String, theme: Theme, auto_copy: bool) -> Self {
        Self {
            language,
            theme,
            auto_copy,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> &selection::Model {
        &self.selection
    }

    pub fn ocr(&self) -> &job::Model {
        &self.ocr
    }

    pub fn speech(&self) -> &job::Model {
        &self.speech
    }

    /// The displayed text. Fully replaced (never appended) by every
    /// extraction, successful or failed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn auto_copy(&self) -> bool {
        self.auto_copy
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Selection(a) => self.reduce_selection(a),

            Action::StartSelection => {
                // The workspace hides itself while an overlay session is
                // active, so only one session can exist at a time.
                if self.selection.is_active() {
                    return Vec::new();
                }
                let mut effects = vec![Effect::HideMainWindow];
                effects.extend(self.reduce_selection(selection::Action::Activate));
                effects
            }

            Action::UploadImage => vec![Effect::ShowOpenImageDialog],

            Action::ImageReady => {
                // Ignore re-entrant extraction requests while a job is running.
                if self.ocr.is_running() {
                    return Vec::new();
                }
                self.ocr.start();
                vec![Effect::RunOcr {
                    language: self.language.clone(),
                }]
            }

            Action::OcrCompleted { text } => {
                self.ocr.finish();
                self.text = text;

                let mut effects = Vec::new();
                if self.auto_copy {
                    effects.push(Effect::CopyTextToClipboard {
                        text: self.text.clone(),
                    });
                }
                // Re-show the main window; harmless when it was never hidden
                // (upload path).
                effects.push(Effect::ShowMainWindow);
                effects
            }

            Action::TextEdited { text } => {
                self.text = text;
                Vec::new()
            }

            Action::SetLanguage { code } => {
                self.language = code;
                Vec::new()
            }

            Action::SetAutoCopy { enabled } => {
                self.auto_copy = enabled;
                Vec::new()
            }

            Action::CopyText => vec![Effect::CopyTextToClipboard {
                text: self.text.clone(),
            }],

            Action::ExportPdf => vec![Effect::ShowSavePdfDialog {
                default_name: "extracted_text.pdf".to_string(),
            }],

            Action::PdfWritten { message } => vec![Effect::Status { message }],

            Action::Speak => {
                if self.speech.is_running() {
                    return Vec::new();
                }
                self.speech.start();
                vec![Effect::SpeakText {
                    text: self.text.clone(),
                }]
            }

            Action::SpeechCompleted { error } => {
                self.speech.finish();
                match error {
                    Some(e) => vec![Effect::Status {
                        message: format!("Speech failed: {e}"),
                    }],
                    None => Vec::new(),
                }
            }

            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                vec![Effect::ApplyTheme { theme: self.theme }]
            }
        }
    }

    fn reduce_selection(&mut self, action: selection::Action) -> Vec<Effect> {
        let mut out = Vec::new();
        for effect in self.selection.reduce(action) {
            match effect {
                selection::Effect::ShowOverlay => out.push(Effect::ShowOverlay),
                selection::Effect::DismissOverlay => out.push(Effect::DismissOverlay),
                selection::Effect::CaptureRegion { rect } => {
                    out.push(Effect::CaptureRegion { rect });
                }
                selection::Effect::SessionCancelled => {
                    // No capture to deliver; just bring the workspace back.
                    out.push(Effect::ShowMainWindow);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::selection;

    #[test]
    fn start_selection_hides_window_and_shows_overlay() {
        let mut m = super::WorkspaceModel::new();
        let eff = m.reduce(super::Action::StartSelection);
        assert_eq!(eff, vec![
            super::Effect::HideMainWindow,
            super::Effect::ShowOverlay
        ]);

        // Re-entrant while the overlay is up: ignored.
        assert!(m.reduce(super::Action::StartSelection).is_empty());
    }

    #[test]
    fn completed_drag_requests_capture_of_the_normalized_rect() {
        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::StartSelection);
        m.reduce(super::Action::Selection(selection::Action::PointerDown {
            x: 90,
            y: 10,
        }));
        let eff = m.reduce(super::Action::Selection(selection::Action::PointerUp {
            x: 10,
            y: 90,
        }));

        assert_eq!(eff, vec![
            super::Effect::DismissOverlay,
            super::Effect::CaptureRegion {
                rect: selection::RectI32 {
                    left: 10,
                    top: 10,
                    right: 90,
                    bottom: 90,
                }
            },
        ]);
    }

    #[test]
    fn cancelled_session_restores_the_window_without_capture() {
        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::StartSelection);
        m.reduce(super::Action::Selection(selection::Action::PointerDown {
            x: 0,
            y: 0,
        }));
        let eff = m.reduce(super::Action::Selection(selection::Action::Cancel));
        assert_eq!(eff, vec![
            super::Effect::DismissOverlay,
            super::Effect::ShowMainWindow
        ]);
    }

    #[test]
    fn image_ready_runs_ocr_once() {
        let mut m = super::WorkspaceModel::new();
        let eff = m.reduce(super::Action::ImageReady);
        assert_eq!(eff, vec![super::Effect::RunOcr {
            language: "eng".to_string()
        }]);
        assert!(m.ocr().is_running());

        // A second request while running is ignored.
        assert!(m.reduce(super::Action::ImageReady).is_empty());
    }

    #[test]
    fn ocr_completed_replaces_text_and_mirrors_clipboard() {
        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::TextEdited {
            text: "stale".to_string(),
        });
        m.reduce(super::Action::ImageReady);

        let eff = m.reduce(super::Action::OcrCompleted {
            text: "HELLO".to_string(),
        });
        assert_eq!(m.text(), "HELLO");
        assert_eq!(eff, vec![
            super::Effect::CopyTextToClipboard {
                text: "HELLO".to_string()
            },
            super::Effect::ShowMainWindow,
        ]);
    }

    #[test]
    fn auto_copy_off_skips_the_clipboard_mirror() {
        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::SetAutoCopy { enabled: false });
        m.reduce(super::Action::ImageReady);
        let eff = m.reduce(super::Action::OcrCompleted {
            text: "HELLO".to_string(),
        });
        assert_eq!(eff, vec![super::Effect::ShowMainWindow]);
    }

    #[test]
    fn error_text_replaces_the_display_like_any_result() {
        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::ImageReady);
        m.reduce(super::Action::OcrCompleted {
            text: "OCR Error: engine missing".to_string(),
        });
        assert_eq!(m.text(), "OCR Error: engine missing");
    }

    #[test]
    fn speak_is_single_flight() {
        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::TextEdited {
            text: "read me".to_string(),
        });

        let eff = m.reduce(super::Action::Speak);
        assert_eq!(eff, vec![super::Effect::SpeakText {
            text: "read me".to_string()
        }]);
        assert!(m.reduce(super::Action::Speak).is_empty());

        let eff = m.reduce(super::Action::SpeechCompleted { error: None });
        assert!(eff.is_empty());
        assert!(!m.speech().is_running());
    }

    #[test]
    fn speech_failure_surfaces_as_status() {
        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::Speak);
        let eff = m.reduce(super::Action::SpeechCompleted {
            error: Some("no output device".to_string()),
        });
        assert_eq!(eff, vec![super::Effect::Status {
            message: "Speech failed: no output device".to_string()
        }]);
    }

    #[test]
    fn toggle_theme_twice_returns_to_the_original_style() {
        let mut m = super::WorkspaceModel::new();
        let before = m.theme();

        let eff = m.reduce(super::Action::ToggleTheme);
        assert_eq!(eff, vec![super::Effect::ApplyTheme {
            theme: super::Theme::Dark
        }]);

        m.reduce(super::Action::ToggleTheme);
        assert_eq!(m.theme(), before);
    }

    #[test]
    fn word_count_tracks_whitespace_tokens() {
        assert_eq!(super::word_count("a  b   c"), 3);
        assert_eq!(super::word_count(""), 0);
        assert_eq!(super::word_count("   \n\t "), 0);

        let mut m = super::WorkspaceModel::new();
        m.reduce(super::Action::TextEdited {
            text: "a  b   c".to_string(),
        });
        assert_eq!(m.word_count(), 3);
        // Recomputation is idempotent.
        assert_eq!(m.word_count(), 3);
    }
}
