use std::path::PathBuf;

use image::RgbaImage;
use thiserror::Error;

use tg_app::selection::RectI32;

/// Error returned by host-facing collaborator services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServicesError {
    #[error("capture error: {0}")]
    Capture(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("dialog error: {0}")]
    Dialog(String),
    #[error("speech error: {0}")]
    Speech(String),
}

/// Display capture primitive.
///
/// Takes a rectangle in screen coordinates and returns the pixels beneath it.
/// A degenerate rectangle is not an error: it yields an empty image, which the
/// extraction path is expected to tolerate.
pub trait ScreenCapture {
    fn capture_region(&self, rect: RectI32) -> Result<RgbaImage, ServicesError>;

    /// Size of the primary display in pixels.
    fn screen_size(&self) -> (i32, i32);
}

/// Process-wide text clipboard, fire-and-forget.
pub trait TextClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ServicesError>;
}

/// Modal file choosers.
///
/// Both return `None` when the user cancels; cancellation is a no-op for the
/// caller, never an error.
pub trait Dialogs {
    /// "Open image" dialog filtered to PNG/JPEG.
    fn pick_image(&self) -> Option<PathBuf>;

    /// "Save PDF" dialog with a suggested file name.
    fn save_pdf(&self, default_name: &str) -> Option<PathBuf>;
}

/// Speech synthesis, one utterance per call.
///
/// `speak` returns once playback has finished; hosts are expected to call it
/// off the UI thread.
pub trait Speech {
    fn speak(&mut self, text: &str) -> Result<(), ServicesError>;
}
