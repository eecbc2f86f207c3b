pub mod engine;
pub mod pipeline;
pub mod types;

/// Prefix for recognition failures rendered into the display area.
pub const OCR_ERROR_PREFIX: &str = "OCR Error: ";

/// Environment variable overriding the Tesseract executable location.
pub const TESSERACT_PATH_ENV: &str = "TEXTGRAB_TESSERACT";

pub use engine::{LanguageInfo, OcrRequest, TesseractEngine, SUPPORTED_LANGUAGES};
pub use pipeline::{extract_outcome, TextRecognizer};
pub use types::{OcrError, OcrOutcome};
