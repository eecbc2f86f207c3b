use thiserror::Error;

/// Recognition failure.
///
/// Every failure out of the OCR collaborator is catchable and ends up as
/// display text; nothing here is allowed to escape the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OcrError {
    /// The engine rejected or failed the recognition call.
    #[error("{0}")]
    Recognition(String),
    /// The staged image could not be handed to the engine.
    #[error("image error: {0}")]
    Image(String),
}

/// OCR outcome derived from one recognition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    /// Recognition produced text content.
    Success { text: String },
    /// Recognition ran but found no text.
    Empty,
    /// Recognition failed.
    Failed { message: String },
}

impl OcrOutcome {
    pub fn from_result(result: Result<String, OcrError>) -> Self {
        match result {
            Ok(raw) => {
                let text = raw.trim_end();
                if text.trim().is_empty() {
                    OcrOutcome::Empty
                } else {
                    OcrOutcome::Success {
                        text: text.to_string(),
                    }
                }
            }
            Err(err) => OcrOutcome::Failed {
                message: err.to_string(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OcrOutcome::Failed { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, OcrOutcome::Empty)
    }

    /// Text to place in the display area.
    ///
    /// Failures render as a literal `"OCR Error: <message>"` string; an empty
    /// result clears the display.
    pub fn display_text(&self) -> String {
        match self {
            OcrOutcome::Success { text } => text.clone(),
            OcrOutcome::Empty => String::new(),
            OcrOutcome::Failed { message } => {
                format!("{}{message}", crate::OCR_ERROR_PREFIX)
            }
        }
    }
}
