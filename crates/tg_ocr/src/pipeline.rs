use image::RgbaImage;

use crate::engine::{OcrRequest, TesseractEngine};
use crate::types::{OcrError, OcrOutcome};

/// Seam between the extraction pipeline and the engine.
///
/// The host hands the real engine in; tests hand in fakes.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &RgbaImage, request: &OcrRequest) -> Result<String, OcrError>;
}

impl TextRecognizer for TesseractEngine {
    fn recognize(&self, image: &RgbaImage, request: &OcrRequest) -> Result<String, OcrError> {
        TesseractEngine::recognize(self, image, request)
    }
}

/// Run one extraction and fold any failure into a displayable outcome.
///
/// Nothing escapes this call: engine errors become `OcrOutcome::Failed` and a
/// warning in the log, never a propagated error.
pub fn extract_outcome(
    recognizer: &dyn TextRecognizer,
    image: &RgbaImage,
    request: &OcrRequest,
) -> OcrOutcome {
    let result = recognizer.recognize(image, request);
    if let Err(err) = &result {
        tracing::warn!(language = %request.language, error = %err, "text recognition failed");
    }
    OcrOutcome::from_result(result)
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::{extract_outcome, OcrRequest, TextRecognizer};
    use crate::types::OcrError;

    struct FixedRecognizer(Result<String, OcrError>);

    impl TextRecognizer for FixedRecognizer {
        fn recognize(
            &self,
            _image: &RgbaImage,
            _request: &OcrRequest,
        ) -> Result<String, OcrError> {
            self.0.clone()
        }
    }

    #[test]
    fn successful_extraction_yields_the_recognized_text() {
        let recognizer = FixedRecognizer(Ok("HELLO\n".to_string()));
        let outcome = extract_outcome(
            &recognizer,
            &RgbaImage::new(4, 4),
            &OcrRequest::new("eng"),
        );
        assert_eq!(outcome.display_text(), "HELLO");
    }

    #[test]
    fn engine_failure_becomes_display_text_not_a_panic() {
        let recognizer =
            FixedRecognizer(Err(OcrError::Recognition("engine missing".to_string())));
        let outcome = extract_outcome(
            &recognizer,
            &RgbaImage::new(4, 4),
            &OcrRequest::new("eng"),
        );
        assert_eq!(outcome.display_text(), "OCR Error: engine missing");
    }

    #[test]
    fn degenerate_image_flows_through_the_error_path() {
        // The real engine rejects an empty buffer; the pipeline must turn
        // that into display text like any other failure.
        let engine = crate::engine::TesseractEngine::new(None);
        let outcome = extract_outcome(&engine, &RgbaImage::new(0, 0), &OcrRequest::default());
        assert!(outcome.is_failed());
        assert!(outcome.display_text().starts_with("OCR Error: "));
    }
}
