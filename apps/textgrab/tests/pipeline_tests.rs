//! End-to-end extraction pipeline tests with fake collaborators.

use image::RgbaImage;
use tg_app::selection;
use tg_app::{Action, Effect, WorkspaceModel};
use tg_ocr::{extract_outcome, OcrError, OcrRequest, TesseractEngine, TextRecognizer};
use tg_platform::{ScreenCapture, ServicesError, TextClipboard};

#[derive(Default)]
struct FakeClipboard {
    last: Option<String>,
}

impl TextClipboard for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ServicesError> {
        self.last = Some(text.to_string());
        Ok(())
    }
}

struct FakeCapture;

impl ScreenCapture for FakeCapture {
    fn capture_region(&self, rect: selection::RectI32) -> Result<RgbaImage, ServicesError> {
        Ok(RgbaImage::new(
            rect.width().max(0) as u32,
            rect.height().max(0) as u32,
        ))
    }

    fn screen_size(&self) -> (i32, i32) {
        (1920, 1080)
    }
}

struct FakeRecognizer(Result<String, OcrError>);

impl TextRecognizer for FakeRecognizer {
    fn recognize(&self, _image: &RgbaImage, _request: &OcrRequest) -> Result<String, OcrError> {
        self.0.clone()
    }
}

/// Drive a full selection through the reducer and return the captured image.
fn select_region(model: &mut WorkspaceModel, p1: (i32, i32), p2: (i32, i32)) -> RgbaImage {
    let eff = model.reduce(Action::StartSelection);
    assert_eq!(eff, vec![Effect::HideMainWindow, Effect::ShowOverlay]);

    model.reduce(Action::Selection(selection::Action::PointerDown {
        x: p1.0,
        y: p1.1,
    }));
    model.reduce(Action::Selection(selection::Action::PointerMove {
        x: (p1.0 + p2.0) / 2,
        y: (p1.1 + p2.1) / 2,
    }));
    let eff = model.reduce(Action::Selection(selection::Action::PointerUp {
        x: p2.0,
        y: p2.1,
    }));

    let rect = eff
        .iter()
        .find_map(|e| match e {
            Effect::CaptureRegion { rect } => Some(*rect),
            _ => None,
        })
        .expect("selection must request a capture");

    FakeCapture.capture_region(rect).unwrap()
}

/// Run the staged image through OCR and feed the result back into the model,
/// executing the clipboard effect like the host would.
fn finish_extraction(
    model: &mut WorkspaceModel,
    clipboard: &mut FakeClipboard,
    recognizer: &dyn TextRecognizer,
    image: &RgbaImage,
) {
    let eff = model.reduce(Action::ImageReady);
    let language = eff
        .iter()
        .find_map(|e| match e {
            Effect::RunOcr { language } => Some(language.clone()),
            _ => None,
        })
        .expect("staged image must start an OCR job");

    let outcome = extract_outcome(recognizer, image, &OcrRequest::new(language));
    let eff = model.reduce(Action::OcrCompleted {
        text: outcome.display_text(),
    });

    for effect in &eff {
        if let Effect::CopyTextToClipboard { text } = effect {
            clipboard.set_text(text).unwrap();
        }
    }
    assert!(eff.contains(&Effect::ShowMainWindow));
}

#[test]
fn selection_to_text_with_clipboard_mirror() {
    let mut model = WorkspaceModel::new();
    let mut clipboard = FakeClipboard::default();

    let image = select_region(&mut model, (40, 30), (400, 200));
    assert_eq!((image.width(), image.height()), (360, 170));

    finish_extraction(
        &mut model,
        &mut clipboard,
        &FakeRecognizer(Ok("HELLO".to_string())),
        &image,
    );

    assert!(model.text().contains("HELLO"));
    assert_eq!(clipboard.last.as_deref(), Some(model.text()));
}

#[test]
fn failed_engine_renders_the_error_string() {
    let mut model = WorkspaceModel::new();
    let mut clipboard = FakeClipboard::default();

    let image = select_region(&mut model, (0, 0), (100, 100));
    finish_extraction(
        &mut model,
        &mut clipboard,
        &FakeRecognizer(Err(OcrError::Recognition("engine missing".to_string()))),
        &image,
    );

    assert_eq!(model.text(), "OCR Error: engine missing");
    // The clipboard mirrors the display, error text included.
    assert_eq!(clipboard.last.as_deref(), Some("OCR Error: engine missing"));
}

#[test]
fn zero_movement_selection_survives_the_whole_pipeline() {
    let mut model = WorkspaceModel::new();
    let mut clipboard = FakeClipboard::default();

    // Down and up at the same point: degenerate capture, no crash.
    let image = select_region(&mut model, (77, 77), (77, 77));
    assert_eq!(image.width(), 0);

    // The real engine refuses the empty buffer without ever invoking the
    // binary, so this path is deterministic on any machine.
    let engine = TesseractEngine::new(None);
    finish_extraction(&mut model, &mut clipboard, &engine, &image);

    assert!(model.text().is_empty() || model.text().starts_with("OCR Error: "));
}

#[test]
fn uploaded_image_runs_the_same_extraction_path() {
    let mut model = WorkspaceModel::new();
    let mut clipboard = FakeClipboard::default();

    // The upload path stages a decoded file instead of a screen cut; from
    // the reducer's point of view the flows are identical.
    assert_eq!(model.reduce(Action::UploadImage), vec![
        Effect::ShowOpenImageDialog
    ]);

    let decoded = RgbaImage::new(320, 200);
    finish_extraction(
        &mut model,
        &mut clipboard,
        &FakeRecognizer(Ok("uploaded words here".to_string())),
        &decoded,
    );

    assert_eq!(model.text(), "uploaded words here");
    assert_eq!(model.word_count(), 3);
}
