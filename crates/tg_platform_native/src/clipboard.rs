use tg_platform::{ServicesError, TextClipboard};

/// System clipboard backed by `arboard`.
///
/// The handle is created lazily and kept for the life of the app so the
/// contents survive on platforms where dropping the handle clears them.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ServicesError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ServicesError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ServicesError::Clipboard("clipboard unavailable".to_string()))
    }
}

impl TextClipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ServicesError> {
        self.handle()?
            .set_text(text.to_string())
            .map_err(|e| ServicesError::Clipboard(e.to_string()))
    }
}
