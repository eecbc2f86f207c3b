use image::RgbaImage;
use screenshots::Screen;

use tg_app::selection::RectI32;
use tg_platform::{ScreenCapture, ServicesError};

/// Display capture backed by the `screenshots` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenGrabber;

impl ScreenGrabber {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenCapture for ScreenGrabber {
    fn capture_region(&self, rect: RectI32) -> Result<RgbaImage, ServicesError> {
        let width = rect.width().max(0) as u32;
        let height = rect.height().max(0) as u32;

        // The backend rejects zero extents; a degenerate selection is still a
        // valid request and yields an empty image for the extraction path.
        if width == 0 || height == 0 {
            return Ok(RgbaImage::new(width, height));
        }

        let screen = Screen::from_point(rect.left, rect.top)
            .map_err(|e| ServicesError::Capture(e.to_string()))?;

        let captured = screen
            .capture_area(
                rect.left - screen.display_info.x,
                rect.top - screen.display_info.y,
                width,
                height,
            )
            .map_err(|e| ServicesError::Capture(e.to_string()))?;

        // Rebuild through raw bytes so the backend's image type never leaks
        // past this boundary. On scaled displays the backend may hand back
        // more pixels than requested; keep its dimensions.
        let (captured_width, captured_height) = (captured.width(), captured.height());
        let bytes = captured.to_vec();
        RgbaImage::from_raw(captured_width, captured_height, bytes).ok_or_else(|| {
            ServicesError::Capture("capture returned an unexpected buffer size".to_string())
        })
    }

    fn screen_size(&self) -> (i32, i32) {
        match Screen::all() {
            Ok(screens) => screens
                .iter()
                .find(|s| s.display_info.is_primary)
                .or_else(|| screens.first())
                .map(|s| {
                    (
                        s.display_info.width as i32,
                        s.display_info.height as i32,
                    )
                })
                .unwrap_or((0, 0)),
            Err(err) => {
                tracing::warn!(error = %err, "could not enumerate displays");
                (0, 0)
            }
        }
    }
}
