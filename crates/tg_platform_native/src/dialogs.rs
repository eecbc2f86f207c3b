use std::path::PathBuf;

use tg_platform::Dialogs;

/// Modal file choosers backed by `rfd`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDialogs;

impl NativeDialogs {
    pub fn new() -> Self {
        Self
    }
}

impl Dialogs for NativeDialogs {
    fn pick_image(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open Image")
            .add_filter("Images (PNG, JPEG)", &["png", "jpg", "jpeg"])
            .pick_file()
    }

    fn save_pdf(&self, default_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Save as PDF")
            .set_file_name(default_name)
            .add_filter("PDF document", &["pdf"])
            .save_file()
    }
}
