pub fn default_ocr_language() -> String {
    "eng".to_string()
}

pub fn default_auto_copy() -> bool {
    // Display mirrors the clipboard unless the user opts out.
    true
}

pub fn default_dark_mode() -> bool {
    false
}

pub fn default_page_seg_mode() -> Option<i32> {
    None
}

pub fn default_preserve_spaces() -> bool {
    false
}

pub fn default_tesseract_path() -> Option<String> {
    None
}
