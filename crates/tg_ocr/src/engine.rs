use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::types::OcrError;

/// OCR language information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Tesseract language code (e.g. "eng").
    pub code: &'static str,
    /// Display name for the dropdown.
    pub label: &'static str,
}

/// Languages offered by the UI, paired with the codes handed to the engine.
pub const SUPPORTED_LANGUAGES: [LanguageInfo; 3] = [
    LanguageInfo {
        code: "eng",
        label: "English",
    },
    LanguageInfo {
        code: "hin",
        label: "Hindi",
    },
    LanguageInfo {
        code: "guj",
        label: "Gujarati",
    },
];

/// Display label for a language code, if it is one we offer.
pub fn language_label(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.label)
}

pub fn is_supported_language(code: &str) -> bool {
    language_label(code).is_some()
}

/// One recognition request.
///
/// The language code is passed to the engine verbatim; the optional page
/// segmentation mode and the preserve-spaces flag make up the engine
/// configuration of the advanced extraction path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrRequest {
    pub language: String,
    pub page_seg_mode: Option<i32>,
    pub preserve_spaces: bool,
}

impl Default for OcrRequest {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_seg_mode: None,
            preserve_spaces: false,
        }
    }
}

impl OcrRequest {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Map the request onto the engine's invocation arguments.
    pub fn to_args(&self) -> rusty_tesseract::Args {
        let mut config_variables = HashMap::new();
        if self.preserve_spaces {
            config_variables.insert("preserve_interword_spaces".to_string(), "1".to_string());
        }

        rusty_tesseract::Args {
            lang: self.language.clone(),
            dpi: Some(150),
            psm: self.page_seg_mode,
            oem: None,
            config_variables,
        }
    }
}

/// Tesseract-backed OCR engine.
///
/// The binding shells out to the `tesseract` binary resolved from `PATH`; an
/// explicit executable location (environment variable first, then the
/// persisted setting) is honored by prepending its directory to `PATH`.
#[derive(Debug)]
pub struct TesseractEngine {
    executable: Option<PathBuf>,
}

impl TesseractEngine {
    pub fn new(configured_path: Option<PathBuf>) -> Self {
        let executable = env::var(crate::TESSERACT_PATH_ENV)
            .ok()
            .map(PathBuf::from)
            .or(configured_path);

        if let Some(path) = &executable {
            prepend_to_path(path);
        }

        Self { executable }
    }

    /// The configured executable override, if any.
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Run recognition over an in-memory pixel buffer.
    pub fn recognize(&self, image: &RgbaImage, request: &OcrRequest) -> Result<String, OcrError> {
        // A degenerate capture produces an empty buffer; the engine cannot
        // take it, so fail it into the normal error path instead.
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::Image("capture region is empty".to_string()));
        }

        let dynamic = image::DynamicImage::ImageRgba8(image.clone());
        let input = rusty_tesseract::Image::from_dynamic_image(&dynamic)
            .map_err(|e| OcrError::Image(e.to_string()))?;

        rusty_tesseract::image_to_string(&input, &request.to_args())
            .map_err(|e| OcrError::Recognition(e.to_string()))
    }

    /// True when the engine binary answers a version probe.
    pub fn is_available(&self) -> bool {
        rusty_tesseract::get_tesseract_version().is_ok()
    }

    /// Human-readable engine status for the status line.
    pub fn status(&self) -> String {
        match rusty_tesseract::get_tesseract_version() {
            Ok(version) => {
                let line = version.lines().next().unwrap_or("unknown version").trim();
                format!("OCR engine ready ({line})")
            }
            Err(_) => format!(
                "Tesseract not found; install it or set {}",
                crate::TESSERACT_PATH_ENV
            ),
        }
    }
}

/// Put the override binary's directory in front of `PATH` so the binding's
/// `tesseract` lookup resolves to it.
fn prepend_to_path(executable: &Path) {
    let Some(dir) = executable.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return;
    };

    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = env::var_os("PATH") {
        paths.extend(env::split_paths(&existing));
    }

    if let Ok(joined) = env::join_paths(paths) {
        // Single-threaded startup path; the process environment is ours.
        unsafe { env::set_var("PATH", &joined) };
    }
}
