use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Tesseract language code handed to the engine on every extraction.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Mirror every displayed extraction result into the clipboard.
    #[serde(default = "default_auto_copy")]
    pub auto_copy: bool,

    /// Dark style toggle.
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,

    /// Page segmentation mode passed to the engine, if set.
    #[serde(default = "default_page_seg_mode")]
    pub page_seg_mode: Option<i32>,

    /// Ask the engine to keep interword spacing.
    #[serde(default = "default_preserve_spaces")]
    pub preserve_spaces: bool,

    /// Explicit location of the Tesseract binary.
    ///
    /// The `TEXTGRAB_TESSERACT` environment variable takes precedence over
    /// this at engine construction.
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ocr_language: default_ocr_language(),
            auto_copy: default_auto_copy(),
            dark_mode: default_dark_mode(),
            page_seg_mode: default_page_seg_mode(),
            preserve_spaces: default_preserve_spaces(),
            tesseract_path: default_tesseract_path(),
        }
    }
}

impl Settings {
    fn settings_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("textgrab")
    }

    pub(crate) fn settings_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Load settings from disk.
    ///
    /// Falls back to defaults (and persists them) if loading fails; a
    /// corrupted or missing file is never an error for the caller.
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    pub(crate) fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path)
            && let Ok(settings) = serde_json::from_str::<Settings>(&content)
        {
            return settings;
        }

        let default_settings = Self::default();
        if let Err(err) = default_settings.save_to(path) {
            tracing::debug!(error = %err, "could not persist default settings");
        }
        default_settings
    }

    /// Save settings to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::settings_path())
    }

    pub(crate) fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
