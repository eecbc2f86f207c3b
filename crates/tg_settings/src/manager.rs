use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Settings;

/// Unified config manager.
///
/// Loads the settings once, hands out snapshot copies, and persists edits.
pub struct ConfigManager {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        let path = Settings::settings_path();
        Self {
            settings: Arc::new(RwLock::new(Settings::load_from(&path))),
            path,
        }
    }

    /// Manager bound to an explicit settings file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::load_from(&path))),
            path,
        }
    }

    /// Snapshot copy of the current settings.
    pub fn get(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Apply an edit and persist the result.
    ///
    /// A failed write is logged and otherwise ignored; the in-memory settings
    /// stay authoritative for the rest of the session.
    pub fn update(&self, edit: impl FnOnce(&mut Settings)) {
        let snapshot = {
            let mut guard = self.settings.write();
            edit(&mut guard);
            guard.clone()
        };

        if let Err(err) = snapshot.save_to(&self.path) {
            tracing::warn!(error = %err, "failed to persist settings");
        }
    }

    // Convenience accessors.

    #[inline]
    pub fn ocr_language(&self) -> String {
        self.get().ocr_language
    }

    #[inline]
    pub fn auto_copy(&self) -> bool {
        self.get().auto_copy
    }

    #[inline]
    pub fn dark_mode(&self) -> bool {
        self.get().dark_mode
    }

    #[inline]
    pub fn page_seg_mode(&self) -> Option<i32> {
        self.get().page_seg_mode
    }

    #[inline]
    pub fn preserve_spaces(&self) -> bool {
        self.get().preserve_spaces
    }

    #[inline]
    pub fn tesseract_path(&self) -> Option<String> {
        self.get().tesseract_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigManager;

    #[test]
    fn snapshots_reflect_updates_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let manager = ConfigManager::with_path(path.clone());
        assert_eq!(manager.ocr_language(), "eng");

        manager.update(|s| s.ocr_language = "hin".to_string());
        assert_eq!(manager.ocr_language(), "hin");
        assert!(manager.auto_copy());

        // A fresh manager sees the persisted edit.
        let reloaded = ConfigManager::with_path(path);
        assert_eq!(reloaded.ocr_language(), "hin");
    }
}
