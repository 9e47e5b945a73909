// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub page: PageOptions,
    pub export: ExportOptions,
}

/// Behaviour knobs for a loaded page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageOptions {
    /// Press-to-move delay before a checkbox press turns into a drag.
    pub drag_threshold_ms: u64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { drag_threshold_ms: DRAG_THRESHOLD_MS }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR) }
    }
}

impl ExportOptions {
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Parse GUI/CLI text into the download directory. Empty text restores the default.
    pub fn set_out_dir(&mut self, text: &str) {
        let s = text.trim();
        self.out_dir = if s.is_empty() {
            PathBuf::from(DEFAULT_OUT_DIR)
        } else {
            PathBuf::from(crate::file::normalize_separators(s))
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_out_dir_falls_back_to_default() {
        let mut export = ExportOptions::default();
        export.set_out_dir("  exports  ");
        assert_eq!(export.out_dir(), Path::new("exports"));
        export.set_out_dir("   ");
        assert_eq!(export.out_dir(), Path::new(DEFAULT_OUT_DIR));
    }
}
