//! File system scanner for discovering preset files.
//!
//! Recursively scans directories for `.preset.json`, `.preset.yaml`, and
//! `.preset.yml` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::preset::PresetFormat;

use super::manifest::Manifest;

/// Result of scanning a directory for presets.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered preset files, in walk order.
    pub presets: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Add a single file if it is a preset. Returns whether it was added.
    pub fn push_file(&mut self, path: &Path) -> bool {
        if detect_preset_format(path).is_some() && !self.presets.iter().any(|p| p == path) {
            self.presets.push(path.to_path_buf());
            true
        } else {
            false
        }
    }

    /// Merge another scan result into this one, skipping duplicates.
    pub fn merge(&mut self, other: ScanResult) {
        for path in other.presets {
            if !self.presets.contains(&path) {
                self.presets.push(path);
            }
        }
    }
}

/// Scan a directory for preset files.
///
/// Entries are visited in file-name order so builds are reproducible.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if manifest.is_excluded(relative) {
            log::trace!("excluded {}", path.display());
            continue;
        }

        result.push_file(path);
    }

    log::debug!("found {} preset(s) under {}", result.total(), root.display());
    result
}

/// Scan multiple source directories relative to `base_path`.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest));
    }

    result
}

/// Detect the preset format from a file path based on its double extension.
pub fn detect_preset_format(path: &Path) -> Option<PresetFormat> {
    PresetFormat::from_path(path)
}
