//! File discovery and preset loading for sullivan projects.
//!
//! Presets are found either by scanning a project directory (honouring a
//! `sullivan.yaml` manifest when present) or from explicit paths.
//!
//! # Example
//!
//! ```ignore
//! use sullivan::discovery::discover;
//!
//! let result = discover("./plates")?;
//! println!("Found {} presets", result.scan.total());
//!
//! for loaded in result.load()? {
//!     println!("{}", loaded.name());
//! }
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use loader::{load_presets, LoadedPreset};
pub use manifest::Manifest;
pub use scanner::{detect_preset_format, scan_directory, scan_sources, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "sullivan.yaml";

/// Result of discovering presets in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no sullivan.yaml found).
    pub manifest: Manifest,

    /// Whether a sullivan.yaml manifest was found.
    pub has_manifest: bool,

    /// Discovered preset files.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Load every discovered preset.
    pub fn load(&self) -> Result<Vec<LoadedPreset>> {
        load_presets(&self.scan)
    }

    /// Output directory, resolved against the project root.
    pub fn output_dir(&self) -> PathBuf {
        if self.manifest.output.is_absolute() {
            self.manifest.output.clone()
        } else {
            self.root.join(&self.manifest.output)
        }
    }
}

/// Discover presets in a project directory.
///
/// Looks for a `sullivan.yaml` manifest in the root. If found, its source
/// directories are scanned; otherwise the whole root is.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let scan = scan_sources(&sources, &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Discover presets from specific files or directories (no manifest lookup).
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &manifest));
        } else if path.is_file() {
            scan.push_file(path);
        }
    }

    let root = paths
        .first()
        .map(|p| {
            if p.is_dir() {
                p.clone()
            } else {
                p.parent().map(Path::to_path_buf).unwrap_or_default()
            }
        })
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        scan,
    })
}
