//! Preset loader - parses discovered files into presets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SullivanError};
use crate::preset::Preset;

use super::scanner::ScanResult;

/// A preset together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPreset {
    pub path: PathBuf,
    pub preset: Preset,
}

impl LoadedPreset {
    /// Output file stem: the preset name.
    pub fn name(&self) -> &str {
        &self.preset.name
    }
}

/// Load every scanned preset.
///
/// All files are attempted; failures are collected into one error. A preset
/// without a name takes its file name minus the preset extension, and two
/// presets may not share a name. Names double as output file stems, so path
/// separators are rejected.
pub fn load_presets(scan: &ScanResult) -> Result<Vec<LoadedPreset>> {
    let mut loaded = Vec::with_capacity(scan.total());
    let mut errors: Vec<String> = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for path in &scan.presets {
        let mut preset = match Preset::load(path) {
            Ok(preset) => preset,
            Err(e) => {
                errors.push(format!("{}: {}", path.display(), e));
                continue;
            }
        };

        if preset.name.trim().is_empty() {
            preset.name = file_stem(path);
        }

        if !preset.has_file_safe_name() {
            errors.push(format!(
                "{}: preset name '{}' is not a valid file name",
                path.display(),
                preset.name
            ));
            continue;
        }

        if let Some(first) = seen.get(&preset.name) {
            errors.push(format!(
                "{}: duplicate preset name '{}' (first defined in {})",
                path.display(),
                preset.name,
                first.display()
            ));
            continue;
        }
        seen.insert(preset.name.clone(), path.clone());

        log::debug!("loaded preset '{}' ({})", preset.name, preset.generator.kind());
        loaded.push(LoadedPreset {
            path: path.clone(),
            preset,
        });
    }

    if !errors.is_empty() {
        return Err(SullivanError::Build {
            message: format!(
                "Failed to load {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ),
            help: Some("Fix the errors above and try again".to_string()),
        });
    }

    Ok(loaded)
}

/// `hex.preset.json` -> `hex`.
fn file_stem(path: &Path) -> String {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    [".preset.json", ".preset.yaml", ".preset.yml"]
        .iter()
        .find_map(|ext| filename.strip_suffix(ext))
        .unwrap_or(&filename)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SQUARE: &str = r#"{"name": "frame", "generator": {"kind": "square", "step": 2}}"#;

    fn scan_of(paths: &[PathBuf]) -> ScanResult {
        let mut scan = ScanResult::new();
        for path in paths {
            scan.push_file(path);
        }
        scan
    }

    #[test]
    fn test_load_presets() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("frame.preset.json");
        let yaml = dir.path().join("leaf.preset.yaml");
        fs::write(&json, SQUARE).unwrap();
        fs::write(&yaml, "name: tall-leaf\ngenerator:\n  kind: leaf\n").unwrap();

        let loaded = load_presets(&scan_of(&[json, yaml])).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name(), "frame");
        assert_eq!(loaded[1].name(), "tall-leaf");
        assert_eq!(loaded[1].preset.generator.kind(), "leaf");
    }

    #[test]
    fn test_missing_name_uses_file_stem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quiet.preset.yml");
        fs::write(&path, "generator:\n  kind: square\n").unwrap();

        let loaded = load_presets(&scan_of(&[path])).unwrap();
        assert_eq!(loaded[0].name(), "quiet");
    }

    #[test]
    fn test_errors_are_collected() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.preset.json");
        let bad = dir.path().join("bad.preset.json");
        let worse = dir.path().join("worse.preset.yaml");
        fs::write(&good, SQUARE).unwrap();
        fs::write(&bad, "{ not json").unwrap();
        fs::write(&worse, "generator:\n  kind: spiral\n").unwrap();

        let err = load_presets(&scan_of(&[good, bad, worse])).unwrap_err();
        match err {
            SullivanError::Build { message, .. } => {
                assert!(message.starts_with("Failed to load 2 file(s):"));
                assert!(message.contains("bad.preset.json"));
                assert!(message.contains("worse.preset.yaml"));
            }
            other => panic!("Expected build error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.preset.json");
        let b = dir.path().join("b.preset.json");
        fs::write(&a, SQUARE).unwrap();
        fs::write(&b, SQUARE).unwrap();

        let err = load_presets(&scan_of(&[a, b])).unwrap_err();
        assert!(err.to_string().contains("Failed to load 1 file(s)"));
    }

    #[test]
    fn test_names_with_separators_rejected() {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for (file, name) in [("up", "../x"), ("nested", "a/b"), ("back", "a\\\\b"), ("dots", "..")] {
            let path = dir.path().join(format!("{}.preset.json", file));
            fs::write(
                &path,
                format!(r#"{{"name": "{}", "generator": {{"kind": "square"}}}}"#, name),
            )
            .unwrap();
            paths.push(path);
        }

        let err = load_presets(&scan_of(&paths)).unwrap_err();
        assert!(err.to_string().contains("Failed to load 4 file(s)"));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("x/hex.preset.json")), "hex");
        assert_eq!(file_stem(Path::new("leaf.preset.yml")), "leaf");
    }
}
