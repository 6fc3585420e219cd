//! Project manifest (sullivan.yaml) parsing.
//!
//! The manifest names the directories to scan for presets, where rendered
//! SVG goes, and the serializer defaults for presets without their own.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SullivanError};
use crate::render::SvgOptions;

/// Project manifest loaded from sullivan.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directories to scan for presets. Defaults to the project root.
    pub sources: Vec<String>,

    /// Output directory for rendered SVG.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Serializer options for presets that carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<SvgOptions>,

    /// Fit every scene into a square viewport of this many pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: default_output(),
            excludes: vec![],
            svg: None,
            size: None,
        }
    }
}

impl Manifest {
    /// Load manifest from a sullivan.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SullivanError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string. Blank input yields the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| SullivanError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check sullivan.yaml syntax".to_string()),
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| SullivanError::Parse {
            message: format!("Failed to encode manifest: {}", e),
            help: None,
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Minimal glob matching: `**/dir/*`, `*.ext`, `dir/*`, or a substring.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.starts_with(&format!("{}/", dir))
                    || path.contains(&format!("/{}/", dir));
            }
            return path.ends_with(suffix) || path.contains(&format!("/{}", suffix));
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }

    /// Source directories, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// SVG defaults for presets without their own.
    pub fn effective_svg(&self) -> SvgOptions {
        self.svg.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Paint;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("output: build").unwrap();

        assert_eq!(manifest.output, PathBuf::from("build"));
        assert!(manifest.sources.is_empty());
        assert!(manifest.svg.is_none());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
sources:
  - presets/
  - studies/
output: dist/plates
size: 600
svg:
  stroke: currentColor
  strokeWidth: 1.5
  includeConstruction: false
excludes:
  - "*.bak"
  - "**/scratch/*"
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.sources, vec!["presets/", "studies/"]);
        assert_eq!(manifest.output, PathBuf::from("dist/plates"));
        assert_eq!(manifest.size, Some(600.0));
        assert_eq!(manifest.excludes, vec!["*.bak", "**/scratch/*"]);

        let svg = manifest.effective_svg();
        assert_eq!(svg.stroke, Paint::CurrentColor);
        assert_eq!(svg.stroke_width, 1.5);
        assert!(!svg.include_construction);
        assert_eq!(svg.precision, 4);
    }

    #[test]
    fn test_default_manifest() {
        let manifest = Manifest::default();

        assert!(manifest.sources.is_empty());
        assert_eq!(manifest.output, PathBuf::from("dist"));
        assert!(manifest.size.is_none());
        assert!(manifest.excludes.is_empty());
        assert_eq!(manifest.effective_svg(), SvgOptions::default());
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert_eq!(Manifest::parse("").unwrap(), Manifest::default());
        assert_eq!(Manifest::parse("\n  \n").unwrap(), Manifest::default());
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let err = Manifest::parse("sources: 12: nope").unwrap_err();
        assert!(matches!(err, SullivanError::Parse { .. }));
    }

    #[test]
    fn test_effective_sources() {
        let mut manifest = Manifest::default();
        assert_eq!(manifest.effective_sources(), vec!["."]);

        manifest.sources = vec!["presets/".to_string()];
        assert_eq!(manifest.effective_sources(), vec!["presets/"]);
    }

    #[test]
    fn test_is_excluded_extension() {
        let manifest = Manifest {
            excludes: vec!["*.bak".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("hex.bak")));
        assert!(manifest.is_excluded(Path::new("presets/hex.bak")));
        assert!(!manifest.is_excluded(Path::new("hex.preset.json")));
    }

    #[test]
    fn test_is_excluded_directory() {
        let manifest = Manifest {
            excludes: vec!["**/scratch/*".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("scratch/a.preset.json")));
        assert!(manifest.is_excluded(Path::new("presets/scratch/b.preset.yaml")));
        assert!(!manifest.is_excluded(Path::new("presets/hex.preset.json")));
    }

    #[test]
    fn test_round_trip_yaml() {
        let manifest = Manifest {
            sources: vec!["presets".to_string()],
            size: Some(800.0),
            ..Default::default()
        };
        let yaml = manifest.to_yaml().unwrap();
        assert_eq!(Manifest::parse(&yaml).unwrap(), manifest);
    }
}
