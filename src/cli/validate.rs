//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::discover_paths;
use crate::error::{Result, SullivanError};
use crate::output::{display_path, plural, Printer};
use crate::preset::Preset;
use crate::validation::{validate_preset, Diagnostic, ValidationResult};

/// Check presets for clamped or unusable values
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Preset files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let (checked, result) = collect(&args.paths)?;
    printer.status("Checked", &plural(checked, "preset", "presets"));
    printer.diagnostics(&result);

    if result.has_errors() {
        return Err(SullivanError::Validation {
            message: format!("{} in presets", plural(result.error_count(), "error", "errors")),
            help: None,
        });
    }

    if args.strict && result.has_warnings() {
        return Err(SullivanError::Validation {
            message: format!(
                "{} with --strict",
                plural(result.warning_count(), "warning", "warnings")
            ),
            help: Some("Fix the warnings or drop --strict".to_string()),
        });
    }

    Ok(())
}

/// Load and check every preset under `paths`. Unreadable presets become
/// error diagnostics instead of aborting the run.
pub fn collect(paths: &[PathBuf]) -> Result<(usize, ValidationResult)> {
    let discovery = discover_paths(paths)?;
    if discovery.scan.is_empty() {
        return Err(SullivanError::Build {
            message: "No presets found".to_string(),
            help: Some("Preset files end in .preset.json, .preset.yaml, or .preset.yml".to_string()),
        });
    }

    let mut result = ValidationResult::new();
    for path in &discovery.scan.presets {
        let label = display_path(path);
        match Preset::load(path) {
            Ok(preset) => result.merge(validate_preset(&preset).in_preset(&label)),
            Err(e) => result.push(
                Diagnostic::error("sullivan::validate::load", e.to_string()).in_preset(&label),
            ),
        }
    }

    Ok((discovery.scan.total(), result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn validate(paths: Vec<PathBuf>, strict: bool) -> Result<()> {
        run(ValidateArgs { paths, strict }, &Printer::new())
    }

    #[test]
    fn test_clean_preset_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.preset.yaml");
        fs::write(&path, "name: frame\ngenerator:\n  kind: square\n").unwrap();

        validate(vec![path.clone()], false).unwrap();
        validate(vec![path], true).unwrap();
    }

    #[test]
    fn test_warnings_fail_only_when_strict() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.preset.json");
        fs::write(
            &path,
            r#"{"name": "wide", "generator": {"kind": "radial-flow", "polygonSides": 30}}"#,
        )
        .unwrap();

        let (checked, result) = collect(&[path.clone()]).unwrap();
        assert_eq!(checked, 1);
        assert_eq!(result.warning_count(), 1);

        validate(vec![path.clone()], false).unwrap();
        let err = validate(vec![path], true).unwrap_err();
        assert!(matches!(err, SullivanError::Validation { .. }));
    }

    #[test]
    fn test_unreadable_preset_is_error_diagnostic() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.preset.yaml"), "name: g\ngenerator:\n  kind: leaf\n").unwrap();
        fs::write(dir.path().join("bad.preset.json"), "{").unwrap();

        let (checked, result) = collect(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(checked, 2);
        assert_eq!(result.error_count(), 1);
        assert!(validate(vec![dir.path().to_path_buf()], false).is_err());
    }

    #[test]
    fn test_missing_name_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anon.preset.yaml");
        fs::write(&path, "generator:\n  kind: plate\n").unwrap();

        let (_, result) = collect(&[path]).unwrap();
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_no_presets_is_error() {
        let dir = tempdir().unwrap();
        assert!(collect(&[dir.path().to_path_buf()]).is_err());
    }
}
