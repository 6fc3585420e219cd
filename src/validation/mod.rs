//! Validation for presets.
//!
//! Runs a suite of checks against a preset and reports errors and warnings.
//! Used by `sullivan validate`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::preset::Preset;

/// Run all validation checks against one preset.
pub fn validate_preset(preset: &Preset) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_name(preset));
    result.merge(checks::check_clamped(preset));
    result.merge(checks::check_svg_options(preset));

    result
}
