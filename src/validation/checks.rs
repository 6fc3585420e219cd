//! Validation checks for presets.
//!
//! Each check takes a `&Preset` and returns a `ValidationResult`.

use serde_json::Value;

use crate::preset::{GeneratorParams, Preset};
use crate::render::{SvgOptions, MAX_PRECISION};

use super::warning::{Diagnostic, ValidationResult};

/// Check that the preset has a usable name.
pub fn check_name(preset: &Preset) -> ValidationResult {
    let mut result = ValidationResult::new();

    if preset.name.trim().is_empty() {
        result.push(
            Diagnostic::error("sullivan::validate::empty-name", "Preset has no name")
                .with_help("Add a `name` field; it becomes the output file name"),
        );
    } else if !preset.has_file_safe_name() {
        result.push(
            Diagnostic::error(
                "sullivan::validate::unsafe-name",
                format!("Preset name '{}' is not a valid file name", preset.name),
            )
            .with_help("Drop path separators from the name; it becomes the output file name"),
        );
    }

    result
}

/// Report every generator field the generator will clamp or snap.
///
/// Compares the serialized raw parameters with their normalized form field
/// by field. Square `show*` toggles are skipped when `step` drives them.
pub fn check_clamped(preset: &Preset) -> ValidationResult {
    let mut result = ValidationResult::new();
    let kind = preset.generator.kind();

    let (Ok(raw), Ok(clamped)) = (
        serde_json::to_value(&preset.generator),
        serde_json::to_value(preset.generator.normalized()),
    ) else {
        return result;
    };
    let (Some(raw), Some(clamped)) = (raw.as_object(), clamped.as_object()) else {
        return result;
    };

    let step_driven = matches!(
        &preset.generator,
        GeneratorParams::Square(settings) if settings.step.is_some()
    );

    for (field, raw_value) in raw {
        if step_driven && field.starts_with("show") {
            continue;
        }
        let Some(clamped_value) = clamped.get(field) else {
            continue;
        };
        if !same_value(raw_value, clamped_value) {
            result.push(
                Diagnostic::warning(
                    "sullivan::validate::clamped",
                    format!(
                        "{}.{}: {} → {}",
                        kind,
                        field,
                        display_value(raw_value),
                        display_value(clamped_value)
                    ),
                )
                .with_help("The generator uses the clamped value; set it explicitly to silence this"),
            );
        }
    }

    result
}

/// Check serializer options that would produce unusable markup.
pub fn check_svg_options(preset: &Preset) -> ValidationResult {
    let mut result = ValidationResult::new();
    let Some(svg) = &preset.svg else {
        return result;
    };

    if svg.stroke_width <= 0.0 {
        result.push(
            Diagnostic::warning(
                "sullivan::validate::stroke-width",
                format!("svg.strokeWidth is {}; lines will not be visible", svg.stroke_width),
            )
            .with_help(format!(
                "Use a positive width such as {}",
                SvgOptions::default().stroke_width
            )),
        );
    }

    if svg.stroke.is_none() && svg.fill.is_none() {
        result.push(
            Diagnostic::warning(
                "sullivan::validate::invisible",
                "svg.stroke and svg.fill are both none",
            )
            .with_help("Set stroke to a colour or currentColor"),
        );
    }

    if svg.precision > MAX_PRECISION {
        result.push(
            Diagnostic::warning(
                "sullivan::validate::precision",
                format!("svg.precision: {} → {}", svg.precision, MAX_PRECISION),
            )
            .with_help("Coordinates are printed with at most 100 decimals"),
        );
    }

    for (field, value) in [("width", svg.width), ("height", svg.height)] {
        if let Some(v) = value.filter(|v| *v <= 0.0) {
            result.push(Diagnostic::error(
                "sullivan::validate::dimension",
                format!("svg.{} must be positive, got {}", field, v),
            ));
        }
    }

    result
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plates::{FlowSettings, LeafSettings, PlateParams, SquareSettings};
    use crate::types::Paint;
    use pretty_assertions::assert_eq;

    fn messages(result: &ValidationResult) -> Vec<String> {
        result.iter().map(|d| d.message.clone()).collect()
    }

    #[test]
    fn test_empty_name_is_error() {
        let preset = Preset::new("  ", GeneratorParams::default());
        let result = check_name(&preset);

        assert!(result.has_errors());
        assert!(check_name(&Preset::new("hex", GeneratorParams::default())).is_ok());
    }

    #[test]
    fn test_path_like_name_is_error() {
        for name in ["../x", "a/b", ".."] {
            let result = check_name(&Preset::new(name, GeneratorParams::default()));
            assert_eq!(result.error_count(), 1, "{}", name);
        }
        assert!(check_name(&Preset::new("x..y", GeneratorParams::default())).is_ok());
    }

    #[test]
    fn test_defaults_are_not_clamped() {
        for generator in [
            GeneratorParams::Plate(PlateParams::default()),
            GeneratorParams::RadialFlow(FlowSettings::default()),
            GeneratorParams::Leaf(LeafSettings::default()),
            GeneratorParams::Square(SquareSettings::default()),
        ] {
            let preset = Preset::new("p", generator);
            assert!(check_clamped(&preset).is_ok(), "{}", preset.generator.kind());
        }
    }

    #[test]
    fn test_clamped_fields_reported() {
        let preset = Preset::new(
            "wild",
            GeneratorParams::RadialFlow(FlowSettings {
                polygon_sides: 40,
                circle_radius: 2.0,
                ..Default::default()
            }),
        );
        let result = check_clamped(&preset);

        assert_eq!(result.warning_count(), 2);
        let mut found = messages(&result);
        found.sort();
        assert_eq!(
            found,
            vec![
                "radial-flow.circleRadius: 2.0 → 0.98",
                "radial-flow.polygonSides: 40 → 18"
            ]
        );
    }

    #[test]
    fn test_unknown_profile_reported() {
        let preset = Preset::new(
            "fern",
            GeneratorParams::Leaf(LeafSettings {
                profile: "fern".to_string(),
                ..Default::default()
            }),
        );
        let result = check_clamped(&preset);

        assert_eq!(messages(&result), vec!["leaf.profile: \"fern\" → \"ovate\""]);
    }

    #[test]
    fn test_square_step_toggles_not_reported() {
        let preset = Preset::new(
            "frame",
            GeneratorParams::Square(SquareSettings {
                step: Some(2),
                ..Default::default()
            }),
        );
        assert!(check_clamped(&preset).is_ok());
    }

    #[test]
    fn test_svg_options_checks() {
        let preset = Preset::new("p", GeneratorParams::default()).with_svg(SvgOptions {
            stroke: Paint::None,
            stroke_width: 0.0,
            width: Some(-4.0),
            ..Default::default()
        });
        let result = check_svg_options(&preset);

        assert_eq!(result.warning_count(), 2);
        assert_eq!(result.error_count(), 1);
        assert!(check_svg_options(&Preset::new("p", GeneratorParams::default())).is_ok());
    }

    #[test]
    fn test_oversized_precision_reported() {
        let preset = Preset::new("p", GeneratorParams::default()).with_svg(SvgOptions {
            precision: 100_000,
            ..Default::default()
        });
        let result = check_svg_options(&preset);

        assert_eq!(messages(&result), vec!["svg.precision: 100000 → 100"]);
        assert!(!result.has_errors());
    }
}
