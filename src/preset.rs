//! Preset files: a named generator configuration plus optional SVG options.
//!
//! Presets are JSON (`*.preset.json`) or YAML (`*.preset.yaml`,
//! `*.preset.yml`). The generator is selected by its `kind` tag and every
//! other field is optional:
//!
//! ```yaml
//! name: hex-bloom
//! generator:
//!   kind: radial-flow
//!   circleRadius: 0.72
//!   polygonSides: 6
//!   showBaseCircle: true
//! svg:
//!   includeConstruction: false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SullivanError};
use crate::plates::{
    generate_leaf_scene, generate_plate, generate_radial_flow, generate_square_scene, FlowSettings,
    LeafSettings, PlateParams, SquareSettings,
};
use crate::render::{to_svg, SvgOptions};
use crate::types::OrnamentResult;

/// On-disk preset encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetFormat {
    Json,
    Yaml,
}

impl PresetFormat {
    /// Detect the format from a preset file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?;

        if filename.ends_with(".preset.json") {
            Some(PresetFormat::Json)
        } else if filename.ends_with(".preset.yaml") || filename.ends_with(".preset.yml") {
            Some(PresetFormat::Yaml)
        } else {
            None
        }
    }

    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            PresetFormat::Json => "preset.json",
            PresetFormat::Yaml => "preset.yaml",
        }
    }
}

/// Parameters for exactly one generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GeneratorParams {
    Plate(PlateParams),
    RadialFlow(FlowSettings),
    Leaf(LeafSettings),
    Square(SquareSettings),
}

impl Default for GeneratorParams {
    fn default() -> Self {
        GeneratorParams::RadialFlow(FlowSettings::default())
    }
}

impl GeneratorParams {
    /// The `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorParams::Plate(_) => "plate",
            GeneratorParams::RadialFlow(_) => "radial-flow",
            GeneratorParams::Leaf(_) => "leaf",
            GeneratorParams::Square(_) => "square",
        }
    }

    /// Copy with every field clamped the way the generator will see it.
    pub fn normalized(&self) -> Self {
        match self {
            GeneratorParams::Plate(p) => GeneratorParams::Plate(p.normalized()),
            GeneratorParams::RadialFlow(s) => GeneratorParams::RadialFlow(s.normalized()),
            GeneratorParams::Leaf(s) => GeneratorParams::Leaf(s.normalized()),
            GeneratorParams::Square(s) => GeneratorParams::Square(s.normalized()),
        }
    }

    /// Run the selected generator.
    pub fn generate(&self) -> Result<OrnamentResult> {
        match self {
            GeneratorParams::Plate(p) => generate_plate(p),
            GeneratorParams::RadialFlow(s) => Ok(generate_radial_flow(s)),
            GeneratorParams::Leaf(s) => Ok(generate_leaf_scene(s)),
            GeneratorParams::Square(s) => Ok(generate_square_scene(s)),
        }
    }
}

/// A named generator configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,

    pub generator: GeneratorParams,

    /// Serializer options; the manifest defaults apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<SvgOptions>,
}

impl Preset {
    pub fn new(name: impl Into<String>, generator: GeneratorParams) -> Self {
        Self {
            name: name.into(),
            generator,
            svg: None,
        }
    }

    pub fn with_svg(mut self, svg: SvgOptions) -> Self {
        self.svg = Some(svg);
        self
    }

    /// Load a preset file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = PresetFormat::from_path(path).ok_or_else(|| SullivanError::Parse {
            message: format!("Not a preset file: {}", path.display()),
            help: Some("Preset files end in .preset.json, .preset.yaml, or .preset.yml".to_string()),
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| SullivanError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read preset: {}", e),
        })?;

        Self::parse(&content, format)
    }

    pub fn parse(content: &str, format: PresetFormat) -> Result<Self> {
        match format {
            PresetFormat::Json => Self::parse_json(content),
            PresetFormat::Yaml => Self::parse_yaml(content),
        }
    }

    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SullivanError::Parse {
            message: format!("Invalid preset: {}", e),
            help: Some(generator_help()),
        })
    }

    pub fn parse_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| SullivanError::Parse {
            message: format!("Invalid preset: {}", e),
            help: Some(generator_help()),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SullivanError::Parse {
            message: format!("Failed to encode preset: {}", e),
            help: None,
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| SullivanError::Parse {
            message: format!("Failed to encode preset: {}", e),
            help: None,
        })
    }

    /// Encode in `format`.
    pub fn encode(&self, format: PresetFormat) -> Result<String> {
        match format {
            PresetFormat::Json => self.to_json(),
            PresetFormat::Yaml => self.to_yaml(),
        }
    }

    pub fn generate(&self) -> Result<OrnamentResult> {
        self.generator.generate()
    }

    /// The preset's own SVG options, or `defaults` when it has none.
    pub fn svg_options(&self, defaults: &SvgOptions) -> SvgOptions {
        self.svg.clone().unwrap_or_else(|| defaults.clone())
    }

    /// Whether the name can be used as an output file stem: no path
    /// separators and not `.` or `..`.
    pub fn has_file_safe_name(&self) -> bool {
        let name = self.name.trim();
        !matches!(name, "." | "..") && !name.contains(['/', '\\'])
    }

    /// Generate and serialize in one step.
    pub fn render(&self, defaults: &SvgOptions) -> Result<String> {
        Ok(to_svg(&self.generate()?, &self.svg_options(defaults)))
    }
}

fn generator_help() -> String {
    "generator.kind must be one of: plate, radial-flow, leaf, square".to_string()
}
