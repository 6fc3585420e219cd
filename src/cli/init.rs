//! Init command implementation.
//!
//! Writes a `sullivan.yaml` manifest. Directories already holding presets
//! become the manifest sources; an empty project gets an example preset.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, MANIFEST_FILENAME};
use crate::error::{Result, SullivanError};
use crate::output::{display_path, plural, Printer};
use crate::plates::{FlowSettings, NodeDecorationType};
use crate::preset::{GeneratorParams, Preset, PresetFormat};

/// Directory the example preset is written to.
const EXAMPLE_DIR: &str = "presets";

/// Initialize a sullivan project by generating a sullivan.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing sullivan.yaml and example preset
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(SullivanError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;

    let mut source_dirs = BTreeSet::new();
    for file in &discovery.scan.presets {
        if let Some(parent) = file.parent() {
            let relative = parent.strip_prefix(&discovery.root).unwrap_or(parent);
            source_dirs.insert(if relative == Path::new("") {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            });
        }
    }

    let found = discovery.scan.total();
    if found == 0 {
        write_example(&args.path, args.force, printer)?;
        source_dirs.insert(format!("{}/", EXAMPLE_DIR));
    }

    let mut yaml = String::new();
    if !(source_dirs.is_empty() || (source_dirs.len() == 1 && source_dirs.contains("."))) {
        yaml.push_str("sources:\n");
        for dir in &source_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }
    yaml.push_str("output: dist\n");
    yaml.push_str("svg:\n  stroke: \"#333\"\n  strokeWidth: 0.01\n  includeConstruction: true\n");

    fs::write(&manifest_path, &yaml).map_err(|e| SullivanError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if found > 0 {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }

    printer.status(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(found, "preset", "presets")
        ),
    );

    Ok(())
}

/// The preset written into a fresh project.
pub fn example_preset() -> Preset {
    Preset::new(
        "example",
        GeneratorParams::RadialFlow(FlowSettings {
            show_base_circle: true,
            show_cross: true,
            show_polygon: true,
            show_radials: true,
            polygon_sides: 8,
            radial_multiplier: 2,
            sub_center_depth: 1,
            node_decoration_type: NodeDecorationType::Circle,
            ..Default::default()
        }),
    )
}

fn write_example(root: &Path, force: bool, printer: &Printer) -> Result<()> {
    let dir = root.join(EXAMPLE_DIR);
    let path = dir.join(format!("example.{}", PresetFormat::Yaml.extension()));

    if path.exists() && !force {
        printer.warning("Skipping", &format!("{} (exists)", display_path(&path)));
        return Ok(());
    }

    fs::create_dir_all(&dir).map_err(|e| SullivanError::Io {
        path: dir.clone(),
        message: format!("Failed to create preset directory: {}", e),
    })?;

    let content = example_preset().to_yaml()?;
    fs::write(&path, content).map_err(|e| SullivanError::Io {
        path: path.clone(),
        message: format!("Failed to write example preset: {}", e),
    })?;

    printer.status("Created", &display_path(&path));
    Ok(())
}
