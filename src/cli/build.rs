//! Build command implementation.
//!
//! Generates every discovered preset and writes one SVG per preset.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, discover_paths, DiscoveryResult, MANIFEST_FILENAME};
use crate::error::{Result, SullivanError};
use crate::output::{display_path, plural, Printer};
use crate::preset::Preset;
use crate::render::{fit_to_viewport, to_svg, write_svg, SvgOptions};

/// Generate SVG from preset files
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Preset files or directories (default: manifest sources)
    pub paths: Vec<PathBuf>,

    /// Output directory (default: manifest output)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Fit scenes into a square viewport of this many pixels
    #[arg(long)]
    pub size: Option<f64>,

    /// Leave construction lines out of the output
    #[arg(long)]
    pub no_construction: bool,
}

/// Per-run settings shared by every preset.
#[derive(Debug, Clone, Default)]
pub struct RenderSettings {
    pub defaults: SvgOptions,
    pub size: Option<f64>,
    pub no_construction: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<Vec<PathBuf>> {
    let discovery = discover_inputs(&args.paths)?;

    if discovery.scan.is_empty() {
        return Err(SullivanError::Build {
            message: "No presets found".to_string(),
            help: Some(
                "Preset files end in .preset.json, .preset.yaml, or .preset.yml; run `sullivan init` to create one"
                    .to_string(),
            ),
        });
    }

    let presets = discovery.load()?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| discovery.output_dir());
    fs::create_dir_all(&output).map_err(|e| SullivanError::Io {
        path: output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let settings = RenderSettings {
        defaults: discovery.manifest.effective_svg(),
        size: args.size.or(discovery.manifest.size),
        no_construction: args.no_construction,
    };

    let mut written = Vec::with_capacity(presets.len());
    for loaded in &presets {
        printer.status(
            "Generating",
            &format!(
                "{} {}",
                loaded.name(),
                printer.dim(&format!("({})", loaded.preset.generator.kind()))
            ),
        );

        let svg = render_preset(&loaded.preset, &settings)?;
        let target = output_path(&output, loaded.name());
        write_svg(&svg, &target)?;
        written.push(target);
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(written.len(), "preset", "presets"),
            printer.cyan(&display_path(&output))
        ),
    );

    Ok(written)
}

/// No paths: the current directory as a project. One directory holding a
/// manifest: that project. Anything else: the paths as given.
fn discover_inputs(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    match paths {
        [] => discover("."),
        [dir] if dir.is_dir() && dir.join(MANIFEST_FILENAME).exists() => discover(dir),
        _ => {
            if let Some(missing) = paths.iter().find(|p| !p.exists()) {
                return Err(SullivanError::Io {
                    path: missing.clone(),
                    message: "No such file or directory".to_string(),
                });
            }
            discover_paths(paths)
        }
    }
}

/// Generate, optionally fit, and serialize one preset.
pub fn render_preset(preset: &Preset, settings: &RenderSettings) -> Result<String> {
    let mut scene = preset.generate()?;
    if let Some(size) = settings.size {
        scene = fit_to_viewport(scene, size, size);
    }

    let mut options = preset.svg_options(&settings.defaults);
    if settings.no_construction {
        options.include_construction = false;
    }

    log::debug!(
        "'{}': {} nodes, {} paths",
        preset.name,
        scene.root.count_nodes(),
        scene.root.count_paths()
    );

    Ok(to_svg(&scene, &options))
}

/// Output path for a preset named `name` under `dir`.
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.svg", name))
}
