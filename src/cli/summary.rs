//! Summary command implementation.
//!
//! Prints the generated scene tree for one preset to stdout.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::plural;
use crate::preset::Preset;

/// Print the generated scene tree for a preset
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Preset file
    pub path: PathBuf,
}

pub fn run(args: SummaryArgs) -> Result<()> {
    let preset = Preset::load(&args.path)?;
    print!("{}", summarize(&preset)?);
    Ok(())
}

/// Header line with counts and bounds, then the indented tree.
pub fn summarize(preset: &Preset) -> Result<String> {
    let scene = preset.generate()?;
    let b = scene.bounds;

    Ok(format!(
        "{} ({}): {}, {}, bounds {} {} {} {}\n{}",
        preset.name,
        preset.generator.kind(),
        plural(scene.root.count_nodes(), "node", "nodes"),
        plural(scene.root.count_paths(), "path", "paths"),
        b.x,
        b.y,
        b.width,
        b.height,
        scene.root.summary()
    ))
}
