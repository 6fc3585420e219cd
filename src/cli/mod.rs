pub mod build;
pub mod completions;
pub mod init;
pub mod summary;
pub mod validate;

use clap::{ArgAction, Parser, Subcommand};

/// sullivan - Procedural ornament line art
#[derive(Parser, Debug)]
#[command(name = "sullivan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level filter for the verbosity flag.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate SVG from preset files
    Build(build::BuildArgs),

    /// Initialize a sullivan project (generates sullivan.yaml)
    Init(init::InitArgs),

    /// Check presets for clamped or unusable values
    Validate(validate::ValidateArgs),

    /// Print the generated scene tree for a preset
    Summary(summary::SummaryArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
