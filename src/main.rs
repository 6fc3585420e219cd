use clap::Parser;
use miette::Result;
use sullivan::cli::{Cli, Commands};
use sullivan::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => {
            sullivan::cli::build::run(args, &printer)?;
        }
        Commands::Init(args) => sullivan::cli::init::run(args, &printer)?,
        Commands::Validate(args) => sullivan::cli::validate::run(args, &printer)?,
        Commands::Summary(args) => sullivan::cli::summary::run(args)?,
        Commands::Completions(args) => sullivan::cli::completions::run(args)?,
    }

    Ok(())
}
