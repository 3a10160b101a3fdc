//! marginalia command-line entry point

use anyhow::Result;
use clap::Parser;
use marginalia_cli::commands::Commands;

/// Render AI writing feedback as highlighted, segmented text
#[derive(Debug, Parser)]
#[command(name = "marginalia", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::List { subcommand } => {
            subcommand.execute();
            Ok(())
        }
    }
}
