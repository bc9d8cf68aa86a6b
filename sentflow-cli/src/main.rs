//! sentflow command-line entry point

use clap::Parser;
use sentflow_cli::commands::Commands;

/// Streaming sentence segmentation for text-to-speech pipelines
#[derive(Debug, Parser)]
#[command(name = "sentflow", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
