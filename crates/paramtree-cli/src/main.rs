//! paramtree CLI - inspect, export and check parameter layouts.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramtree")]
#[command(author, version, about = "Parameter tree inspection tool", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved parameter tree of a layout
    Tree(commands::tree::TreeArgs),

    /// Export the resolved tree as JSON
    Export(commands::export::ExportArgs),

    /// Validate a layout and report unresolved dependents
    Check(commands::check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tree(args) => commands::tree::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Check(args) => commands::check::run(args),
    }
}
