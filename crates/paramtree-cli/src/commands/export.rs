//! JSON export command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::common;

#[derive(Args)]
pub struct ExportArgs {
    /// Layout file (TOML)
    #[arg(value_name = "LAYOUT")]
    layout: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let loaded = common::load(&args.layout)?;
    let json = serde_json::to_string_pretty(&loaded.tree)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), nodes = loaded.tree.len(), "tree exported");
        }
        None => println!("{json}"),
    }
    Ok(())
}
