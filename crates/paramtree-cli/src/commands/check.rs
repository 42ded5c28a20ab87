//! Layout checking command.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use paramtree_config::{Layout, validate_layout};

use super::common;

#[derive(Args)]
pub struct CheckArgs {
    /// Layout file (TOML)
    #[arg(value_name = "LAYOUT")]
    layout: PathBuf,

    /// Treat unresolved dependents as errors
    #[arg(long)]
    strict: bool,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let layout = Layout::load(&args.layout)
        .with_context(|| format!("loading layout {}", args.layout.display()))?;

    if let Err(e) = validate_layout(&layout) {
        let issues = e.issues();
        for issue in &issues {
            println!("error: {issue}");
        }
        bail!("{} validation error(s) in {}", issues.len(), args.layout.display());
    }

    let loaded = common::build(layout)?;
    for dropped in &loaded.report.unresolved {
        println!(
            "warning: '{}' names unknown dependent '{}'",
            dropped.path, dropped.name
        );
    }

    if args.strict && !loaded.report.is_complete() {
        bail!(
            "{} unresolved dependent(s) in {}",
            loaded.report.unresolved.len(),
            args.layout.display()
        );
    }

    println!(
        "ok: {} parameters, {} nodes",
        loaded.tree.parameters().len(),
        loaded.tree.len()
    );
    Ok(())
}
