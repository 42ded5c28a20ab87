//! Tree printing command.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use paramtree_core::{Address, ExportedGroup, ExportedNode, ExportedParameter};

use super::common;

#[derive(Args)]
pub struct TreeArgs {
    /// Layout file (TOML)
    #[arg(value_name = "LAYOUT")]
    layout: PathBuf,

    /// Hide node addresses
    #[arg(long)]
    no_addresses: bool,
}

pub fn run(args: TreeArgs) -> anyhow::Result<()> {
    let loaded = common::load(&args.layout)?;
    let paths = common::paths(&loaded.tree, loaded.layout.build.separator);

    println!("{}", loaded.layout.name);
    if let Some(description) = &loaded.layout.description {
        println!("{description}");
    }
    println!("{}", "=".repeat(loaded.layout.name.chars().count()));

    let printer = Printer {
        paths: &paths,
        addresses: !args.no_addresses,
    };
    printer.group(loaded.tree.root(), 0);

    println!();
    println!(
        "{} parameters, {} dependents resolved, {} dropped",
        loaded.tree.parameters().len(),
        loaded.report.resolved,
        loaded.report.unresolved.len()
    );
    Ok(())
}

struct Printer<'a> {
    paths: &'a HashMap<Address, String>,
    addresses: bool,
}

impl Printer<'_> {
    fn group(&self, group: &ExportedGroup, depth: usize) {
        for child in &group.children {
            match child {
                ExportedNode::Parameter(p) => self.parameter(p, depth),
                ExportedNode::Group(g) => {
                    println!("{}{}/  {}{}", indent(depth), g.key, g.name, self.address(g.address));
                    self.group(g, depth + 1);
                }
            }
        }
    }

    fn parameter(&self, p: &ExportedParameter, depth: usize) {
        let suffix = p.unit.suffix();
        let unit = if suffix.is_empty() {
            String::new()
        } else {
            format!(" {suffix}")
        };
        println!(
            "{}{:16} {:20} [{}, {}]{} default {}{}",
            indent(depth),
            p.key,
            p.name,
            p.min,
            p.max,
            unit,
            p.default,
            self.address(p.address)
        );

        if !p.dependents.is_empty() {
            let targets: Vec<&str> = p
                .dependents
                .iter()
                .map(|a| self.paths.get(a).map_or("?", String::as_str))
                .collect();
            println!("{}  -> {}", indent(depth), targets.join(", "));
        }
    }

    fn address(&self, address: Address) -> String {
        if self.addresses {
            format!("  @{address}")
        } else {
            String::new()
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth + 1)
}
