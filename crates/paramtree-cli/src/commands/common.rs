//! Shared helpers for CLI commands.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use paramtree_config::{Layout, validate_layout};
use paramtree_core::{
    Address, ExportedGroup, ExportedNode, ParameterTree, ResolveReport, load_tree_with_report,
};

/// A layout together with the tree it produces.
pub struct Loaded {
    pub layout: Layout,
    pub tree: ParameterTree,
    pub report: ResolveReport,
}

/// Loads `path` and builds its tree.
///
/// Validation problems are logged, not fatal; use `check` to enforce them.
pub fn load(path: &Path) -> anyhow::Result<Loaded> {
    let layout =
        Layout::load(path).with_context(|| format!("loading layout {}", path.display()))?;

    if let Err(e) = validate_layout(&layout) {
        for issue in e.issues() {
            tracing::warn!(%issue, "layout problem");
        }
    }

    build(layout)
}

/// Builds the tree for an already loaded layout.
pub fn build(layout: Layout) -> anyhow::Result<Loaded> {
    let set = layout
        .to_param_set()
        .with_context(|| format!("realizing layout '{}'", layout.name))?;
    let (tree, report) = load_tree_with_report(&set, &layout.build)
        .with_context(|| format!("building tree for '{}'", layout.name))?;

    tracing::debug!(nodes = tree.len(), "tree built");
    Ok(Loaded {
        layout,
        tree,
        report,
    })
}

/// Qualified path of every node, keyed by address.
pub fn paths(tree: &ParameterTree, separator: char) -> HashMap<Address, String> {
    fn walk(group: &ExportedGroup, prefix: &str, separator: char, out: &mut HashMap<Address, String>) {
        for child in &group.children {
            let path = if prefix.is_empty() {
                child.key().to_string()
            } else {
                format!("{prefix}{separator}{}", child.key())
            };
            if let ExportedNode::Group(g) = child {
                walk(g, &path, separator, out);
            }
            out.insert(child.address(), path);
        }
    }

    let mut out = HashMap::new();
    walk(tree.root(), "", separator, &mut out);
    out
}
