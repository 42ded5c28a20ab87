//! Link pass: turn dependency names into addresses.
//!
//! Each raw dependency name is qualified against the declaring parameter's
//! group path and looked up in the [`PathIndex`]:
//!
//! | Name form | Candidates tried, in order |
//! |-----------|----------------------------|
//! | `q` | `<group>.q` (sibling) |
//! | `eq.gain` | `<group>.eq.gain`, then `eq.gain` from the root |
//! | `.eq.gain` | `eq.gain` from the root only |
//!
//! The first candidate present in the index wins. Names that match nothing
//! are dropped; the rest of the tree is unaffected. Cycles are allowed.

use crate::address::Address;
use crate::node::GroupNode;
use crate::path::{PathIndex, join_path};

/// A dependency name that matched no node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedDependent {
    /// Parameter declaring the dependency.
    pub parameter: Address,
    /// Qualified path of that parameter.
    pub path: String,
    /// Name as the engine wrote it.
    pub name: String,
}

/// Outcome of a link pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Number of names linked to an address.
    pub resolved: usize,
    /// Names that were dropped.
    pub unresolved: Vec<UnresolvedDependent>,
}

impl ResolveReport {
    /// Returns `true` if every name was linked.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Qualified paths to try for `name` declared inside `group_path`.
pub fn candidates(group_path: &[String], name: &str, separator: char) -> Vec<String> {
    if let Some(anchored) = name.strip_prefix(separator) {
        return vec![anchored.to_string()];
    }

    let relative = join_path(group_path, name, separator);
    if name.contains(separator) && !group_path.is_empty() {
        vec![relative, name.to_string()]
    } else {
        vec![relative]
    }
}

/// Fills `resolved_dependents` on every parameter under `root`.
///
/// Previously resolved addresses are replaced, so running the pass twice
/// gives the same tree.
pub fn resolve(root: &mut GroupNode, index: &PathIndex) -> ResolveReport {
    let mut report = ResolveReport::default();
    let mut path = Vec::new();
    resolve_group(root, &mut path, index, &mut report);

    tracing::debug!(
        resolved = report.resolved,
        dropped = report.unresolved.len(),
        "dependency pass complete"
    );
    report
}

fn resolve_group(
    group: &mut GroupNode,
    path: &mut Vec<String>,
    index: &PathIndex,
    report: &mut ResolveReport,
) {
    let separator = index.separator();

    for param in &mut group.parameters {
        param.resolved_dependents.clear();
        for name in &param.raw_dependents {
            let found = candidates(path, name, separator)
                .iter()
                .find_map(|candidate| index.get(candidate));

            if let Some(address) = found {
                param.resolved_dependents.push(address);
                report.resolved += 1;
            } else {
                let declared = join_path(path, &param.key, separator);
                tracing::debug!(
                    parameter = %declared,
                    dependent = %name,
                    "dependent not found, dropped"
                );
                report.unresolved.push(UnresolvedDependent {
                    parameter: param.address,
                    path: declared,
                    name: name.clone(),
                });
            }
        }
    }

    for child in &mut group.children {
        path.push(child.key.clone());
        resolve_group(child, path, index, report);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| (*k).to_string()).collect()
    }

    #[test]
    fn unqualified_is_sibling_only() {
        assert_eq!(candidates(&path(&["a"]), "p2", '.'), ["a.p2"]);
        assert_eq!(candidates(&[], "p2", '.'), ["p2"]);
    }

    #[test]
    fn qualified_tries_relative_then_root() {
        assert_eq!(candidates(&path(&["a"]), "b.q", '.'), ["a.b.q", "b.q"]);
    }

    #[test]
    fn qualified_at_root_has_one_candidate() {
        assert_eq!(candidates(&[], "b.q", '.'), ["b.q"]);
    }

    #[test]
    fn leading_separator_anchors_at_root() {
        assert_eq!(candidates(&path(&["a", "x"]), ".b.q", '.'), ["b.q"]);
    }

    #[test]
    fn custom_separator() {
        assert_eq!(candidates(&path(&["a"]), "b/q", '/'), ["a/b/q", "b/q"]);
        assert_eq!(candidates(&path(&["a"]), "b.q", '/'), ["a/b.q"]);
    }
}
