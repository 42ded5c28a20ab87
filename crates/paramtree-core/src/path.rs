//! Fully-qualified paths and the path → address index.
//!
//! A node's path is the keys of its enclosing groups (root excluded) followed
//! by its own key, joined with the configured separator: `filter.env.attack`.
//! The index is built during the structural pass and consulted only by the
//! resolver; it never outlives [`load_tree`](crate::load_tree).

use std::collections::HashMap;

use crate::address::Address;

/// Joins a group path and a key into a qualified path.
pub fn join_path(group_path: &[String], key: &str, separator: char) -> String {
    let mut out = String::with_capacity(
        group_path.iter().map(|k| k.len() + 1).sum::<usize>() + key.len(),
    );
    for segment in group_path {
        out.push_str(segment);
        out.push(separator);
    }
    out.push_str(key);
    out
}

/// Returns `true` if `key` can appear unambiguously inside a path.
pub fn is_indexable_key(key: &str, separator: char) -> bool {
    !key.is_empty() && !key.contains(separator)
}

/// Flat map from qualified path to node address.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    separator: char,
    entries: HashMap<String, Address>,
}

impl PathIndex {
    /// Creates an empty index using `separator`.
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            entries: HashMap::new(),
        }
    }

    /// Separator the paths were joined with.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Records `path`. The first node registered under a path keeps it.
    ///
    /// Returns `false` if the path was already taken.
    pub fn insert(&mut self, path: String, address: Address) -> bool {
        if let Some(existing) = self.entries.get(&path) {
            tracing::warn!(%path, kept = %existing, dropped = %address, "duplicate path");
            return false;
        }
        self.entries.insert(path, address);
        true
    }

    /// Looks up a qualified path.
    pub fn get(&self, path: &str) -> Option<Address> {
        self.entries.get(path).copied()
    }

    /// Number of indexed paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
