//! Build settings.

use serde::{Deserialize, Serialize};

/// Default path separator in qualified dependency names.
pub const DEFAULT_SEPARATOR: char = '.';

/// Default cap on siblings per enumeration.
pub const DEFAULT_MAX_SIBLINGS: usize = 1024;

/// Default cap on group nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Limits and syntax used while rebuilding a tree.
///
/// The limits guard against an engine whose cursor never reaches the
/// sentinel; they should sit comfortably above anything a real engine holds.
///
/// # TOML Format
///
/// ```toml
/// separator = "."
/// max_siblings = 1024
/// max_depth = 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Joins group keys into qualified paths. Must not appear inside keys.
    pub separator: char,
    /// Maximum records one `first`/`next` run may yield.
    pub max_siblings: usize,
    /// Maximum group nesting below the root.
    pub max_depth: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            max_siblings: DEFAULT_MAX_SIBLINGS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuildConfig {
    /// Sets the path separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the sibling limit.
    pub fn with_max_siblings(mut self, max_siblings: usize) -> Self {
        self.max_siblings = max_siblings;
        self
    }

    /// Sets the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
