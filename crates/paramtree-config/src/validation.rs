//! Layout validation.
//!
//! Catches everything that would make a layout unusable before it reaches
//! the engine: keys that cannot be named in a dependency path, sibling key
//! clashes, unusable ranges, and sets the packed address space cannot hold.
//! Dependency names are not checked here; unresolved names are reported by
//! the tree build instead.
//!
//! # Example
//!
//! ```rust
//! use paramtree_config::{Layout, ParameterConfig, validate_layout};
//!
//! let layout = Layout::new("ok").with_parameter(ParameterConfig::new("gain", 0.0, 1.0));
//! validate_layout(&layout).expect("layout should be valid");
//! ```

use std::collections::HashSet;

use paramtree_engine::{MAX_CHILDREN, MAX_LEVELS};
use thiserror::Error;

use crate::layout::{GroupConfig, Layout, ParameterConfig};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A parameter or group has an empty key.
    #[error("empty key at '{path}'")]
    EmptyKey {
        /// Path of the enclosing group (empty for the root).
        path: String,
    },

    /// A key contains the path separator.
    #[error("key '{path}' contains the separator '{separator}'")]
    KeyContainsSeparator {
        /// Path of the offending node.
        path: String,
        /// Configured separator.
        separator: char,
    },

    /// Two siblings share a key.
    #[error("duplicate key '{path}'")]
    DuplicateKey {
        /// Path shared by both nodes.
        path: String,
    },

    /// A bound is NaN or infinite.
    #[error("parameter '{path}' has a non-finite range [{min}, {max}]")]
    NonFiniteRange {
        /// Path of the parameter.
        path: String,
        /// Declared lower bound.
        min: f32,
        /// Declared upper bound.
        max: f32,
    },

    /// `min` is greater than `max`.
    #[error("parameter '{path}' has min {min} above max {max}")]
    ReversedRange {
        /// Path of the parameter.
        path: String,
        /// Declared lower bound.
        min: f32,
        /// Declared upper bound.
        max: f32,
    },

    /// The default lies outside the range.
    #[error("parameter '{path}' default {default} out of range [{min}, {max}]")]
    DefaultOutOfRange {
        /// Path of the parameter.
        path: String,
        /// Declared default.
        default: f32,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// A group holds more children than one set can address.
    #[error("group '{path}' has {count} children, limit is {limit}")]
    TooManyChildren {
        /// Path of the group (empty for the root).
        path: String,
        /// Number of children declared.
        count: usize,
        /// Maximum children per set.
        limit: usize,
    },

    /// A group's children lie below the addressable depth.
    #[error("children of group '{path}' are nested deeper than {limit} levels")]
    TooDeep {
        /// Path of the group.
        path: String,
        /// Maximum addressable depth.
        limit: usize,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// The individual errors, with [`ValidationError::Multiple`] flattened.
    pub fn issues(&self) -> Vec<&ValidationError> {
        match self {
            ValidationError::Multiple(errors) => errors.iter().flat_map(|e| e.issues()).collect(),
            other => vec![other],
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a whole layout.
///
/// Every problem is collected; a single one is returned as-is, several as
/// [`ValidationError::Multiple`].
pub fn validate_layout(layout: &Layout) -> ValidationResult<()> {
    let mut walker = Walker {
        separator: layout.build.separator,
        errors: Vec::new(),
    };
    walker.group(&[], &layout.parameters, &layout.groups);

    let mut errors = walker.errors;
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Validate a single parameter's range and default.
pub fn validate_parameter(path: &str, parameter: &ParameterConfig) -> ValidationResult<()> {
    let (min, max) = (parameter.min, parameter.max);
    if !min.is_finite() || !max.is_finite() {
        return Err(ValidationError::NonFiniteRange {
            path: path.to_string(),
            min,
            max,
        });
    }
    if min > max {
        return Err(ValidationError::ReversedRange {
            path: path.to_string(),
            min,
            max,
        });
    }
    let default = parameter.default_value();
    if !(min..=max).contains(&default) {
        return Err(ValidationError::DefaultOutOfRange {
            path: path.to_string(),
            default,
            min,
            max,
        });
    }
    Ok(())
}

struct Walker {
    separator: char,
    errors: Vec<ValidationError>,
}

impl Walker {
    fn join(&self, path: &[&str], key: &str) -> String {
        let mut out = path.join(&self.separator.to_string());
        if !out.is_empty() {
            out.push(self.separator);
        }
        out.push_str(key);
        out
    }

    fn group(&mut self, path: &[&str], parameters: &[ParameterConfig], groups: &[GroupConfig]) {
        let here = path.join(&self.separator.to_string());

        let count = parameters.len() + groups.len();
        if count > MAX_CHILDREN {
            self.errors.push(ValidationError::TooManyChildren {
                path: here.clone(),
                count,
                limit: MAX_CHILDREN,
            });
        }
        if count > 0 && path.len() >= MAX_LEVELS {
            self.errors.push(ValidationError::TooDeep {
                path: here.clone(),
                limit: MAX_LEVELS,
            });
        }

        let mut seen = HashSet::new();
        let keys = parameters
            .iter()
            .map(|p| p.key.as_str())
            .chain(groups.iter().map(|g| g.key.as_str()));
        for key in keys {
            self.key(path, &here, key, &mut seen);
        }

        for parameter in parameters {
            let full = self.join(path, &parameter.key);
            if let Err(e) = validate_parameter(&full, parameter) {
                self.errors.push(e);
            }
        }

        for group in groups {
            let mut nested = path.to_vec();
            nested.push(&group.key);
            self.group(&nested, &group.parameters, &group.groups);
        }
    }

    fn key<'a>(&mut self, path: &[&str], here: &str, key: &'a str, seen: &mut HashSet<&'a str>) {
        if key.is_empty() {
            self.errors.push(ValidationError::EmptyKey {
                path: here.to_string(),
            });
            return;
        }
        if key.contains(self.separator) {
            self.errors.push(ValidationError::KeyContainsSeparator {
                path: self.join(path, key),
                separator: self.separator,
            });
        }
        if !seen.insert(key) {
            self.errors.push(ValidationError::DuplicateKey {
                path: self.join(path, key),
            });
        }
    }
}
