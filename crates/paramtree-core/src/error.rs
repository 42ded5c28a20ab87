//! Error types for tree construction.

use thiserror::Error;

use crate::address::Address;

/// Which of the two per-group enumerations an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Child groups (`first_group`/`next_group`).
    Groups,
    /// Parameters (`first_parameter`/`next_parameter`).
    Parameters,
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Level::Groups => write!(f, "group"),
            Level::Parameters => write!(f, "parameter"),
        }
    }
}

/// Fatal inconsistencies in the engine's data.
///
/// Any of these aborts the build; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The cursor did not reach the sentinel within the sibling limit.
    #[error("{level} enumeration under {group} did not terminate within {limit} steps")]
    NonTerminating {
        /// Enumeration that failed to terminate.
        level: Level,
        /// Group being enumerated.
        group: Address,
        /// Configured sibling limit.
        limit: usize,
    },

    /// The cursor moved to a real address but no record came with it.
    #[error("{level} cursor moved to {address} without returning a record")]
    MissingRecord {
        /// Enumeration that produced the empty slot.
        level: Level,
        /// Address the cursor was left at.
        address: Address,
    },

    /// Two nodes were handed the same address.
    #[error("address {address} assigned to both '{first}' and '{second}'")]
    DuplicateAddress {
        /// The reused address.
        address: Address,
        /// Path of the node that received it first.
        first: String,
        /// Path of the node that received it again.
        second: String,
    },

    /// Groups are nested deeper than the configured limit.
    #[error("group '{path}' exceeds the nesting limit of {limit}")]
    TooDeep {
        /// Path of the offending group.
        path: String,
        /// Configured depth limit.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_terminating_display() {
        let err = BuildError::NonTerminating {
            level: Level::Parameters,
            group: Address::ROOT,
            limit: 16,
        };
        assert_eq!(
            err.to_string(),
            "parameter enumeration under <sentinel> did not terminate within 16 steps"
        );
    }

    #[test]
    fn duplicate_address_display() {
        let err = BuildError::DuplicateAddress {
            address: Address(1),
            first: "filter.cutoff".to_string(),
            second: "filter.q".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("filter.cutoff"), "got: {msg}");
        assert!(msg.contains("filter.q"), "got: {msg}");
    }

    #[test]
    fn too_deep_display() {
        let err = BuildError::TooDeep {
            path: "a.b.c".to_string(),
            limit: 2,
        };
        assert_eq!(err.to_string(), "group 'a.b.c' exceeds the nesting limit of 2");
    }
}
