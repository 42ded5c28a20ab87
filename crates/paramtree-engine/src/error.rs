//! Error types for building parameter sets.

use thiserror::Error;

/// Errors raised while assembling a [`ParamSet`](crate::ParamSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The set has no free child index left.
    #[error("parameter set '{set}' is full ({limit} children)")]
    SetFull {
        /// Key of the full set.
        set: String,
        /// Maximum number of children.
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_full_display() {
        let err = EngineError::SetFull {
            set: "filter".to_string(),
            limit: 254,
        };
        assert_eq!(err.to_string(), "parameter set 'filter' is full (254 children)");
    }
}
