//! Node addresses handed out by the engine's enumeration cursor.

use serde::{Deserialize, Serialize};

/// Stable numeric handle of a group or parameter.
///
/// Addresses are produced by the [`ParameterSource`](crate::ParameterSource)
/// cursor: the cursor value after a successful `first_*`/`next_*` call *is*
/// the address of the record just returned. The UI and automation layers use
/// it to push value changes back to the engine.
///
/// One value, [`Address::SENTINEL`], is reserved. It signals an exhausted
/// enumeration and doubles as the handle of the synthetic root group, since
/// that is the cursor value the engine expects when asked for top-level items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub u64);

impl Address {
    /// "No further element" / "not found".
    pub const SENTINEL: Self = Self(u64::MAX);

    /// Handle of the synthetic root group.
    pub const ROOT: Self = Self::SENTINEL;

    /// Returns the raw numeric value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the reserved sentinel.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::SENTINEL
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_sentinel() {
            write!(f, "<sentinel>")
        } else {
            write!(f, "{:#018x}", self.0)
        }
    }
}

impl From<u64> for Address {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
