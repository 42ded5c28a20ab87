//! The engine-facing enumeration protocol.
//!
//! An audio engine keeps its parameters in a flat, address-indexed structure
//! and exposes four cursor calls to walk it. Each call takes the cursor by
//! mutable reference, moves it, and returns the record found there. When a
//! level is exhausted the cursor is set to [`Address::SENTINEL`] and no
//! record is returned.
//!
//! ```text
//! cursor = SENTINEL                      // root
//! first_parameter(&mut cursor) -> p0     // cursor = addr(p0)
//! next_parameter(&mut cursor)  -> p1     // cursor = addr(p1)
//! next_parameter(&mut cursor)  -> None   // cursor = SENTINEL
//! ```
//!
//! Group enumeration works the same way; passing a group's address to
//! `first_*` lists that group's direct children.

use crate::address::Address;

/// Group record as delivered by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawGroup {
    /// Identifier, unique among siblings.
    pub key: String,
    /// Human-readable label.
    pub name: String,
}

/// Parameter record as delivered by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawParameter {
    /// Identifier, unique among siblings.
    pub key: String,
    /// Human-readable label.
    pub name: String,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Initial value.
    pub default: f32,
    /// Undecoded unit code.
    pub unit_code: i32,
    /// Names of parameters affected by this one, as written by the engine.
    pub dependents: Vec<String>,
}

/// A cursor-driven parameter provider.
///
/// Implementations must set `*cursor` to [`Address::SENTINEL`] once there is
/// nothing left to return. Anything else (a cursor that never reaches the
/// sentinel, a cursor that moves without yielding a record) is treated as an
/// inconsistent engine and aborts the tree build.
pub trait ParameterSource {
    /// Moves `cursor` to the first child group of the group at `cursor`.
    fn first_group(&self, cursor: &mut Address) -> Option<RawGroup>;

    /// Moves `cursor` to the next sibling group of the group at `cursor`.
    fn next_group(&self, cursor: &mut Address) -> Option<RawGroup>;

    /// Moves `cursor` to the first parameter of the group at `cursor`.
    fn first_parameter(&self, cursor: &mut Address) -> Option<RawParameter>;

    /// Moves `cursor` to the next sibling parameter of the parameter at `cursor`.
    fn next_parameter(&self, cursor: &mut Address) -> Option<RawParameter>;
}
