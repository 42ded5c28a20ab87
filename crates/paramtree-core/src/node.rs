//! Typed tree nodes.
//!
//! A [`GroupNode`] owns its parameters and subgroups by value. Dependency
//! links between parameters are plain [`Address`] values, never references,
//! so the "affects" relation may be cyclic without the ownership graph being
//! anything but a tree.

use crate::address::Address;
use crate::unit::ParamUnit;

/// Key of the synthetic root group.
pub const ROOT_KEY: &str = "root";

/// Display name of the synthetic root group.
pub const ROOT_NAME: &str = "Root";

/// A controllable parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    /// Identifier, unique among siblings.
    pub key: String,
    /// Human-readable label.
    pub name: String,
    /// Lower bound (finite, `<= max`).
    pub min: f32,
    /// Upper bound (finite, `>= min`).
    pub max: f32,
    /// Initial value, inside `min..=max`.
    pub default: f32,
    /// Decoded unit.
    pub unit: ParamUnit,
    /// Engine handle.
    pub address: Address,
    /// Dependency names exactly as the engine wrote them.
    pub raw_dependents: Vec<String>,
    /// Addresses of the parameters this one affects. Empty until resolved.
    pub resolved_dependents: Vec<Address>,
}

impl ParameterNode {
    /// Returns `(min, max)`.
    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

/// A named container of parameters and nested groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    /// Identifier, unique among siblings.
    pub key: String,
    /// Human-readable label.
    pub name: String,
    /// Engine handle.
    pub address: Address,
    /// Directly owned parameters, in engine order.
    pub parameters: Vec<ParameterNode>,
    /// Directly owned subgroups, in engine order.
    pub children: Vec<GroupNode>,
}

impl GroupNode {
    /// Creates an empty group.
    pub fn new(key: impl Into<String>, name: impl Into<String>, address: Address) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            address,
            parameters: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates the synthetic root group.
    pub fn root() -> Self {
        Self::new(ROOT_KEY, ROOT_NAME, Address::ROOT)
    }

    /// Number of nodes below this group (parameters and groups, excluding itself).
    pub fn descendant_count(&self) -> usize {
        self.parameters.len()
            + self
                .children
                .iter()
                .map(|c| 1 + c.descendant_count())
                .sum::<usize>()
    }

    /// Calls `f` for every parameter in depth-first order, parameters before subgroups.
    pub fn for_each_parameter<'a>(&'a self, f: &mut impl FnMut(&'a ParameterNode)) {
        self.parameters.iter().for_each(&mut *f);
        for child in &self.children {
            child.for_each_parameter(f);
        }
    }
}
