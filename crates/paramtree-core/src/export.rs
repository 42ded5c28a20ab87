//! The consumer-facing tree.
//!
//! [`export`] flattens a resolved [`GroupNode`] hierarchy into the shape UI
//! and automation layers expect. Each group has one ordered child list holding
//! its parameters first, then its subgroups. Parameters carry their
//! dependents as addresses, and the tree keeps an address → position table so
//! consumers never repeat name resolution.
//!
//! A [`ParameterTree`] is immutable once built and can be shared freely
//! across threads.

use std::collections::HashMap;

use serde::Serialize;

use crate::address::Address;
use crate::node::{GroupNode, ParameterNode};
use crate::unit::ParamUnit;

/// Exported parameter leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedParameter {
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
    /// Decoded unit.
    pub unit: ParamUnit,
    /// Engine handle.
    pub address: Address,
    /// Addresses of the nodes this parameter affects.
    pub dependents: Vec<Address>,
}

/// Exported group container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedGroup {
    /// Identifier, unique among siblings.
    pub key: String,
    /// Human-readable label.
    pub name: String,
    /// Engine handle.
    pub address: Address,
    /// Parameters, then subgroups, each in engine order.
    pub children: Vec<ExportedNode>,
}

impl ExportedGroup {
    /// Parameters directly inside this group.
    pub fn parameters(&self) -> impl Iterator<Item = &ExportedParameter> {
        self.children.iter().filter_map(ExportedNode::as_parameter)
    }

    /// Subgroups directly inside this group.
    pub fn groups(&self) -> impl Iterator<Item = &ExportedGroup> {
        self.children.iter().filter_map(ExportedNode::as_group)
    }
}

/// One entry of a group's child list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportedNode {
    /// A parameter leaf.
    Parameter(ExportedParameter),
    /// A nested group.
    Group(ExportedGroup),
}

impl ExportedNode {
    /// Engine handle of this node.
    pub fn address(&self) -> Address {
        match self {
            ExportedNode::Parameter(p) => p.address,
            ExportedNode::Group(g) => g.address,
        }
    }

    /// Key of this node.
    pub fn key(&self) -> &str {
        match self {
            ExportedNode::Parameter(p) => &p.key,
            ExportedNode::Group(g) => &g.key,
        }
    }

    /// Returns the parameter, if this is one.
    pub fn as_parameter(&self) -> Option<&ExportedParameter> {
        match self {
            ExportedNode::Parameter(p) => Some(p),
            ExportedNode::Group(_) => None,
        }
    }

    /// Returns the group, if this is one.
    pub fn as_group(&self) -> Option<&ExportedGroup> {
        match self {
            ExportedNode::Group(g) => Some(g),
            ExportedNode::Parameter(_) => None,
        }
    }
}

/// Finished, resolved parameter tree.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterTree {
    root: ExportedGroup,
    /// Child-index path from the root to every node.
    #[serde(skip)]
    locations: HashMap<Address, Vec<usize>>,
}

impl ParameterTree {
    /// The root container.
    pub fn root(&self) -> &ExportedGroup {
        &self.root
    }

    /// Number of nodes below the root.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the root has no children.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Looks up any node below the root by address.
    pub fn node(&self, address: Address) -> Option<&ExportedNode> {
        let (first, rest) = self.locations.get(&address)?.split_first()?;
        let mut node = self.root.children.get(*first)?;
        for &i in rest {
            node = node.as_group()?.children.get(i)?;
        }
        Some(node)
    }

    /// Looks up a parameter by address.
    pub fn parameter(&self, address: Address) -> Option<&ExportedParameter> {
        self.node(address)?.as_parameter()
    }

    /// Looks up a group by address. [`Address::ROOT`] yields the root.
    pub fn group(&self, address: Address) -> Option<&ExportedGroup> {
        if address == self.root.address {
            return Some(&self.root);
        }
        self.node(address)?.as_group()
    }

    /// Nodes affected by the parameter at `address`, in declaration order.
    pub fn dependents_of(&self, address: Address) -> Vec<&ExportedNode> {
        self.parameter(address)
            .map(|p| p.dependents.iter().filter_map(|&d| self.node(d)).collect())
            .unwrap_or_default()
    }

    /// Every parameter, depth-first, in the same order as the child lists.
    pub fn parameters(&self) -> Vec<&ExportedParameter> {
        fn walk<'a>(group: &'a ExportedGroup, out: &mut Vec<&'a ExportedParameter>) {
            for child in &group.children {
                match child {
                    ExportedNode::Parameter(p) => out.push(p),
                    ExportedNode::Group(g) => walk(g, out),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }
}

/// Builds the consumer tree from a resolved hierarchy.
pub fn export(root: &GroupNode) -> ParameterTree {
    let mut locations = HashMap::new();
    let mut trail = Vec::new();
    let root = export_group(root, &mut trail, &mut locations);
    ParameterTree { root, locations }
}

fn export_group(
    group: &GroupNode,
    trail: &mut Vec<usize>,
    locations: &mut HashMap<Address, Vec<usize>>,
) -> ExportedGroup {
    let mut children = Vec::with_capacity(group.parameters.len() + group.children.len());

    for param in &group.parameters {
        trail.push(children.len());
        locations.insert(param.address, trail.clone());
        trail.pop();
        children.push(ExportedNode::Parameter(export_parameter(param)));
    }

    for child in &group.children {
        trail.push(children.len());
        locations.insert(child.address, trail.clone());
        let exported = export_group(child, trail, locations);
        trail.pop();
        children.push(ExportedNode::Group(exported));
    }

    ExportedGroup {
        key: group.key.clone(),
        name: group.name.clone(),
        address: group.address,
        children,
    }
}

fn export_parameter(param: &ParameterNode) -> ExportedParameter {
    ExportedParameter {
        key: param.key.clone(),
        name: param.name.clone(),
        min: param.min,
        max: param.max,
        default: param.default,
        unit: param.unit,
        address: param.address,
        dependents: param.resolved_dependents.clone(),
    }
}
