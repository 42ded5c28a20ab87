//! Engine-side parameter sets.
//!
//! A [`ParamSet`] is the engine's own description of its controls: an ordered
//! list of parameters and nested sets. Children keep the order they were
//! added in, and that order is what the cursor interface reports.

use paramtree_core::{Address, ParamUnit, RawGroup, RawParameter};

use crate::error::EngineError;
use crate::packed::{MAX_CHILDREN, PackedPath};

/// One controllable value as declared by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Identifier, unique among siblings.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Initial value.
    pub default: f32,
    /// Unit of the value.
    pub unit: ParamUnit,
    /// Names of the parameters this one affects.
    pub dependents: Vec<String>,
}

impl ParamSpec {
    /// Generic-unit parameter with no dependents.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            min,
            max,
            default,
            unit: ParamUnit::Generic,
            dependents: Vec::new(),
        }
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Replaces the dependents list.
    pub fn with_dependents<I, T>(mut self, dependents: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.dependents = dependents.into_iter().map(Into::into).collect();
        self
    }

    /// The record handed out through the cursor interface.
    pub fn to_raw(&self) -> RawParameter {
        RawParameter {
            key: self.key.clone(),
            name: self.name.clone(),
            min: self.min,
            max: self.max,
            default: self.default,
            unit_code: self.unit.code(),
            dependents: self.dependents.clone(),
        }
    }
}

/// Child of a [`ParamSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamNode {
    /// A parameter.
    Param(ParamSpec),
    /// A nested set.
    Set(ParamSet),
}

impl ParamNode {
    /// Key of the child.
    pub fn key(&self) -> &str {
        match self {
            ParamNode::Param(p) => &p.key,
            ParamNode::Set(s) => &s.key,
        }
    }
}

impl From<ParamSpec> for ParamNode {
    fn from(spec: ParamSpec) -> Self {
        ParamNode::Param(spec)
    }
}

impl From<ParamSet> for ParamNode {
    fn from(set: ParamSet) -> Self {
        ParamNode::Set(set)
    }
}

/// Ordered container of parameters and nested sets.
///
/// # Example
///
/// ```rust
/// use paramtree_engine::{ParamSet, ParamSpec};
/// use paramtree_core::ParamUnit;
///
/// let mut filter = ParamSet::new("filter", "Filter");
/// filter.add(ParamSpec::new("cutoff", "Cutoff", 20.0, 20000.0, 1000.0).with_unit(ParamUnit::Hertz))?;
///
/// let mut root = ParamSet::new("root", "Root");
/// root.add(filter)?;
/// assert_eq!(root.len(), 1);
/// # Ok::<(), paramtree_engine::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet {
    /// Identifier, unique among siblings.
    pub key: String,
    /// Display name.
    pub name: String,
    children: Vec<ParamNode>,
}

impl ParamSet {
    /// Creates an empty set.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child.
    ///
    /// Fails once the set holds [`MAX_CHILDREN`] children.
    pub fn add(&mut self, child: impl Into<ParamNode>) -> Result<(), EngineError> {
        if self.children.len() == MAX_CHILDREN {
            return Err(EngineError::SetFull {
                set: self.key.clone(),
                limit: MAX_CHILDREN,
            });
        }
        self.children.push(child.into());
        Ok(())
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[ParamNode] {
        &self.children
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the set has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The record handed out through the cursor interface.
    pub fn to_raw(&self) -> RawGroup {
        RawGroup {
            key: self.key.clone(),
            name: self.name.clone(),
        }
    }

    /// Parameter at `address`, if that address names one.
    pub fn parameter(&self, address: Address) -> Option<&ParamSpec> {
        let path = PackedPath::decode(address)?;
        match self.node(path.indices())? {
            ParamNode::Param(p) => Some(p),
            ParamNode::Set(_) => None,
        }
    }

    /// Set at `address`. [`Address::ROOT`] is this set.
    pub fn set_at(&self, address: Address) -> Option<&ParamSet> {
        self.set_at_path(PackedPath::decode(address)?)
    }

    pub(crate) fn set_at_path(&self, path: PackedPath) -> Option<&ParamSet> {
        if path.depth() == 0 {
            return Some(self);
        }
        match self.node(path.indices())? {
            ParamNode::Set(s) => Some(s),
            ParamNode::Param(_) => None,
        }
    }

    fn node(&self, indices: &[u8]) -> Option<&ParamNode> {
        let (&first, rest) = indices.split_first()?;
        let mut node = self.children.get(usize::from(first))?;
        for &i in rest {
            let ParamNode::Set(set) = node else {
                return None;
            };
            node = set.children.get(usize::from(i))?;
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ParamSet {
        let mut set = ParamSet::new("filter", "Filter");
        set.add(ParamSpec::new("cutoff", "Cutoff", 20.0, 20000.0, 1000.0).with_unit(ParamUnit::Hertz))
            .unwrap();
        set.add(ParamSpec::new("q", "Resonance", 0.1, 10.0, 0.7).with_dependents(["cutoff"]))
            .unwrap();
        set
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut root = ParamSet::new("root", "Root");
        root.add(filter()).unwrap();
        root.add(ParamSpec::new("mix", "Mix", 0.0, 100.0, 50.0)).unwrap();
        let keys: Vec<&str> = root.children().iter().map(ParamNode::key).collect();
        assert_eq!(keys, ["filter", "mix"]);
    }

    #[test]
    fn full_set_rejects_more_children() {
        let mut set = ParamSet::new("big", "Big");
        for i in 0..MAX_CHILDREN {
            set.add(ParamSpec::new(format!("p{i}"), "", 0.0, 1.0, 0.0)).unwrap();
        }
        let err = set.add(ParamSpec::new("one_more", "", 0.0, 1.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            EngineError::SetFull {
                set: "big".to_string(),
                limit: MAX_CHILDREN,
            }
        );
        assert_eq!(set.len(), MAX_CHILDREN);
    }

    #[test]
    fn lookup_by_address() {
        let mut root = ParamSet::new("root", "Root");
        root.add(ParamSpec::new("mix", "Mix", 0.0, 100.0, 50.0)).unwrap();
        root.add(filter()).unwrap();

        assert_eq!(root.parameter(Address(0x00ff_ffff_ffff_ffff)).unwrap().key, "mix");
        assert_eq!(root.set_at(Address(0x01ff_ffff_ffff_ffff)).unwrap().key, "filter");
        assert_eq!(root.parameter(Address(0x0101_ffff_ffff_ffff)).unwrap().key, "q");
        assert_eq!(root.set_at(Address::ROOT).unwrap().key, "root");

        assert!(root.parameter(Address(0x01ff_ffff_ffff_ffff)).is_none(), "a set");
        assert!(root.set_at(Address(0x00ff_ffff_ffff_ffff)).is_none(), "a parameter");
        assert!(root.parameter(Address(0x0002_ffff_ffff_ffff)).is_none(), "below a parameter");
        assert!(root.parameter(Address(0x05ff_ffff_ffff_ffff)).is_none(), "out of range");
    }

    #[test]
    fn raw_records_carry_unit_codes() {
        let set = filter();
        let ParamNode::Param(cutoff) = &set.children()[0] else {
            panic!("expected a parameter");
        };
        let raw = cutoff.to_raw();
        assert_eq!(raw.unit_code, ParamUnit::Hertz.code());
        assert_eq!(raw.key, "cutoff");
        assert_eq!(set.to_raw().name, "Filter");
    }
}
