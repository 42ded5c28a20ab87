//! Layout file format and operations.

use std::path::Path;

use paramtree_core::{BuildConfig, ParamUnit};
use paramtree_engine::{ParamSet, ParamSpec};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A parameter declared in a layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterConfig {
    /// Identifier, unique among siblings.
    pub key: String,

    /// Display name (defaults to the key).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Lower bound.
    pub min: f32,

    /// Upper bound.
    pub max: f32,

    /// Initial value (defaults to `min`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f32>,

    /// Unit, by snake_case name (`"hertz"`, `"decibels"`, ...).
    #[serde(default)]
    pub unit: ParamUnit,

    /// Names of affected parameters, relative to the enclosing group or
    /// prefixed with the separator to start at the root.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependents: Vec<String>,
}

impl ParameterConfig {
    /// Creates a generic parameter spanning `min..=max`.
    pub fn new(key: impl Into<String>, min: f32, max: f32) -> Self {
        Self {
            key: key.into(),
            name: String::new(),
            min,
            max,
            default: None,
            unit: ParamUnit::Generic,
            dependents: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the initial value.
    pub fn with_default(mut self, default: f32) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Adds a dependent name.
    pub fn with_dependent(mut self, name: impl Into<String>) -> Self {
        self.dependents.push(name.into());
        self
    }

    /// Initial value, falling back to `min`.
    pub fn default_value(&self) -> f32 {
        self.default.unwrap_or(self.min)
    }

    /// Display name, falling back to the key.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.key } else { &self.name }
    }

    fn to_spec(&self) -> ParamSpec {
        ParamSpec::new(
            self.key.clone(),
            self.display_name(),
            self.min,
            self.max,
            self.default_value(),
        )
        .with_unit(self.unit)
        .with_dependents(self.dependents.iter().cloned())
    }
}

/// A group declared in a layout. Groups nest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GroupConfig {
    /// Identifier, unique among siblings.
    pub key: String,

    /// Display name (defaults to the key).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Parameters of this group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterConfig>,

    /// Nested groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupConfig>,
}

impl GroupConfig {
    /// Creates an empty group.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a parameter.
    pub fn with_parameter(mut self, parameter: ParameterConfig) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds a nested group.
    pub fn with_group(mut self, group: GroupConfig) -> Self {
        self.groups.push(group);
        self
    }

    /// Display name, falling back to the key.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.key } else { &self.name }
    }

    /// Direct children (parameters and groups).
    pub fn len(&self) -> usize {
        self.parameters.len() + self.groups.len()
    }

    /// Returns `true` if the group has no children.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.groups.is_empty()
    }

    fn fill(&self, set: &mut ParamSet) -> Result<(), ConfigError> {
        fill_set(set, &self.parameters, &self.groups)
    }
}

fn fill_set(
    set: &mut ParamSet,
    parameters: &[ParameterConfig],
    groups: &[GroupConfig],
) -> Result<(), ConfigError> {
    for parameter in parameters {
        set.add(parameter.to_spec())?;
    }
    for group in groups {
        let mut child = ParamSet::new(group.key.clone(), group.display_name());
        group.fill(&mut child)?;
        set.add(child)?;
    }
    Ok(())
}

/// Layout file describing an engine's parameter set.
///
/// Layouts are stored as TOML. Parameters at the top level belong to the
/// root; `[[groups]]` tables nest to any depth the engine can address.
///
/// # TOML Format
///
/// ```toml
/// name = "Mono Synth"
/// description = "One oscillator into a filter"
///
/// [build]
/// separator = "."
///
/// [[parameters]]
/// key = "volume"
/// min = -60.0
/// max = 6.0
/// default = 0.0
/// unit = "decibels"
///
/// [[groups]]
/// key = "filter"
/// name = "Filter"
///
/// [[groups.parameters]]
/// key = "cutoff"
/// min = 20.0
/// max = 20000.0
/// default = 1000.0
/// unit = "hertz"
/// dependents = ["q"]
///
/// [[groups.parameters]]
/// key = "q"
/// min = 0.1
/// max = 10.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    /// Name of the layout.
    pub name: String,

    /// Optional description of the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Settings for rebuilding the tree.
    #[serde(default)]
    pub build: BuildConfig,

    /// Top-level parameters.
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,

    /// Top-level groups.
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl Layout {
    /// Create a new empty layout.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            build: BuildConfig::default(),
            parameters: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Create a layout with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the build settings.
    pub fn with_build(mut self, build: BuildConfig) -> Self {
        self.build = build;
        self
    }

    /// Add a top-level parameter.
    pub fn with_parameter(mut self, parameter: ParameterConfig) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a top-level group.
    pub fn with_group(mut self, group: GroupConfig) -> Self {
        self.groups.push(group);
        self
    }

    /// Load a layout from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let layout = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %layout.name, "layout loaded");
        Ok(layout)
    }

    /// Load a layout from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the layout to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the layout to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Total number of parameters at every level.
    pub fn parameter_count(&self) -> usize {
        fn count(group: &GroupConfig) -> usize {
            group.parameters.len() + group.groups.iter().map(count).sum::<usize>()
        }
        self.parameters.len() + self.groups.iter().map(count).sum::<usize>()
    }

    /// Builds the engine parameter set this layout describes.
    ///
    /// Within each set, parameters come before groups, both in file order.
    pub fn to_param_set(&self) -> Result<ParamSet, ConfigError> {
        let mut root = ParamSet::new("root", self.name.clone());
        fill_set(&mut root, &self.parameters, &self.groups)?;
        Ok(root)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramtree_core::Address;
    use paramtree_engine::ParamNode;

    const SYNTH: &str = r#"
name = "Mono Synth"

[[parameters]]
key = "volume"
min = -60.0
max = 6.0
unit = "decibels"

[[groups]]
key = "filter"
name = "Filter"

[[groups.parameters]]
key = "cutoff"
min = 20.0
max = 20000.0
default = 1000.0
unit = "hertz"
dependents = ["q"]

[[groups.parameters]]
key = "q"
min = 0.1
max = 10.0

[[groups.groups]]
key = "env"

[[groups.groups.parameters]]
key = "attack"
min = 0.0
max = 500.0
unit = "milliseconds"
"#;

    #[test]
    fn parses_nested_groups() {
        let layout = Layout::from_toml(SYNTH).unwrap();
        assert_eq!(layout.name, "Mono Synth");
        assert!(layout.description.is_none());
        assert_eq!(layout.build, BuildConfig::default());
        assert_eq!(layout.parameters.len(), 1);
        assert_eq!(layout.groups[0].groups[0].parameters[0].key, "attack");
        assert_eq!(layout.parameter_count(), 4);
    }

    #[test]
    fn optional_fields_have_defaults() {
        let layout = Layout::from_toml(SYNTH).unwrap();
        let volume = &layout.parameters[0];
        assert_eq!(volume.default_value(), -60.0);
        assert_eq!(volume.display_name(), "volume");
        assert!(volume.dependents.is_empty());

        let q = &layout.groups[0].parameters[1];
        assert_eq!(q.unit, ParamUnit::Generic);
        assert_eq!(layout.groups[0].groups[0].display_name(), "env");
    }

    #[test]
    fn build_table_is_read() {
        let layout = Layout::from_toml(
            r#"
name = "x"
[build]
separator = "/"
max_depth = 4
"#,
        )
        .unwrap();
        assert_eq!(layout.build.separator, '/');
        assert_eq!(layout.build.max_depth, 4);
        assert_eq!(layout.build.max_siblings, BuildConfig::default().max_siblings);
    }

    #[test]
    fn unknown_unit_name_is_a_parse_error() {
        let err = Layout::from_toml(
            r#"
name = "x"
[[parameters]]
key = "p"
min = 0.0
max = 1.0
unit = "furlongs"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn toml_round_trip() {
        let layout = Layout::from_toml(SYNTH).unwrap().with_description("test");
        let text = layout.to_toml().unwrap();
        assert_eq!(Layout::from_toml(&text).unwrap(), layout);
    }

    #[test]
    fn builder_matches_parsed_layout() {
        let built = Layout::new("Mono Synth")
            .with_parameter(ParameterConfig::new("volume", -60.0, 6.0).with_unit(ParamUnit::Decibels))
            .with_group(
                GroupConfig::new("filter")
                    .with_name("Filter")
                    .with_parameter(
                        ParameterConfig::new("cutoff", 20.0, 20000.0)
                            .with_default(1000.0)
                            .with_unit(ParamUnit::Hertz)
                            .with_dependent("q"),
                    )
                    .with_parameter(ParameterConfig::new("q", 0.1, 10.0))
                    .with_group(GroupConfig::new("env").with_parameter(
                        ParameterConfig::new("attack", 0.0, 500.0).with_unit(ParamUnit::Milliseconds),
                    )),
            );
        assert_eq!(built, Layout::from_toml(SYNTH).unwrap());
    }

    #[test]
    fn param_set_mirrors_layout() {
        let set = Layout::from_toml(SYNTH).unwrap().to_param_set().unwrap();
        let keys: Vec<&str> = set.children().iter().map(ParamNode::key).collect();
        assert_eq!(keys, ["volume", "filter"]);

        let filter = set.set_at(Address(0x01ff_ffff_ffff_ffff)).unwrap();
        assert_eq!(filter.name, "Filter");
        let cutoff = set.parameter(Address(0x0100_ffff_ffff_ffff)).unwrap();
        assert_eq!(cutoff.default, 1000.0);
        assert_eq!(cutoff.unit, ParamUnit::Hertz);
        assert_eq!(cutoff.dependents, ["q"]);
        assert_eq!(set.parameter(Address(0x0102_00ff_ffff_ffff)).unwrap().key, "attack");
    }

    #[test]
    fn oversized_group_is_an_engine_error() {
        let mut group = GroupConfig::new("big");
        for i in 0..=paramtree_engine::MAX_CHILDREN {
            group.parameters.push(ParameterConfig::new(format!("p{i}"), 0.0, 1.0));
        }
        let err = Layout::new("x").with_group(group).to_param_set().unwrap_err();
        assert!(matches!(err, ConfigError::Engine(_)));
    }
}
