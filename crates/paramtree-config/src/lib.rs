//! Layout files for paramtree.
//!
//! A layout is a TOML description of an engine's parameter set: nested
//! groups, parameter ranges and units, dependency names, and the settings
//! used to rebuild the tree. Layouts stand in for a live engine when
//! inspecting or testing a parameter hierarchy.
//!
//! # Example
//!
//! ```rust,no_run
//! use paramtree_config::{Layout, validate_layout};
//! use paramtree_core::load_tree;
//!
//! let layout = Layout::load("synth.toml").unwrap();
//! validate_layout(&layout).expect("layout should be valid");
//!
//! let set = layout.to_param_set().unwrap();
//! let tree = load_tree(&set, &layout.build).unwrap();
//! println!("{} nodes", tree.len());
//! ```

mod error;
mod layout;

/// Layout validation.
pub mod validation;

pub use error::ConfigError;
pub use layout::{GroupConfig, Layout, ParameterConfig};
pub use validation::{ValidationError, ValidationResult, validate_layout, validate_parameter};
