//! Engine-side parameter sets for paramtree.
//!
//! A [`ParamSet`] is how an engine declares its controls: nested sets of
//! [`ParamSpec`]s in a fixed order. It implements
//! [`ParameterSource`](paramtree_core::ParameterSource) with packed 64-bit
//! addresses (see [`packed`]), so it can be handed straight to
//! [`paramtree_core::load_tree`].
//!
//! ```rust
//! use paramtree_core::{BuildConfig, ParamUnit, load_tree};
//! use paramtree_engine::{ParamSet, ParamSpec};
//!
//! let mut env = ParamSet::new("env", "Envelope");
//! env.add(ParamSpec::new("attack", "Attack", 0.1, 500.0, 10.0).with_unit(ParamUnit::Milliseconds))?;
//! env.add(ParamSpec::new("release", "Release", 1.0, 5000.0, 200.0).with_unit(ParamUnit::Milliseconds))?;
//!
//! let mut root = ParamSet::new("root", "Root");
//! root.add(ParamSpec::new("mode", "Mode", 0.0, 3.0, 0.0).with_dependents(["env.attack"]))?;
//! root.add(env)?;
//!
//! let tree = load_tree(&root, &BuildConfig::default()).unwrap();
//! let mode = &tree.parameters()[0];
//! assert_eq!(tree.parameter(mode.dependents[0]).unwrap().key, "attack");
//! # Ok::<(), paramtree_engine::EngineError>(())
//! ```

mod cursor;
mod error;
pub mod packed;
mod set;

pub use error::EngineError;
pub use packed::{MAX_CHILDREN, MAX_LEVELS, PackedPath};
pub use set::{ParamNode, ParamSet, ParamSpec};
