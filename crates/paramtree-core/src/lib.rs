//! Typed parameter trees rebuilt from an engine's cursor enumeration.
//!
//! Audio engines usually keep their parameters in a flat, address-indexed
//! store and expose only four cursor calls to walk it (see
//! [`ParameterSource`]). This crate turns that protocol into a typed,
//! navigable tree with every dependency between parameters resolved to an
//! address.
//!
//! # Pipeline
//!
//! ```text
//! ParameterSource ──► enumerate ──► materialize ──► TreeBuilder ──► resolve ──► export
//!   first/next         lazy,          raw record      depth-first,    names to     ParameterTree
//!   cursor calls       step-capped    to typed node   path index      addresses
//! ```
//!
//! Building is two-pass. The structural pass creates every node and a
//! path → address index; only then does the link pass qualify and look up
//! dependency names, so forward and cyclic references both work.
//!
//! # Example
//!
//! ```rust
//! use paramtree_core::{Address, BuildConfig, ParameterSource, RawGroup, RawParameter, load_tree};
//!
//! /// An engine with nothing in it.
//! struct Empty;
//!
//! impl ParameterSource for Empty {
//!     fn first_group(&self, cursor: &mut Address) -> Option<RawGroup> {
//!         *cursor = Address::SENTINEL;
//!         None
//!     }
//!     fn next_group(&self, cursor: &mut Address) -> Option<RawGroup> {
//!         *cursor = Address::SENTINEL;
//!         None
//!     }
//!     fn first_parameter(&self, cursor: &mut Address) -> Option<RawParameter> {
//!         *cursor = Address::SENTINEL;
//!         None
//!     }
//!     fn next_parameter(&self, cursor: &mut Address) -> Option<RawParameter> {
//!         *cursor = Address::SENTINEL;
//!         None
//!     }
//! }
//!
//! let tree = load_tree(&Empty, &BuildConfig::default()).unwrap();
//! assert!(tree.is_empty());
//! assert_eq!(tree.root().key, "root");
//! ```

pub mod address;
pub mod builder;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod export;
pub mod materialize;
pub mod node;
pub mod path;
pub mod publish;
pub mod resolve;
pub mod source;
pub mod unit;

pub use address::Address;
pub use builder::{TreeBuilder, UnresolvedTree};
pub use config::BuildConfig;
pub use error::{BuildError, Level};
pub use export::{ExportedGroup, ExportedNode, ExportedParameter, ParameterTree, export};
pub use node::{GroupNode, ParameterNode};
pub use path::PathIndex;
pub use publish::TreeHandle;
pub use resolve::{ResolveReport, UnresolvedDependent, resolve};
pub use source::{ParameterSource, RawGroup, RawParameter};
pub use unit::ParamUnit;

/// Builds, links and exports the full tree held by `source`.
///
/// Unresolvable dependency names are dropped (see [`resolve`]); use
/// [`load_tree_with_report`] to inspect them.
pub fn load_tree<S: ParameterSource + ?Sized>(
    source: &S,
    config: &BuildConfig,
) -> Result<ParameterTree, BuildError> {
    load_tree_with_report(source, config).map(|(tree, _)| tree)
}

/// Like [`load_tree`], also returning what the link pass could not resolve.
pub fn load_tree_with_report<S: ParameterSource + ?Sized>(
    source: &S,
    config: &BuildConfig,
) -> Result<(ParameterTree, ResolveReport), BuildError> {
    let UnresolvedTree { mut root, index } = TreeBuilder::new(source, config).build()?;
    let report = resolve(&mut root, &index);
    if !report.is_complete() {
        tracing::warn!(
            dropped = report.unresolved.len(),
            "some dependents could not be resolved"
        );
    }
    Ok((export(&root), report))
}
