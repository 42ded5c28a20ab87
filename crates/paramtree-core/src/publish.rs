//! Lock-free publication of finished trees.
//!
//! A [`TreeHandle`] lets one thread rebuild the tree while any number of
//! readers keep using the previous one. Readers take an `Arc` snapshot and
//! never block; a failed rebuild leaves the published tree untouched.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::export::ParameterTree;
use crate::source::ParameterSource;

/// Shared slot holding the current [`ParameterTree`], if any.
#[derive(Debug, Default)]
pub struct TreeHandle {
    current: ArcSwapOption<ParameterTree>,
}

impl TreeHandle {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published tree, returning the previous one.
    pub fn publish(&self, tree: ParameterTree) -> Option<Arc<ParameterTree>> {
        self.current.swap(Some(Arc::new(tree)))
    }

    /// Snapshot of the published tree.
    pub fn load(&self) -> Option<Arc<ParameterTree>> {
        self.current.load_full()
    }

    /// Returns `true` once a tree has been published.
    pub fn is_published(&self) -> bool {
        self.current.load().is_some()
    }

    /// Rebuilds from `source` and publishes the result.
    ///
    /// On error the previously published tree stays in place.
    pub fn rebuild<S: ParameterSource + ?Sized>(
        &self,
        source: &S,
        config: &BuildConfig,
    ) -> Result<(), BuildError> {
        let tree = crate::load_tree(source, config)?;
        tracing::info!(nodes = tree.len(), "parameter tree published");
        self.publish(tree);
        Ok(())
    }
}
