//! Structural pass: rebuild the group/parameter hierarchy.
//!
//! Starting at the root handle, each group is filled depth-first: all of its
//! parameters in engine order, then each child group in engine order,
//! recursing into the child before moving to the next sibling. Every node is
//! entered into a [`PathIndex`] as it is created. No dependency is looked at
//! here; a name may point at a node that has not been visited yet, so
//! linking waits for [`resolve`](crate::resolve).

use std::collections::HashMap;

use crate::address::Address;
use crate::config::BuildConfig;
use crate::enumerate;
use crate::error::BuildError;
use crate::materialize::{materialize_group, materialize_parameter};
use crate::node::GroupNode;
use crate::path::{PathIndex, is_indexable_key, join_path};
use crate::source::ParameterSource;

/// Output of the structural pass.
#[derive(Debug, Clone)]
pub struct UnresolvedTree {
    /// Synthetic root holding the whole hierarchy.
    pub root: GroupNode,
    /// Qualified path of every indexable node.
    pub index: PathIndex,
}

/// Walks a [`ParameterSource`] into a [`GroupNode`] tree.
pub struct TreeBuilder<'a, S: ?Sized> {
    source: &'a S,
    config: &'a BuildConfig,
    index: PathIndex,
    owners: HashMap<Address, String>,
}

impl<'a, S: ParameterSource + ?Sized> TreeBuilder<'a, S> {
    /// Creates a builder over `source`.
    pub fn new(source: &'a S, config: &'a BuildConfig) -> Self {
        Self {
            source,
            config,
            index: PathIndex::new(config.separator),
            owners: HashMap::new(),
        }
    }

    /// Runs the structural pass to completion.
    ///
    /// Fails on the first inconsistency; nothing built so far is returned.
    pub fn build(mut self) -> Result<UnresolvedTree, BuildError> {
        let mut root = GroupNode::root();
        let mut path = Vec::new();
        self.fill(&mut root, &mut path)?;

        tracing::debug!(
            nodes = root.descendant_count(),
            indexed = self.index.len(),
            "structural pass complete"
        );

        Ok(UnresolvedTree {
            root,
            index: self.index,
        })
    }

    fn fill(&mut self, group: &mut GroupNode, path: &mut Vec<String>) -> Result<(), BuildError> {
        if path.len() > self.config.max_depth {
            return Err(BuildError::TooDeep {
                path: path.join(&self.config.separator.to_string()),
                limit: self.config.max_depth,
            });
        }

        let source = self.source;
        let limit = self.config.max_siblings;

        for entry in enumerate::parameters(source, group.address, limit) {
            let Some(param) = materialize_parameter(entry?)? else {
                continue;
            };
            self.register(path, &param.key, param.address)?;
            group.parameters.push(param);
        }

        for entry in enumerate::groups(source, group.address, limit) {
            let Some(mut child) = materialize_group(entry?)? else {
                continue;
            };
            self.register(path, &child.key, child.address)?;
            tracing::debug!(
                group = %child.key,
                address = %child.address,
                depth = path.len() + 1,
                "entering group"
            );

            path.push(child.key.clone());
            let filled = self.fill(&mut child, path);
            path.pop();
            filled?;

            group.children.push(child);
        }

        Ok(())
    }

    fn register(
        &mut self,
        path: &[String],
        key: &str,
        address: Address,
    ) -> Result<(), BuildError> {
        let qualified = join_path(path, key, self.config.separator);

        if let Some(first) = self.owners.get(&address) {
            return Err(BuildError::DuplicateAddress {
                address,
                first: first.clone(),
                second: qualified,
            });
        }
        self.owners.insert(address, qualified.clone());

        if is_indexable_key(key, self.config.separator) {
            self.index.insert(qualified, address);
        } else {
            tracing::warn!(
                path = %qualified,
                separator = %self.config.separator,
                "key is empty or contains the separator; node cannot be named as a dependent"
            );
        }
        Ok(())
    }
}
