//! First/next cursor interface over a [`ParamSet`].
//!
//! `first_*` lists the children of the set whose address is in the cursor.
//! `next_*` moves past the node in the cursor to its next sibling of the same
//! kind. Whenever nothing is found, including for an address that does not
//! decode or does not name a set, the cursor is left at the sentinel.

use paramtree_core::{Address, ParameterSource, RawGroup, RawParameter};

use crate::packed::PackedPath;
use crate::set::{ParamNode, ParamSet};

impl ParamSet {
    fn first_child<R>(
        &self,
        cursor: &mut Address,
        pick: fn(&ParamNode) -> Option<R>,
    ) -> Option<R> {
        let found = PackedPath::decode(*cursor).and_then(|parent| {
            let set = self.set_at_path(parent)?;
            scan(set, parent, 0, pick)
        });
        settle(cursor, found)
    }

    fn next_sibling<R>(
        &self,
        cursor: &mut Address,
        pick: fn(&ParamNode) -> Option<R>,
    ) -> Option<R> {
        let found = PackedPath::decode(*cursor)
            .and_then(PackedPath::split_last)
            .and_then(|(parent, index)| {
                let set = self.set_at_path(parent)?;
                scan(set, parent, index + 1, pick)
            });
        settle(cursor, found)
    }
}

/// First child of `set` at or after `from` that `pick` accepts.
fn scan<R>(
    set: &ParamSet,
    parent: PackedPath,
    from: usize,
    pick: fn(&ParamNode) -> Option<R>,
) -> Option<(PackedPath, R)> {
    let (index, record) = set
        .children()
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(i, node)| pick(node).map(|r| (i, r)))?;

    match parent.child(index) {
        Some(path) => Some((path, record)),
        None => {
            tracing::warn!(
                set = %set.key,
                depth = parent.depth(),
                "children below the addressable depth are not enumerable"
            );
            None
        }
    }
}

fn settle<R>(cursor: &mut Address, found: Option<(PackedPath, R)>) -> Option<R> {
    match found {
        Some((path, record)) => {
            *cursor = path.encode();
            Some(record)
        }
        None => {
            *cursor = Address::SENTINEL;
            None
        }
    }
}

fn pick_set(node: &ParamNode) -> Option<RawGroup> {
    match node {
        ParamNode::Set(s) => Some(s.to_raw()),
        ParamNode::Param(_) => None,
    }
}

fn pick_param(node: &ParamNode) -> Option<RawParameter> {
    match node {
        ParamNode::Param(p) => Some(p.to_raw()),
        ParamNode::Set(_) => None,
    }
}

impl ParameterSource for ParamSet {
    fn first_group(&self, cursor: &mut Address) -> Option<RawGroup> {
        self.first_child(cursor, pick_set)
    }

    fn next_group(&self, cursor: &mut Address) -> Option<RawGroup> {
        self.next_sibling(cursor, pick_set)
    }

    fn first_parameter(&self, cursor: &mut Address) -> Option<RawParameter> {
        self.first_child(cursor, pick_param)
    }

    fn next_parameter(&self, cursor: &mut Address) -> Option<RawParameter> {
        self.next_sibling(cursor, pick_param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::ParamSpec;

    fn spec(key: &str) -> ParamSpec {
        ParamSpec::new(key, key, 0.0, 1.0, 0.0)
    }

    /// root { subset1 { param1_1, param1_2 }, subset2 { param2_1, param2_2, mock {} }, param3 }
    fn build_tree() -> ParamSet {
        let mut subset1 = ParamSet::new("subset1", "subset 1");
        subset1.add(spec("param1_1")).unwrap();
        subset1.add(spec("param1_2")).unwrap();

        let mut subset2 = ParamSet::new("subset2", "subset 2");
        subset2.add(spec("param2_1")).unwrap();
        subset2.add(spec("param2_2")).unwrap();
        subset2.add(ParamSet::new("mock", "Mock Algorithm")).unwrap();

        let mut root = ParamSet::new("root", "Root");
        root.add(subset1).unwrap();
        root.add(subset2).unwrap();
        root.add(spec("param3")).unwrap();
        root
    }

    const SUBSET1: Address = Address(0x00ff_ffff_ffff_ffff);
    const SUBSET2: Address = Address(0x01ff_ffff_ffff_ffff);

    #[test]
    fn top_level_sets() {
        let tree = build_tree();
        let mut cursor = Address::ROOT;

        assert_eq!(tree.first_group(&mut cursor).unwrap().key, "subset1");
        assert_eq!(cursor, SUBSET1);
        assert_eq!(tree.next_group(&mut cursor).unwrap().key, "subset2");
        assert_eq!(cursor, SUBSET2);
        assert!(tree.next_group(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);
    }

    #[test]
    fn top_level_parameters_skip_sets() {
        let tree = build_tree();
        let mut cursor = Address::ROOT;

        assert_eq!(tree.first_parameter(&mut cursor).unwrap().key, "param3");
        assert_eq!(cursor, Address(0x02ff_ffff_ffff_ffff));
        assert!(tree.next_parameter(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);
    }

    #[test]
    fn nested_parameters() {
        let tree = build_tree();

        let mut cursor = SUBSET1;
        assert_eq!(tree.first_parameter(&mut cursor).unwrap().key, "param1_1");
        assert_eq!(cursor, Address(0x0000_ffff_ffff_ffff));
        assert_eq!(tree.next_parameter(&mut cursor).unwrap().key, "param1_2");
        assert_eq!(cursor, Address(0x0001_ffff_ffff_ffff));
        assert!(tree.next_parameter(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);

        let mut cursor = SUBSET2;
        assert_eq!(tree.first_parameter(&mut cursor).unwrap().key, "param2_1");
        assert_eq!(cursor, Address(0x0100_ffff_ffff_ffff));
        assert_eq!(tree.next_parameter(&mut cursor).unwrap().key, "param2_2");
        assert_eq!(cursor, Address(0x0101_ffff_ffff_ffff));
        assert!(tree.next_parameter(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);
    }

    #[test]
    fn nested_sets() {
        let tree = build_tree();

        let mut cursor = SUBSET1;
        assert!(tree.first_group(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);

        let mut cursor = SUBSET2;
        assert_eq!(tree.first_group(&mut cursor).unwrap().name, "Mock Algorithm");
        assert_eq!(cursor, Address(0x0102_ffff_ffff_ffff));
        assert!(tree.next_group(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);
    }

    #[test]
    fn bad_cursors_end_at_sentinel() {
        let tree = build_tree();

        // A parameter address has no children.
        let mut cursor = Address(0x02ff_ffff_ffff_ffff);
        assert!(tree.first_parameter(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);

        // Next of the root is meaningless.
        let mut cursor = Address::ROOT;
        assert!(tree.next_group(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);

        // Malformed word.
        let mut cursor = Address(0x00ff_00ff_ffff_ffff);
        assert!(tree.first_group(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);
    }

    #[test]
    fn eighth_level_set_is_a_leaf() {
        let mut set = ParamSet::new("l7", "");
        set.add(spec("hidden")).unwrap();
        set.add(ParamSet::new("l8", "")).unwrap();
        for level in (0..7).rev() {
            let mut outer = ParamSet::new(format!("l{level}"), "");
            outer.add(set).unwrap();
            set = outer;
        }
        let mut root = ParamSet::new("root", "");
        root.add(set).unwrap();

        // l0 through l7 use all eight bytes, so l7's children have no address.
        assert_eq!(root.set_at(Address(0)).unwrap().key, "l7");

        let mut cursor = Address(0);
        assert!(root.first_parameter(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);

        let mut cursor = Address(0);
        assert!(root.first_group(&mut cursor).is_none());
        assert_eq!(cursor, Address::SENTINEL);
    }
}
