//! Iterator adapter over the first/next cursor protocol.
//!
//! [`groups`] and [`parameters`] turn the four cursor calls of a
//! [`ParameterSource`] into two independent, lazy sequences per group. A
//! sequence calls `first_*` once, then `next_*` until the cursor becomes the
//! sentinel. It cannot be restarted; ask for a new one to enumerate again.
//!
//! Every sequence carries a hard step limit. An engine whose cursor keeps
//! moving past that limit yields a single [`BuildError::NonTerminating`] and
//! then ends, so a broken provider can never hang the caller.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::address::Address;
use crate::error::{BuildError, Level};
use crate::source::{ParameterSource, RawGroup, RawParameter};

/// Selects one pair of first/next calls on a [`ParameterSource`].
pub trait Enumeration {
    /// Record type produced by this pair.
    type Record;

    /// Which level this is, for error reporting.
    const LEVEL: Level;

    /// Calls the `first_*` entry point.
    fn first<S: ParameterSource + ?Sized>(source: &S, cursor: &mut Address)
    -> Option<Self::Record>;

    /// Calls the `next_*` entry point.
    fn next<S: ParameterSource + ?Sized>(source: &S, cursor: &mut Address)
    -> Option<Self::Record>;
}

/// `first_group` / `next_group`.
#[derive(Debug)]
pub enum GroupCalls {}

/// `first_parameter` / `next_parameter`.
#[derive(Debug)]
pub enum ParameterCalls {}

impl Enumeration for GroupCalls {
    type Record = RawGroup;
    const LEVEL: Level = Level::Groups;

    fn first<S: ParameterSource + ?Sized>(source: &S, cursor: &mut Address) -> Option<RawGroup> {
        source.first_group(cursor)
    }

    fn next<S: ParameterSource + ?Sized>(source: &S, cursor: &mut Address) -> Option<RawGroup> {
        source.next_group(cursor)
    }
}

impl Enumeration for ParameterCalls {
    type Record = RawParameter;
    const LEVEL: Level = Level::Parameters;

    fn first<S: ParameterSource + ?Sized>(
        source: &S,
        cursor: &mut Address,
    ) -> Option<RawParameter> {
        source.first_parameter(cursor)
    }

    fn next<S: ParameterSource + ?Sized>(
        source: &S,
        cursor: &mut Address,
    ) -> Option<RawParameter> {
        source.next_parameter(cursor)
    }
}

/// One enumeration slot: where the cursor landed and what it returned there.
///
/// `record` is `None` only when the engine moved the cursor without handing
/// back data; the materializer rejects such slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<R> {
    /// Cursor value after the call, i.e. the node's address.
    pub address: Address,
    /// Record returned by the call.
    pub record: Option<R>,
}

/// Lazy, finite, non-restartable walk over one level of one group.
pub struct Cursor<'a, S: ?Sized, E> {
    source: &'a S,
    group: Address,
    cursor: Address,
    started: bool,
    finished: bool,
    yielded: usize,
    limit: usize,
    _calls: PhantomData<E>,
}

impl<'a, S: ParameterSource + ?Sized, E: Enumeration> Cursor<'a, S, E> {
    /// Starts a walk over the children of `group` (`Address::ROOT` for the top level).
    pub fn new(source: &'a S, group: Address, limit: usize) -> Self {
        Self {
            source,
            group,
            cursor: group,
            started: false,
            finished: false,
            yielded: 0,
            limit,
            _calls: PhantomData,
        }
    }

    /// Group whose children are being walked.
    pub fn group(&self) -> Address {
        self.group
    }
}

impl<S: ParameterSource + ?Sized, E: Enumeration> Iterator for Cursor<'_, S, E> {
    type Item = Result<Entry<E::Record>, BuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let record = if self.started {
            E::next(self.source, &mut self.cursor)
        } else {
            self.started = true;
            E::first(self.source, &mut self.cursor)
        };

        if self.cursor.is_sentinel() {
            self.finished = true;
            return None;
        }

        if self.yielded == self.limit {
            self.finished = true;
            return Some(Err(BuildError::NonTerminating {
                level: E::LEVEL,
                group: self.group,
                limit: self.limit,
            }));
        }

        self.yielded += 1;
        Some(Ok(Entry {
            address: self.cursor,
            record,
        }))
    }
}

impl<S: ParameterSource + ?Sized, E: Enumeration> FusedIterator for Cursor<'_, S, E> {}

/// Child groups of `group`, in engine order.
pub fn groups<S: ParameterSource + ?Sized>(
    source: &S,
    group: Address,
    limit: usize,
) -> Cursor<'_, S, GroupCalls> {
    Cursor::new(source, group, limit)
}

/// Parameters of `group`, in engine order.
pub fn parameters<S: ParameterSource + ?Sized>(
    source: &S,
    group: Address,
    limit: usize,
) -> Cursor<'_, S, ParameterCalls> {
    Cursor::new(source, group, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Root holds `count` parameters at addresses 0..count and no groups.
    struct Flat {
        count: u64,
        calls: Cell<usize>,
    }

    impl Flat {
        fn new(count: u64) -> Self {
            Self {
                count,
                calls: Cell::new(0),
            }
        }

        fn param(&self, cursor: &mut Address, at: u64) -> Option<RawParameter> {
            self.calls.set(self.calls.get() + 1);
            if at < self.count {
                *cursor = Address(at);
                Some(RawParameter {
                    key: format!("p{at}"),
                    ..RawParameter::default()
                })
            } else {
                *cursor = Address::SENTINEL;
                None
            }
        }
    }

    impl ParameterSource for Flat {
        fn first_group(&self, cursor: &mut Address) -> Option<RawGroup> {
            *cursor = Address::SENTINEL;
            None
        }

        fn next_group(&self, cursor: &mut Address) -> Option<RawGroup> {
            *cursor = Address::SENTINEL;
            None
        }

        fn first_parameter(&self, cursor: &mut Address) -> Option<RawParameter> {
            self.param(cursor, 0)
        }

        fn next_parameter(&self, cursor: &mut Address) -> Option<RawParameter> {
            let at = cursor.raw() + 1;
            self.param(cursor, at)
        }
    }

    /// `next_parameter` never advances.
    struct Stuck;

    impl ParameterSource for Stuck {
        fn first_group(&self, cursor: &mut Address) -> Option<RawGroup> {
            *cursor = Address::SENTINEL;
            None
        }

        fn next_group(&self, cursor: &mut Address) -> Option<RawGroup> {
            *cursor = Address::SENTINEL;
            None
        }

        fn first_parameter(&self, cursor: &mut Address) -> Option<RawParameter> {
            *cursor = Address(7);
            Some(RawParameter::default())
        }

        fn next_parameter(&self, _cursor: &mut Address) -> Option<RawParameter> {
            Some(RawParameter::default())
        }
    }

    #[test]
    fn yields_records_in_engine_order() {
        let source = Flat::new(3);
        let keys: Vec<String> = parameters(&source, Address::ROOT, 16)
            .map(|e| e.unwrap().record.unwrap().key)
            .collect();
        assert_eq!(keys, ["p0", "p1", "p2"]);
    }

    #[test]
    fn addresses_are_cursor_values() {
        let source = Flat::new(2);
        let addrs: Vec<Address> = parameters(&source, Address::ROOT, 16)
            .map(|e| e.unwrap().address)
            .collect();
        assert_eq!(addrs, [Address(0), Address(1)]);
    }

    #[test]
    fn empty_level_yields_nothing() {
        let source = Flat::new(0);
        let mut walk = parameters(&source, Address::ROOT, 16);
        assert!(walk.next().is_none());
        assert_eq!(source.calls.get(), 1, "only first_parameter is called");
        assert!(groups(&source, Address::ROOT, 16).next().is_none());
    }

    #[test]
    fn fused_after_exhaustion() {
        let source = Flat::new(1);
        let mut walk = parameters(&source, Address::ROOT, 16);
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        let calls = source.calls.get();
        assert!(walk.next().is_none());
        assert_eq!(source.calls.get(), calls, "no calls after the sentinel");
    }

    #[test]
    fn limit_exactly_met_is_fine() {
        let source = Flat::new(4);
        let results: Vec<_> = parameters(&source, Address::ROOT, 4).collect();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn stuck_cursor_reports_non_terminating() {
        let mut walk = parameters(&Stuck, Address::ROOT, 5);
        let results: Vec<_> = walk.by_ref().collect();
        assert_eq!(results.len(), 6);
        assert!(results[..5].iter().all(Result::is_ok));
        assert_eq!(
            results[5],
            Err(BuildError::NonTerminating {
                level: Level::Parameters,
                group: Address::ROOT,
                limit: 5,
            })
        );
        assert!(walk.next().is_none());
    }
}
