//! Conversion of raw engine records into typed nodes.
//!
//! Local anomalies are absorbed here: unknown unit codes decode to
//! [`ParamUnit::Generic`], and unusable ranges are repaired with a warning.
//! Dependency names are copied verbatim; qualifying them needs the group
//! path, which only the resolver knows.

use crate::address::Address;
use crate::enumerate::Entry;
use crate::error::{BuildError, Level};
use crate::node::{GroupNode, ParameterNode};
use crate::source::{RawGroup, RawParameter};
use crate::unit::ParamUnit;

/// Turns a parameter slot into a [`ParameterNode`].
///
/// Returns `Ok(None)` for a sentinel slot, and an error when the cursor
/// moved to a real address without a record.
pub fn materialize_parameter(
    entry: Entry<RawParameter>,
) -> Result<Option<ParameterNode>, BuildError> {
    let Some(raw) = take_record(entry.address, entry.record, Level::Parameters)? else {
        return Ok(None);
    };

    let (min, max, default) = sanitize_range(&raw.key, raw.min, raw.max, raw.default);

    Ok(Some(ParameterNode {
        key: raw.key,
        name: raw.name,
        min,
        max,
        default,
        unit: ParamUnit::from_code(raw.unit_code),
        address: entry.address,
        raw_dependents: raw.dependents,
        resolved_dependents: Vec::new(),
    }))
}

/// Turns a group slot into an empty [`GroupNode`].
pub fn materialize_group(entry: Entry<RawGroup>) -> Result<Option<GroupNode>, BuildError> {
    let Some(raw) = take_record(entry.address, entry.record, Level::Groups)? else {
        return Ok(None);
    };
    Ok(Some(GroupNode::new(raw.key, raw.name, entry.address)))
}

fn take_record<R>(
    address: Address,
    record: Option<R>,
    level: Level,
) -> Result<Option<R>, BuildError> {
    if address.is_sentinel() {
        return Ok(None);
    }
    record
        .map(Some)
        .ok_or(BuildError::MissingRecord { level, address })
}

fn finite_or(value: f32, nan_fallback: f32) -> f32 {
    if value.is_nan() {
        nan_fallback
    } else {
        value.clamp(f32::MIN, f32::MAX)
    }
}

/// Makes `min <= default <= max` hold with finite values.
fn sanitize_range(key: &str, min: f32, max: f32, default: f32) -> (f32, f32, f32) {
    let (mut lo, mut hi) = (finite_or(min, 0.0), finite_or(max, 0.0));
    if lo != min || hi != max {
        tracing::warn!(key, min, max, "non-finite parameter bounds replaced");
    }
    if lo > hi {
        tracing::warn!(key, min = lo, max = hi, "reversed parameter bounds swapped");
        core::mem::swap(&mut lo, &mut hi);
    }
    let value = finite_or(default, lo).clamp(lo, hi);
    if value != default {
        tracing::debug!(key, default, clamped = value, "default moved into range");
    }
    (lo, hi, value)
}
