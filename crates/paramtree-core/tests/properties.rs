//! Property-based tests for record decoding.

use paramtree_core::enumerate::Entry;
use paramtree_core::materialize::materialize_parameter;
use paramtree_core::{Address, ParamUnit, RawParameter};
use proptest::prelude::*;

fn any_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -1.0e6f32..1.0e6f32,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

fn record(min: f32, max: f32, default: f32, unit_code: i32) -> RawParameter {
    RawParameter {
        key: "p".to_string(),
        name: "P".to_string(),
        min,
        max,
        default,
        unit_code,
        dependents: vec!["a".to_string(), "b.c".to_string()],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn unit_codes_decode_without_failing(code in any::<i32>()) {
        let unit = ParamUnit::from_code(code);
        if (0..ParamUnit::ALL.len() as i32).contains(&code) {
            prop_assert_eq!(unit.code(), code);
        } else {
            prop_assert_eq!(unit, ParamUnit::Generic);
        }
    }

    #[test]
    fn materialized_ranges_are_ordered_and_finite(
        min in any_f32(),
        max in any_f32(),
        default in any_f32(),
        unit_code in -4i32..40,
        address in 0u64..u64::MAX,
    ) {
        let entry = Entry {
            address: Address(address),
            record: Some(record(min, max, default, unit_code)),
        };
        let node = materialize_parameter(entry).unwrap().unwrap();

        prop_assert!(node.min.is_finite() && node.max.is_finite());
        prop_assert!(node.min <= node.default && node.default <= node.max);
        prop_assert_eq!(node.address, Address(address));
        prop_assert_eq!(node.unit, ParamUnit::from_code(unit_code));
        prop_assert_eq!(node.raw_dependents, vec!["a".to_string(), "b.c".to_string()]);
        prop_assert!(node.resolved_dependents.is_empty());
    }

    #[test]
    fn well_formed_ranges_pass_through(
        a in -1.0e6f32..1.0e6f32,
        b in -1.0e6f32..1.0e6f32,
        t in 0.0f32..=1.0,
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let default = (min + (max - min) * t).clamp(min, max);
        let entry = Entry {
            address: Address(7),
            record: Some(record(min, max, default, 8)),
        };
        let node = materialize_parameter(entry).unwrap().unwrap();

        prop_assert_eq!(node.range(), (min, max));
        prop_assert_eq!(node.default, default);
    }
}

#[test]
fn sentinel_slot_is_absent() {
    let entry = Entry {
        address: Address::SENTINEL,
        record: Some(record(0.0, 1.0, 0.5, 0)),
    };
    assert!(materialize_parameter(entry).unwrap().is_none());
}
