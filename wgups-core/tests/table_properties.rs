//! Property-based tests for the open-addressing `Table`.
//!
//! A `std::collections::HashMap` serves as the model: after every operation
//! the table must agree with it on lookups and live-entry count.

use std::collections::HashMap;

use proptest::prelude::*;
use wgups_core::Table;

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u32),
    Delete(u8),
    Get(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0_u8..48, any::<u32>()).prop_map(|(key, value)| Op::Set(key, value)),
        1 => (0_u8..48).prop_map(Op::Delete),
        1 => (0_u8..48).prop_map(Op::Get),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: the table behaves like a map for any operation sequence.
    #[test]
    fn agrees_with_hash_map(
        initial_capacity in 1_usize..12,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut table = Table::with_capacity(initial_capacity);
        let mut model = HashMap::new();
        for op in ops {
            match op {
                Op::Set(key, value) => {
                    prop_assert!(table.set(key, value));
                    model.insert(key, value);
                }
                Op::Delete(key) => {
                    prop_assert_eq!(table.delete(&key), model.remove(&key).is_some());
                }
                Op::Get(key) => {
                    prop_assert_eq!(table.get(&key), model.get(&key));
                }
            }
            prop_assert_eq!(table.len(), model.len());
            prop_assert!(table.len() <= table.capacity());
        }
        for (key, value) in &model {
            prop_assert_eq!(table.get(key), Some(value));
        }
    }

    /// Property: entries inserted before a resize survive it.
    #[test]
    fn resizes_keep_entries(count in 2_u32..100) {
        let mut table = Table::with_capacity(1);
        for key in 0..count {
            table.set(key, key.wrapping_mul(7));
        }
        prop_assert!(table.capacity() >= usize::try_from(count).unwrap_or(usize::MAX));
        for key in 0..count {
            prop_assert_eq!(table.get(&key), Some(&key.wrapping_mul(7)));
        }
    }
}
