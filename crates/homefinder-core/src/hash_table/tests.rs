//! Tests for the open-addressing hash table.

use super::*;
use crate::error::Error;

fn key(i: usize) -> String {
    format!("key{i}")
}

/// Finds two distinct keys sharing a home slot in a table of `capacity`.
fn colliding_pair(capacity: usize) -> (String, String) {
    let first = key(0);
    let home = fnv1a_hash(&first) as usize % capacity;
    let second = (1..)
        .map(key)
        .find(|k| fnv1a_hash(k) as usize % capacity == home)
        .expect("some key collides");
    (first, second)
}

// ========== FNV-1a ==========

#[test]
fn test_fnv1a_reference_vectors() {
    assert_eq!(fnv1a_32(b""), 2_166_136_261);
    assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
    assert_eq!(fnv1a_32(b"foobar"), 0xbf9c_f968);
}

#[test]
fn test_fnv1a_hash_matches_rendered_bytes() {
    // Arrange
    let rendered = "PriceBin=[300000,350000)";

    // Act & Assert
    assert_eq!(fnv1a_hash(rendered), fnv1a_32(rendered.as_bytes()));
    assert_eq!(fnv1a_hash(&42_u32), fnv1a_32(b"42"));
}

// ========== Construction ==========

#[test]
fn test_new_uses_defaults() {
    let table: HashTable<String, u32> = HashTable::new();
    assert_eq!(table.capacity(), DEFAULT_CAPACITY);
    assert!((table.load_factor() - DEFAULT_LOAD_FACTOR).abs() < f64::EPSILON);
    assert!(table.is_empty());
}

#[test]
fn test_with_params_rejects_zero_capacity() {
    let result = HashTable::<String, u32>::with_params(0, 0.75);
    assert!(matches!(result, Err(Error::InvalidTableParams { capacity: 0, .. })));
}

#[test]
fn test_with_params_rejects_bad_load_factor() {
    assert!(HashTable::<String, u32>::with_params(8, 0.0).is_err());
    assert!(HashTable::<String, u32>::with_params(8, 1.5).is_err());
    assert!(HashTable::<String, u32>::with_params(8, f64::NAN).is_err());
    assert!(HashTable::<String, u32>::with_params(8, 1.0).is_ok());
}

// ========== put / get / remove ==========

#[test]
fn test_put_then_get() {
    let mut table = HashTable::new();
    assert_eq!(table.put(key(1), "one"), None);
    assert_eq!(table.get(&key(1)), Some(&"one"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_put_overwrites_and_returns_previous() {
    let mut table = HashTable::new();
    table.put(key(1), 1);
    assert_eq!(table.put(key(1), 2), Some(1));
    assert_eq!(table.get(&key(1)), Some(&2));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_get_or_returns_default_when_absent() {
    let table: HashTable<String, i32> = HashTable::new();
    assert_eq!(*table.get_or(&key(7), &-1), -1);
}

#[test]
fn test_lookup_absent_is_key_not_found() {
    let table: HashTable<String, i32> = HashTable::new();
    let err = table.lookup(&key(3)).unwrap_err();
    assert!(matches!(err, Error::KeyNotFound(ref k) if k == "key3"));
    assert_eq!(err.code(), "HF-003");
}

#[test]
fn test_remove_then_get_returns_default() {
    let mut table = HashTable::new();
    table.put(key(1), 10);
    assert_eq!(table.remove(&key(1)), Some(10));
    assert_eq!(table.get(&key(1)), None);
    assert_eq!(*table.get_or(&key(1), &0), 0);
    assert!(!table.contains(&key(1)));
    assert!(table.is_empty());
}

#[test]
fn test_remove_absent_returns_none() {
    let mut table: HashTable<String, i32> = HashTable::new();
    assert_eq!(table.remove(&key(1)), None);
    assert_eq!(table.len(), 0);
}

#[test]
fn test_get_mut_updates_in_place() {
    let mut table = HashTable::new();
    table.put(key(1), vec![1]);
    table.get_mut(&key(1)).expect("present").push(2);
    assert_eq!(table.get(&key(1)), Some(&vec![1, 2]));
    assert!(table.get_mut(&key(2)).is_none());
}

// ========== Collisions & tombstones ==========

#[test]
fn test_colliding_keys_both_retrievable() {
    // Arrange
    let (a, b) = colliding_pair(DEFAULT_CAPACITY);
    let mut table = HashTable::new();

    // Act
    table.put(a.clone(), 1);
    table.put(b.clone(), 2);

    // Assert
    assert_eq!(table.get(&a), Some(&1));
    assert_eq!(table.get(&b), Some(&2));
}

#[test]
fn test_tombstone_keeps_probe_chain_intact() {
    // Arrange: b sits behind a in the same probe chain
    let (a, b) = colliding_pair(DEFAULT_CAPACITY);
    let mut table = HashTable::new();
    table.put(a.clone(), 1);
    table.put(b.clone(), 2);

    // Act
    table.remove(&a);

    // Assert: probing must continue through the tombstone
    assert_eq!(table.get(&b), Some(&2));
    assert!(table.contains(&b));
}

#[test]
fn test_reinsert_reuses_tombstone_without_duplicating() {
    let (a, b) = colliding_pair(DEFAULT_CAPACITY);
    let mut table = HashTable::new();
    table.put(a.clone(), 1);
    table.put(b.clone(), 2);
    table.remove(&a);

    // b is still found before the tombstone can be reused for it
    table.put(b.clone(), 3);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&b), Some(&3));

    table.put(a.clone(), 4);
    assert_eq!(table.len(), 2);
    assert_eq!(table.iter().count(), 2);
}

// ========== Growth ==========

#[test]
fn test_grows_when_load_factor_reached() {
    let mut table = HashTable::with_params(4, 0.5).expect("valid params");
    table.put(key(0), 0);
    table.put(key(1), 1);
    assert_eq!(table.capacity(), 4);

    // size (2) >= 4 * 0.5 triggers doubling before the third insert
    table.put(key(2), 2);
    assert_eq!(table.capacity(), 8);
    assert_eq!(table.len(), 3);
}

#[test]
fn test_survives_growth_with_1000_keys() {
    // Arrange
    let mut table = HashTable::with_capacity(16).expect("valid capacity");

    // Act
    for i in 0..1000 {
        table.put(key(i), i);
    }

    // Assert
    assert_eq!(table.len(), 1000);
    assert!(table.capacity() >= 1000);
    for i in 0..1000 {
        assert_eq!(table.get(&key(i)), Some(&i), "lost {} after growth", key(i));
    }
}

#[test]
fn test_growth_clears_tombstones() {
    let mut table = HashTable::with_params(8, 0.75).expect("valid params");
    for i in 0..5 {
        table.put(key(i), i);
    }
    for i in 0..5 {
        table.remove(&key(i));
    }
    for i in 100..120 {
        table.put(key(i), i);
    }
    assert_eq!(table.len(), 20);
    for i in 0..5 {
        assert!(!table.contains(&key(i)));
    }
}

#[test]
fn test_full_load_factor_never_overfills() {
    let mut table = HashTable::with_params(4, 1.0).expect("valid params");
    for i in 0..64 {
        table.put(key(i), i);
        assert!(table.len() <= table.capacity());
    }
    assert_eq!(table.len(), 64);
}

// ========== Iteration ==========

#[test]
fn test_iter_yields_only_live_entries() {
    let mut table = HashTable::new();
    for i in 0..10 {
        table.put(key(i), i);
    }
    table.remove(&key(3));
    table.remove(&key(7));

    let mut live: Vec<usize> = table.values().copied().collect();
    live.sort_unstable();
    assert_eq!(live, vec![0, 1, 2, 4, 5, 6, 8, 9]);
    assert_eq!(table.keys().count(), 8);
}

#[test]
fn test_values_mut_visits_every_live_value() {
    let mut table = HashTable::new();
    for i in 0..5 {
        table.put(key(i), i);
    }
    for value in table.values_mut() {
        *value *= 10;
    }
    assert_eq!(table.get(&key(4)), Some(&40));
}

// ========== DefaultHashTable ==========

#[test]
fn test_get_or_create_materializes_once() {
    // Arrange
    let mut lists: DefaultHashTable<String, Vec<u32>> = DefaultHashTable::default();

    // Act
    lists.get_or_create("a".into()).push(1);
    lists.get_or_create("a".into()).push(2);
    lists.get_or_create("b".into()).push(3);

    // Assert
    assert_eq!(lists.len(), 2);
    assert_eq!(lists.get(&"a".into()), Some(&vec![1, 2]));
    assert_eq!(lists.get(&"b".into()), Some(&vec![3]));
}

#[test]
fn test_plain_get_does_not_create() {
    let lists: DefaultHashTable<String, Vec<u32>> = DefaultHashTable::default();
    assert!(lists.get(&"missing".into()).is_none());
    assert!(!lists.contains(&"missing".into()));
    assert!(lists.is_empty());
}

#[test]
fn test_custom_factory_is_used() {
    let mut counters = DefaultHashTable::new(|| 100_i64);
    *counters.get_or_create(key(1)) += 1;
    assert_eq!(counters.get(&key(1)), Some(&101));
}

#[test]
fn test_get_or_create_across_growth() {
    let table = HashTable::with_params(2, 0.75).expect("valid params");
    let mut lists = DefaultHashTable::with_table(table, Vec::new);
    for i in 0..200_u32 {
        lists.get_or_create(format!("k{}", i % 50)).push(i);
    }
    assert_eq!(lists.len(), 50);
    assert_eq!(lists.get(&"k0".to_string()).map(Vec::len), Some(4));
}

// ========== Property tests ==========

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    enum Op {
        Put(u16, u32),
        Remove(u16),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u16..64, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
            (0u16..64).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: the table agrees with std's HashMap after any op sequence
        #[test]
        fn prop_matches_reference_map(ops in proptest::collection::vec(op_strategy(), 0..300)) {
            let mut table = HashTable::with_params(2, 0.75).expect("valid params");
            let mut model = HashMap::new();

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        prop_assert_eq!(table.put(k, v), model.insert(k, v));
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(table.remove(&k), model.remove(&k));
                    }
                }
            }

            prop_assert_eq!(table.len(), model.len());
            for k in 0u16..64 {
                prop_assert_eq!(table.get(&k), model.get(&k));
            }
        }
    }
}
