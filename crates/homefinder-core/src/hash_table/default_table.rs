//! Hash table that materializes a default value on first access.

use std::fmt;

use super::table::HashTable;

/// A [`HashTable`] paired with a factory for missing values.
///
/// Posting maps use this to create an empty posting collection the first
/// time an attribute key is seen. Lookups that must not insert go through
/// [`DefaultHashTable::get`].
///
/// # Example
///
/// ```
/// use homefinder_core::hash_table::DefaultHashTable;
///
/// let mut lists: DefaultHashTable<String, Vec<u32>> = DefaultHashTable::default();
/// lists.get_or_create("a".to_string()).push(1);
/// lists.get_or_create("a".to_string()).push(2);
/// assert_eq!(lists.get(&"a".to_string()), Some(&vec![1, 2]));
/// assert!(lists.get(&"b".to_string()).is_none());
/// ```
#[derive(Clone)]
pub struct DefaultHashTable<K, V, F = fn() -> V> {
    table: HashTable<K, V>,
    factory: F,
}

impl<K, V, F> fmt::Debug for DefaultHashTable<K, V, F>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHashTable")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<K: Eq + fmt::Display, V: Default> Default for DefaultHashTable<K, V> {
    fn default() -> Self {
        Self {
            table: HashTable::new(),
            factory: V::default,
        }
    }
}

impl<K, V, F> DefaultHashTable<K, V, F>
where
    K: Eq + fmt::Display,
    F: Fn() -> V,
{
    /// Creates an empty table with default sizing.
    pub fn new(factory: F) -> Self {
        Self::with_table(HashTable::new(), factory)
    }

    /// Wraps a pre-sized (usually empty) table.
    pub fn with_table(table: HashTable<K, V>, factory: F) -> Self {
        Self { table, factory }
    }

    /// Returns the value for `key`, inserting `factory()` first if absent.
    pub fn get_or_create(&mut self, key: K) -> &mut V {
        let probe = self.table.find_slot(&key);
        if probe.found {
            return self.table.value_at_mut(probe.index);
        }
        let (index, _) = self.table.insert_at(key, (self.factory)());
        self.table.value_at_mut(index)
    }

    /// Looks up `key` without creating anything.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(key)
    }

    /// Returns true if `key` has a live entry.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.table.contains(key)
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no entry was ever materialized (or all were removed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Underlying table.
    #[must_use]
    pub fn table(&self) -> &HashTable<K, V> {
        &self.table
    }

    /// Underlying table, mutably.
    pub fn table_mut(&mut self) -> &mut HashTable<K, V> {
        &mut self.table
    }
}
