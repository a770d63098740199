//! Open-addressing hash table with linear probing and tombstone deletion.

use std::fmt::{self, Write as _};

use crate::error::{Error, Result};

/// Default number of slots allocated by [`HashTable::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Default fraction of occupied slots that triggers a doubling.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over raw bytes.
#[must_use]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Streams a `Display` rendering through FNV-1a without allocating.
struct Fnv1aWriter(u32);

impl fmt::Write for Fnv1aWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            self.0 = (self.0 ^ u32::from(byte)).wrapping_mul(FNV_PRIME);
        }
        Ok(())
    }
}

/// FNV-1a hash of a key's string representation.
///
/// `fnv1a_hash(&k) == fnv1a_32(k.to_string().as_bytes())` for every key.
#[must_use]
pub fn fnv1a_hash<K: fmt::Display + ?Sized>(key: &K) -> u32 {
    let mut writer = Fnv1aWriter(FNV_OFFSET_BASIS);
    // Fnv1aWriter never fails; only a broken Display impl could.
    let _ = write!(writer, "{key}");
    writer.0
}

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    /// Tombstone: keeps probe chains intact, reusable by inserts.
    Deleted,
    Occupied(K, V),
}

/// Outcome of a probe sequence.
#[derive(Debug, Clone, Copy)]
pub(super) struct Probe {
    pub(super) index: usize,
    pub(super) found: bool,
}

/// Generic key/value map using open addressing.
///
/// Keys are hashed with 32-bit FNV-1a over their `Display` output, so two keys
/// that render identically land in the same home slot. Collisions resolve by
/// linear probing; deletions leave tombstones that are cleared on growth.
///
/// # Example
///
/// ```
/// use homefinder_core::hash_table::HashTable;
///
/// let mut table = HashTable::new();
/// table.put("Bedrooms=4".to_string(), 3_usize);
/// assert_eq!(table.get(&"Bedrooms=4".to_string()), Some(&3));
/// assert_eq!(table.get_or(&"Bedrooms=9".to_string(), &0), &0);
/// ```
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    slots: Vec<Slot<K, V>>,
    size: usize,
    load_factor: f64,
}

impl<K: Eq + fmt::Display, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + fmt::Display, V> HashTable<K, V> {
    /// Creates an empty table with 16 slots and a 0.75 load factor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: empty_slots(DEFAULT_CAPACITY),
            size: 0,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }

    /// Creates an empty table with `capacity` slots and the default load factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableParams`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_params(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty table with explicit sizing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableParams`] unless `capacity > 0` and
    /// `0 < load_factor <= 1`.
    pub fn with_params(capacity: usize, load_factor: f64) -> Result<Self> {
        if capacity == 0 || !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(Error::InvalidTableParams {
                capacity,
                load_factor,
            });
        }
        Ok(Self {
            slots: empty_slots(capacity),
            size: 0,
            load_factor,
        })
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of allocated slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Configured load factor.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Inserts or overwrites `key`, returning the previous value if any.
    ///
    /// The growth check runs before probing, so the table doubles as soon as
    /// `len() >= capacity() * load_factor()`.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert_at(key, value).1
    }

    /// Looks up `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let probe = self.find_slot(key);
        if probe.found {
            self.value_at(probe.index)
        } else {
            None
        }
    }

    /// Looks up `key`, falling back to `default` when absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Mutable lookup of `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let probe = self.find_slot(key);
        if probe.found {
            Some(self.value_at_mut(probe.index))
        } else {
            None
        }
    }

    /// Direct lookup that treats absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] carrying the key's rendering.
    pub fn lookup(&self, key: &K) -> Result<&V> {
        self.get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Returns true if `key` has a live entry.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.find_slot(key).found
    }

    /// Removes `key`, leaving a tombstone. Returns the removed value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let probe = self.find_slot(key);
        if !probe.found {
            return None;
        }
        match std::mem::replace(&mut self.slots[probe.index], Slot::Deleted) {
            Slot::Occupied(_, value) => {
                self.size -= 1;
                Some(value)
            }
            Slot::Empty | Slot::Deleted => {
                unreachable!("slot {} was reported live by a probe", probe.index)
            }
        }
    }

    /// Iterates live entries in slot order.
    ///
    /// The order is unspecified and changes across growth.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((key, value)),
            Slot::Empty | Slot::Deleted => None,
        })
    }

    /// Iterates live keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates live values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Mutably iterates live values in slot order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied(_, value) => Some(value),
            Slot::Empty | Slot::Deleted => None,
        })
    }

    fn home_index(&self, key: &K) -> usize {
        fnv1a_hash(key) as usize % self.slots.len()
    }

    /// Linear probe from the home slot.
    ///
    /// Stops on a match, on an empty slot, or after a full wrap. When the key
    /// is absent the first tombstone seen wins over the stopping slot.
    pub(super) fn find_slot(&self, key: &K) -> Probe {
        let capacity = self.slots.len();
        let start = self.home_index(key);
        let mut index = start;
        let mut first_deleted = None;

        loop {
            match &self.slots[index] {
                Slot::Empty => break,
                Slot::Deleted => {
                    first_deleted.get_or_insert(index);
                }
                Slot::Occupied(existing, _) if existing == key => {
                    return Probe { index, found: true };
                }
                Slot::Occupied(..) => {}
            }
            index = (index + 1) % capacity;
            if index == start {
                break;
            }
        }

        Probe {
            index: first_deleted.unwrap_or(index),
            found: false,
        }
    }

    /// Insert path shared by `put`, growth and get-or-create.
    ///
    /// Returns the slot the entry landed in and the overwritten value.
    pub(super) fn insert_at(&mut self, key: K, value: V) -> (usize, Option<V>) {
        if self.needs_growth() {
            self.grow();
        }
        let probe = self.find_slot(&key);
        let previous = std::mem::replace(&mut self.slots[probe.index], Slot::Occupied(key, value));
        match previous {
            Slot::Occupied(_, old) if probe.found => (probe.index, Some(old)),
            _ => {
                self.size += 1;
                (probe.index, None)
            }
        }
    }

    fn value_at(&self, index: usize) -> Option<&V> {
        match &self.slots[index] {
            Slot::Occupied(_, value) => Some(value),
            Slot::Empty | Slot::Deleted => None,
        }
    }

    pub(super) fn value_at_mut(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => value,
            Slot::Empty | Slot::Deleted => {
                unreachable!("slot {index} was reported live by a probe")
            }
        }
    }

    fn needs_growth(&self) -> bool {
        self.size as f64 >= self.slots.len() as f64 * self.load_factor
    }

    /// Doubles capacity and reinserts live entries, dropping tombstones.
    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        let old = std::mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.size = 0;
        for slot in old {
            if let Slot::Occupied(key, value) = slot {
                self.put(key, value);
            }
        }
        tracing::trace!(capacity = new_capacity, live = self.size, "hash table grew");
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}
