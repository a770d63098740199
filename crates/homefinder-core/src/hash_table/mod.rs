//! Custom open-addressing hash table backing the posting maps.
//!
//! - FNV-1a (32-bit) over the key's string rendering
//! - Linear probing, tombstones on delete
//! - Doubling once `len >= capacity * load_factor`
//!
//! [`DefaultHashTable`] adds the get-or-create contract used to materialize
//! an empty posting collection the first time a key is seen.

mod default_table;
mod table;

pub use default_table::DefaultHashTable;
pub use table::{fnv1a_32, fnv1a_hash, HashTable, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};

#[cfg(test)]
mod tests;
