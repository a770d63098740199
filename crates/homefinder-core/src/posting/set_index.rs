//! Hash-set posting store.

use rustc_hash::FxHashSet;

use super::key::{Attribute, PostingKey};
use super::merge::intersect_sets;
use super::state::{IndexState, ParseCounts};
use super::{AttributeIndex, IndexVariant, RecordId};
use crate::config::IndexConfig;
use crate::error::Result;
use crate::hash_table::{DefaultHashTable, HashTable};

type PostingSet = FxHashSet<RecordId>;

/// Posting store keeping one unordered `FxHashSet` per key.
///
/// Query-ready after every `add_row`; duplicate inserts of the same id are
/// absorbed by the set.
///
/// # Example
///
/// ```
/// use homefinder_core::{Attribute, AttributeIndex, SetPostingIndex};
///
/// let mut index = SetPostingIndex::new(50_000)?;
/// index.add_row(0, "4", "3", "$320,000");
/// index.add_row(1, "4", "2", "280000");
///
/// let four_beds = index.query_equals(Attribute::Bedrooms, 4)?;
/// assert_eq!(index.intersect(&[four_beds]), vec![0, 1]);
/// # Ok::<(), homefinder_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SetPostingIndex {
    state: IndexState,
    postings: DefaultHashTable<PostingKey, PostingSet>,
}

impl SetPostingIndex {
    /// Creates an empty store with bins of `price_bin` width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPriceBin`](crate::Error::InvalidPriceBin) if
    /// `price_bin` is zero.
    pub fn new(price_bin: u64) -> Result<Self> {
        Ok(Self {
            state: IndexState::new(price_bin)?,
            postings: DefaultHashTable::default(),
        })
    }

    /// Creates an empty store sized from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the price bin or hash table parameters are invalid.
    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        let table = HashTable::with_params(config.initial_capacity, config.load_factor)?;
        Ok(Self {
            state: IndexState::new(config.price_bin)?,
            postings: DefaultHashTable::with_table(table, PostingSet::default as fn() -> PostingSet),
        })
    }

    /// Width of each price bin.
    #[must_use]
    pub fn price_bin(&self) -> u64 {
        self.state.price_bin()
    }

    /// Recorded price of `id`, if any.
    #[must_use]
    pub fn price_of(&self, id: RecordId) -> Option<f64> {
        self.state.prices().get(id)
    }

    /// Unions the sets stored under `keys`, skipping absent or empty ones.
    fn union_keys(&self, keys: impl IntoIterator<Item = PostingKey>) -> PostingSet {
        let mut out = PostingSet::default();
        for key in keys {
            if let Some(set) = self.postings.get(&key).filter(|s| !s.is_empty()) {
                out.extend(set.iter().copied());
            }
        }
        out
    }
}

impl AttributeIndex for SetPostingIndex {
    type Postings = PostingSet;

    fn variant(&self) -> IndexVariant {
        IndexVariant::Hashset
    }

    fn add_row(&mut self, id: RecordId, bedrooms: &str, fullbaths: &str, price: &str) {
        for key in self.state.ingest(id, bedrooms, fullbaths, price).into_iter().flatten() {
            self.postings.get_or_create(key).insert(id);
        }
    }

    fn query_equals(&self, attribute: Attribute, value: u32) -> Result<PostingSet> {
        Ok(self
            .postings
            .get(&PostingKey::attribute(attribute, value))
            .cloned()
            .unwrap_or_default())
    }

    fn query_at_least(&self, attribute: Attribute, value: u32) -> Result<PostingSet> {
        Ok(self.union_keys(self.state.at_least_keys(attribute, value)))
    }

    fn query_price_range(&self, lo: f64, hi: f64) -> Result<PostingSet> {
        Ok(self.union_keys(self.state.price_keys(lo, hi)?))
    }

    fn intersect(&self, postings: &[PostingSet]) -> Vec<RecordId> {
        intersect_sets(postings)
    }

    fn post_filter_exact_price(&self, ids: &[RecordId], lo: f64, hi: f64) -> Vec<RecordId> {
        self.state.post_filter(ids, lo, hi)
    }

    fn posting_key_count(&self) -> usize {
        self.postings.len()
    }

    fn max_bedrooms(&self) -> u32 {
        self.state.max_bedrooms()
    }

    fn max_fullbaths(&self) -> u32 {
        self.state.max_fullbaths()
    }

    fn row_count(&self) -> usize {
        self.state.num_rows()
    }

    fn parse_counts(&self) -> ParseCounts {
        self.state.counts()
    }
}
