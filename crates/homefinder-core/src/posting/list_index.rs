//! Sorted-list posting store.

use super::key::{Attribute, PostingKey};
use super::merge::{intersect_many, union_many};
use super::state::{IndexState, ParseCounts};
use super::{AttributeIndex, IndexVariant, RecordId};
use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::hash_table::{DefaultHashTable, HashTable};

type PostingList = Vec<RecordId>;

/// Posting store keeping one sorted, duplicate-free `Vec` per key.
///
/// Lists are append-only while loading. [`finalize`](Self::finalize) sorts
/// and dedups every list once; until then every query returns
/// [`Error::NotFinalized`]. Appending after `finalize` drops the store back
/// to the loading state.
///
/// # Example
///
/// ```
/// use homefinder_core::{Attribute, AttributeIndex, SortedPostingIndex};
///
/// let mut index = SortedPostingIndex::new(50_000)?;
/// index.add_row(0, "4", "3", "320000");
/// index.add_row(1, "3", "3", "310000");
/// assert!(index.query_at_least(Attribute::FullBaths, 3).is_err());
///
/// index.finalize();
/// assert_eq!(index.query_at_least(Attribute::FullBaths, 3)?, vec![0, 1]);
/// # Ok::<(), homefinder_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SortedPostingIndex {
    state: IndexState,
    postings: DefaultHashTable<PostingKey, PostingList>,
    finalized: bool,
}

impl SortedPostingIndex {
    /// Creates an empty store with bins of `price_bin` width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPriceBin`] if `price_bin` is zero.
    pub fn new(price_bin: u64) -> Result<Self> {
        Ok(Self {
            state: IndexState::new(price_bin)?,
            postings: DefaultHashTable::default(),
            finalized: false,
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
            postings: DefaultHashTable::with_table(table, PostingList::new as fn() -> PostingList),
            finalized: false,
        })
    }

    /// Sorts and dedups every posting list. Safe to call repeatedly.
    pub fn finalize(&mut self) -> &mut Self {
        if !self.finalized {
            let mut entries = 0_usize;
            for list in self.postings.table_mut().values_mut() {
                list.sort_unstable();
                // Vec::dedup is a single forward pass with a write cursor.
                list.dedup();
                entries += list.len();
            }
            self.finalized = true;
            tracing::debug!(
                keys = self.postings.len(),
                entries,
                "posting lists finalized"
            );
        }
        self
    }

    /// Returns true if the lists are sorted and deduplicated.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
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

    fn ensure_finalized(&self) -> Result<()> {
        if self.finalized {
            Ok(())
        } else {
            Err(Error::NotFinalized)
        }
    }

    /// Merge-unions the lists stored under `keys`.
    fn union_keys(&self, keys: impl IntoIterator<Item = PostingKey>) -> PostingList {
        let lists: Vec<&[RecordId]> = keys
            .into_iter()
            .filter_map(|key| self.postings.get(&key))
            .map(Vec::as_slice)
            .filter(|l| !l.is_empty())
            .collect();
        union_many(&lists)
    }
}

impl AttributeIndex for SortedPostingIndex {
    type Postings = PostingList;

    fn variant(&self) -> IndexVariant {
        IndexVariant::Posting
    }

    fn add_row(&mut self, id: RecordId, bedrooms: &str, fullbaths: &str, price: &str) {
        for key in self.state.ingest(id, bedrooms, fullbaths, price).into_iter().flatten() {
            self.postings.get_or_create(key).push(id);
            self.finalized = false;
        }
    }

    fn seal(&mut self) {
        self.finalize();
    }

    fn is_queryable(&self) -> bool {
        self.finalized
    }

    fn query_equals(&self, attribute: Attribute, value: u32) -> Result<PostingList> {
        self.ensure_finalized()?;
        Ok(self
            .postings
            .get(&PostingKey::attribute(attribute, value))
            .cloned()
            .unwrap_or_default())
    }

    fn query_at_least(&self, attribute: Attribute, value: u32) -> Result<PostingList> {
        self.ensure_finalized()?;
        Ok(self.union_keys(self.state.at_least_keys(attribute, value)))
    }

    fn query_price_range(&self, lo: f64, hi: f64) -> Result<PostingList> {
        self.ensure_finalized()?;
        Ok(self.union_keys(self.state.price_keys(lo, hi)?))
    }

    fn intersect(&self, postings: &[PostingList]) -> Vec<RecordId> {
        intersect_many(postings)
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
