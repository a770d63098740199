//! Posting stores: attribute key -> record identifiers.
//!
//! Two interchangeable implementations share the [`AttributeIndex`] contract:
//!
//! | Variant | Posting type | Union / intersection | Ready after |
//! |---------|--------------|----------------------|-------------|
//! | [`SetPostingIndex`] | `FxHashSet<RecordId>` | hash-set ops | every `add_row` |
//! | [`SortedPostingIndex`] | sorted `Vec<RecordId>` | two-pointer merges | `finalize()` |
//!
//! Both are backed by the crate's [`DefaultHashTable`](crate::hash_table::DefaultHashTable)
//! and keep a dense per-record price column for exact post-filtering of
//! binned price ranges.

mod key;
mod list_index;
mod merge;
mod prices;
mod set_index;
mod state;

pub use key::{Attribute, PostingKey};
pub use list_index::SortedPostingIndex;
pub use merge::{intersect_many, intersect_sets, intersect_two, merge_union_two, union_many};
pub use prices::PriceColumn;
pub use set_index::SetPostingIndex;
pub use state::ParseCounts;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Dense, zero-based record identifier assigned in load order.
pub type RecordId = u32;

/// Which posting implementation an index uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexVariant {
    /// Unordered hash sets.
    Hashset,
    /// Sorted, deduplicated lists.
    Posting,
}

impl IndexVariant {
    /// Short name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hashset => "hashset",
            Self::Posting => "posting",
        }
    }
}

impl std::fmt::Display for IndexVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collections returned by posting queries.
pub trait Postings {
    /// Number of identifiers.
    fn len(&self) -> usize;

    /// Returns true if no identifier matched.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Postings for FxHashSet<RecordId> {
    fn len(&self) -> usize {
        FxHashSet::len(self)
    }
}

impl Postings for Vec<RecordId> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Contract shared by the hash-set and sorted-list posting stores.
///
/// Rows are loaded once with [`add_row`](AttributeIndex::add_row); after
/// [`seal`](AttributeIndex::seal) the index is read-only and every query is a
/// pure function of the loaded data.
pub trait AttributeIndex {
    /// Collection type produced by a single-predicate query.
    type Postings: Postings;

    /// Which implementation this is.
    fn variant(&self) -> IndexVariant;

    /// Indexes one record from raw, unparsed cells.
    ///
    /// Unparsable or negative cells leave the record out of that attribute's
    /// postings; the record still occupies its slot in the price column.
    fn add_row(&mut self, id: RecordId, bedrooms: &str, fullbaths: &str, price: &str);

    /// Transitions the index from loading to queryable. Idempotent.
    fn seal(&mut self) {}

    /// Returns true once queries may run.
    fn is_queryable(&self) -> bool {
        true
    }

    /// Records whose parsed `attribute` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFinalized`](crate::Error::NotFinalized) if the
    /// index is not queryable.
    fn query_equals(&self, attribute: Attribute, value: u32) -> Result<Self::Postings>;

    /// Records whose parsed `attribute` is `>= value` (up to the observed maximum).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFinalized`](crate::Error::NotFinalized) if the
    /// index is not queryable.
    fn query_at_least(&self, attribute: Attribute, value: u32) -> Result<Self::Postings>;

    /// Records in every price bin overlapping `[lo, hi]`.
    ///
    /// A superset of the exact answer; follow with
    /// [`post_filter_exact_price`](AttributeIndex::post_filter_exact_price).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`](crate::Error::InvalidQuery) on NaN
    /// bounds and [`Error::NotFinalized`](crate::Error::NotFinalized) if the
    /// index is not queryable.
    fn query_price_range(&self, lo: f64, hi: f64) -> Result<Self::Postings>;

    /// Intersects query results into an ascending identifier list.
    ///
    /// Empty members are dropped; no members (or only empty ones) yields an
    /// empty list.
    fn intersect(&self, postings: &[Self::Postings]) -> Vec<RecordId>;

    /// Keeps ids whose recorded price lies in `[lo, hi]`, preserving order.
    fn post_filter_exact_price(&self, ids: &[RecordId], lo: f64, hi: f64) -> Vec<RecordId>;

    /// Number of distinct posting keys.
    fn posting_key_count(&self) -> usize;

    /// Largest bedroom count seen.
    fn max_bedrooms(&self) -> u32;

    /// Largest full-bath count seen.
    fn max_fullbaths(&self) -> u32;

    /// Number of record slots (highest id + 1).
    fn row_count(&self) -> usize;

    /// How many rows parsed for each attribute.
    fn parse_counts(&self) -> ParseCounts;
}
