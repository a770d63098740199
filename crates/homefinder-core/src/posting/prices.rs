//! Dense per-record price column.

use super::RecordId;

/// Parsed price per record, indexed by [`RecordId`].
///
/// Records without a usable price hold `None`. The column only grows; gaps
/// left by skipped ids are backfilled with `None`.
#[derive(Debug, Clone, Default)]
pub struct PriceColumn {
    prices: Vec<Option<f64>>,
}

impl PriceColumn {
    /// Creates an empty column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure slot `id` exists, backfilling with `None`.
    pub fn reserve_slot(&mut self, id: RecordId) {
        let needed = id as usize + 1;
        if self.prices.len() < needed {
            self.prices.resize(needed, None);
        }
    }

    /// Stores the price of `id`.
    pub fn record(&mut self, id: RecordId, price: f64) {
        self.reserve_slot(id);
        self.prices[id as usize] = Some(price);
    }

    /// Price of `id`, if it was recorded.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<f64> {
        self.prices.get(id as usize).copied().flatten()
    }

    /// Returns true if `id` has a price inside `[lo, hi]`.
    #[must_use]
    pub fn in_range(&self, id: RecordId, lo: f64, hi: f64) -> bool {
        self.get(id).is_some_and(|p| lo <= p && p <= hi)
    }

    /// Number of slots (including missing ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no slot was ever reserved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
