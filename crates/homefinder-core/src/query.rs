//! Multi-attribute query execution.
//!
//! A [`PropertyQuery`] resolves each supplied predicate through an
//! [`AttributeIndex`], intersects the postings, and removes binning false
//! positives with an exact price post-filter.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::posting::{Attribute, AttributeIndex, Postings, RecordId};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive. `f64::INFINITY` for unbounded.
    pub max: f64,
}

impl PriceRange {
    /// Creates a range `[min, max]`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range with only a lower bound.
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }

    /// Returns true if `price` lies inside the range.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }

    fn check(&self) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(Error::InvalidQuery(format!(
                "price range [{}, {}] contains NaN",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::at_least(0.0)
    }
}

/// Conjunction of bedroom equality, full-bath threshold and price range.
///
/// # Example
///
/// ```
/// use homefinder_core::{AttributeIndex, PropertyQuery, SetPostingIndex};
///
/// let mut index = SetPostingIndex::new(50_000)?;
/// index.add_row(0, "4", "3", "320000");
/// index.add_row(1, "4", "2", "280000");
/// index.add_row(2, "3", "3", "310000");
///
/// let hits = PropertyQuery::new()
///     .bedrooms(4)
///     .min_fullbaths(3)
///     .price_between(300_000.0, 350_000.0)
///     .execute(&index)?;
/// assert_eq!(hits, vec![0]);
/// # Ok::<(), homefinder_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyQuery {
    /// Exact bedroom count.
    pub bedrooms: Option<u32>,
    /// Minimum full-bath count.
    pub min_fullbaths: Option<u32>,
    /// Price bounds; always applied.
    pub price: PriceRange,
}

impl PropertyQuery {
    /// Query matching every record with a price of at least zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires exactly `beds` bedrooms.
    #[must_use]
    pub fn bedrooms(mut self, beds: u32) -> Self {
        self.bedrooms = Some(beds);
        self
    }

    /// Requires at least `baths` full baths.
    #[must_use]
    pub fn min_fullbaths(mut self, baths: u32) -> Self {
        self.min_fullbaths = Some(baths);
        self
    }

    /// Restricts price to `[min, max]`.
    #[must_use]
    pub fn price_between(mut self, min: f64, max: f64) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    /// Restricts price to `price`.
    #[must_use]
    pub fn price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    /// Runs the query and returns matching ids in ascending order.
    ///
    /// Predicates are conjunctive: if any supplied predicate matches no
    /// record the result is empty without intersecting. This differs from
    /// [`AttributeIndex::intersect`], which drops empty members, so an unseen
    /// bedroom count yields nothing here rather than being ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] on NaN price bounds and
    /// [`Error::NotFinalized`] if the index is not queryable.
    pub fn execute<I: AttributeIndex>(&self, index: &I) -> Result<Vec<RecordId>> {
        self.price.check()?;
        if !index.is_queryable() {
            return Err(Error::NotFinalized);
        }

        let mut postings = Vec::with_capacity(3);
        if let Some(beds) = self.bedrooms {
            postings.push(index.query_equals(Attribute::Bedrooms, beds)?);
        }
        if let Some(baths) = self.min_fullbaths {
            postings.push(index.query_at_least(Attribute::FullBaths, baths)?);
        }
        postings.push(index.query_price_range(self.price.min, self.price.max)?);

        if postings.iter().any(Postings::is_empty) {
            tracing::trace!(variant = %index.variant(), "predicate matched nothing");
            return Ok(Vec::new());
        }

        let candidates = index.intersect(&postings);
        Ok(index.post_filter_exact_price(&candidates, self.price.min, self.price.max))
    }
}
