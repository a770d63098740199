//! Aggregate state shared by both posting stores.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::key::{Attribute, PostingKey};
use super::prices::PriceColumn;
use super::RecordId;
use crate::error::{Error, Result};
use crate::parse::{parse_int_like, parse_price_like};

/// Rows that produced a usable value, per attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseCounts {
    /// Rows with a valid bedroom count.
    pub bedrooms: usize,
    /// Rows with a valid full-bath count.
    pub fullbaths: usize,
    /// Rows with a valid price.
    pub price: usize,
}

/// Parsing, running maxima and the price column.
///
/// Each store owns one of these and only adds its own posting map on top.
/// Range lookups walk the populated values only, so their cost is bounded by
/// the number of posting keys and never by the magnitude of an outlier.
#[derive(Debug, Clone)]
pub(crate) struct IndexState {
    price_bin: u64,
    max_bedrooms: u32,
    max_fullbaths: u32,
    bedroom_values: BTreeSet<u32>,
    fullbath_values: BTreeSet<u32>,
    price_bins: BTreeSet<u64>,
    num_rows: usize,
    prices: PriceColumn,
    counts: ParseCounts,
}

impl IndexState {
    pub(crate) fn new(price_bin: u64) -> Result<Self> {
        if price_bin == 0 {
            return Err(Error::InvalidPriceBin(price_bin));
        }
        Ok(Self {
            price_bin,
            max_bedrooms: 0,
            max_fullbaths: 0,
            bedroom_values: BTreeSet::new(),
            fullbath_values: BTreeSet::new(),
            price_bins: BTreeSet::new(),
            num_rows: 0,
            prices: PriceColumn::new(),
            counts: ParseCounts::default(),
        })
    }

    /// Parses one row and returns the posting keys `id` belongs to.
    pub(crate) fn ingest(
        &mut self,
        id: RecordId,
        bedrooms: &str,
        fullbaths: &str,
        price: &str,
    ) -> [Option<PostingKey>; 3] {
        self.prices.reserve_slot(id);
        self.num_rows = self.num_rows.max(id as usize + 1);

        let bed_key = parse_count(bedrooms).map(|b| {
            self.counts.bedrooms += 1;
            self.max_bedrooms = self.max_bedrooms.max(b);
            self.bedroom_values.insert(b);
            PostingKey::Bedrooms(b)
        });

        let bath_key = parse_count(fullbaths).map(|fb| {
            self.counts.fullbaths += 1;
            self.max_fullbaths = self.max_fullbaths.max(fb);
            self.fullbath_values.insert(fb);
            PostingKey::FullBaths(fb)
        });

        let price_key = match parse_price_like(price) {
            Some(p) if p >= 0.0 => {
                let bin = self.bin_of(p);
                self.counts.price += 1;
                self.price_bins.insert(bin);
                self.prices.record(id, p);
                Some(PostingKey::price_bin(bin, self.price_bin))
            }
            _ => None,
        };

        [bed_key, bath_key, price_key]
    }

    /// Bin number of `price`; prices beyond `u64` range share the last bin.
    fn bin_of(&self, price: f64) -> u64 {
        (price / self.price_bin as f64).floor() as u64
    }

    /// Posting keys of every populated value in `value..=max_seen`.
    pub(crate) fn at_least_keys(
        &self,
        attribute: Attribute,
        value: u32,
    ) -> impl Iterator<Item = PostingKey> + '_ {
        let values = match attribute {
            Attribute::Bedrooms => &self.bedroom_values,
            Attribute::FullBaths => &self.fullbath_values,
        };
        values
            .range(value..)
            .map(move |&v| PostingKey::attribute(attribute, v))
    }

    /// Posting keys of every populated bin overlapping `[lo, hi]`.
    ///
    /// The upper bin is `floor(hi / price_bin)`, so a price exactly equal to
    /// `hi` is never lost. Empty bins are never visited.
    pub(crate) fn price_keys(&self, lo: f64, hi: f64) -> Result<Vec<PostingKey>> {
        let Some(bins) = self.bin_range(lo, hi)? else {
            return Ok(Vec::new());
        };
        Ok(self
            .price_bins
            .range(bins)
            .map(|&bin| PostingKey::price_bin(bin, self.price_bin))
            .collect())
    }

    fn bin_range(&self, lo: f64, hi: f64) -> Result<Option<RangeInclusive<u64>>> {
        if lo.is_nan() || hi.is_nan() {
            return Err(Error::InvalidQuery(format!(
                "price range [{lo}, {hi}] contains NaN"
            )));
        }
        if hi < lo {
            tracing::warn!(lo, hi, "inverted price range matches nothing");
            return Ok(None);
        }
        if hi < 0.0 || self.price_bins.is_empty() {
            return Ok(None);
        }
        let first = self.bin_of(lo.max(0.0));
        let last = self.bin_of(hi);
        Ok((first <= last).then_some(first..=last))
    }

    /// Keeps ids whose price lies in `[lo, hi]`, preserving input order.
    pub(crate) fn post_filter(&self, ids: &[RecordId], lo: f64, hi: f64) -> Vec<RecordId> {
        ids.iter()
            .copied()
            .filter(|&id| self.prices.in_range(id, lo, hi))
            .collect()
    }

    pub(crate) fn price_bin(&self) -> u64 {
        self.price_bin
    }

    pub(crate) fn max_bedrooms(&self) -> u32 {
        self.max_bedrooms
    }

    pub(crate) fn max_fullbaths(&self) -> u32 {
        self.max_fullbaths
    }

    pub(crate) fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub(crate) fn counts(&self) -> ParseCounts {
        self.counts
    }

    pub(crate) fn prices(&self) -> &PriceColumn {
        &self.prices
    }
}

/// Parses a non-negative count that fits a `u32`.
fn parse_count(raw: &str) -> Option<u32> {
    parse_int_like(raw).and_then(|v| u32::try_from(v).ok())
}
