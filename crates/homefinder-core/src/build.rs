//! Bulk loading of raw rows into a posting index.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::posting::{AttributeIndex, IndexVariant, ParseCounts, RecordId};

/// One source row as raw text cells.
///
/// A missing cell is treated like an empty one: the record is left out of
/// that attribute's postings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawRow<'a> {
    /// Bedroom count cell.
    pub bedrooms: Option<&'a str>,
    /// Full-bath count cell.
    pub fullbaths: Option<&'a str>,
    /// Sale price cell.
    pub price: Option<&'a str>,
}

impl<'a> RawRow<'a> {
    /// Row with all three cells present.
    #[must_use]
    pub const fn new(bedrooms: &'a str, fullbaths: &'a str, price: &'a str) -> Self {
        Self {
            bedrooms: Some(bedrooms),
            fullbaths: Some(fullbaths),
            price: Some(price),
        }
    }
}

/// Summary of one bulk build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadReport {
    /// Which posting store was built.
    pub variant: IndexVariant,
    /// Rows fed to the index.
    pub rows: usize,
    /// Rows that parsed, per attribute.
    pub parsed: ParseCounts,
    /// Distinct posting keys after the build.
    pub posting_keys: usize,
    /// Largest bedroom count seen.
    pub max_bedrooms: u32,
    /// Largest full-bath count seen.
    pub max_fullbaths: u32,
    /// Wall time spent loading and sealing.
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

/// Feeds `rows` into `index` with ids assigned in order, then seals it.
///
/// # Example
///
/// ```
/// use homefinder_core::{build_index, RawRow, SortedPostingIndex};
///
/// let rows = [RawRow::new("4", "3", "320000"), RawRow::new("x", "2", "")];
/// let (index, report) = build_index(SortedPostingIndex::new(50_000)?, rows);
///
/// assert!(index.is_finalized());
/// assert_eq!(report.rows, 2);
/// assert_eq!(report.parsed.bedrooms, 1);
/// assert_eq!(report.parsed.price, 1);
/// # Ok::<(), homefinder_core::Error>(())
/// ```
pub fn build_index<'a, I, R>(mut index: I, rows: R) -> (I, LoadReport)
where
    I: AttributeIndex,
    R: IntoIterator<Item = RawRow<'a>>,
{
    let start = Instant::now();
    let mut count = 0_usize;
    for (id, row) in rows.into_iter().enumerate() {
        let Ok(id) = RecordId::try_from(id) else {
            tracing::warn!(rows = id, "record id space exhausted, stopping load");
            break;
        };
        index.add_row(
            id,
            row.bedrooms.unwrap_or_default(),
            row.fullbaths.unwrap_or_default(),
            row.price.unwrap_or_default(),
        );
        count += 1;
    }
    index.seal();

    let report = LoadReport {
        variant: index.variant(),
        rows: count,
        parsed: index.parse_counts(),
        posting_keys: index.posting_key_count(),
        max_bedrooms: index.max_bedrooms(),
        max_fullbaths: index.max_fullbaths(),
        elapsed: start.elapsed(),
    };
    tracing::info!(
        variant = %report.variant,
        rows = report.rows,
        bedrooms = report.parsed.bedrooms,
        fullbaths = report.parsed.fullbaths,
        price = report.parsed.price,
        posting_keys = report.posting_keys,
        elapsed_ms = report.elapsed.as_secs_f64() * 1000.0,
        "index built"
    );
    (index, report)
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}
