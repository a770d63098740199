//! CSV dataset loading.
//!
//! Every record is kept as raw text; the index only sees the three indexed
//! cells, the rest is read back when rendering or post-filtering homes.

use anyhow::{Context, Result};
use csv::StringRecord;
use homefinder_core::config::ColumnConfig;
use homefinder_core::{RawRow, RecordId};
use std::path::Path;

/// Column positions resolved against the CSV header.
///
/// A configured column missing from the header resolves to `None` and every
/// cell read through it is absent.
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    pub bedrooms: Option<usize>,
    pub fullbaths: Option<usize>,
    pub price: Option<usize>,
    pub age: Option<usize>,
    pub basement: Option<usize>,
    pub fireplaces: Option<usize>,
    pub attic: Option<usize>,
    pub garage: Option<usize>,
    pub address: Option<usize>,
    pub building_sqft: Option<usize>,
    pub latitude: Option<usize>,
    pub longitude: Option<usize>,
    pub location: Option<usize>,
}

impl ResolvedColumns {
    /// Looks up every configured column name in `headers`.
    pub fn resolve(headers: &StringRecord, names: &ColumnConfig) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let resolved = Self {
            bedrooms: find(&names.bedrooms),
            fullbaths: find(&names.fullbaths),
            price: find(&names.price),
            age: find(&names.age),
            basement: find(&names.basement),
            fireplaces: find(&names.fireplaces),
            attic: find(&names.attic),
            garage: find(&names.garage),
            address: find(&names.address),
            building_sqft: find(&names.building_sqft),
            latitude: find(&names.latitude),
            longitude: find(&names.longitude),
            location: find(&names.location),
        };
        for (name, position) in [
            (&names.bedrooms, resolved.bedrooms),
            (&names.fullbaths, resolved.fullbaths),
            (&names.price, resolved.price),
        ] {
            if position.is_none() {
                tracing::warn!(column = %name, "indexed column not found in CSV header");
            }
        }
        resolved
    }
}

/// Reads `column` from `record`, `None` if unresolved or past the row end.
pub fn cell(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column.and_then(|i| record.get(i))
}

/// In-memory CSV table.
#[derive(Debug)]
pub struct Dataset {
    columns: ResolvedColumns,
    records: Vec<StringRecord>,
}

impl Dataset {
    /// Loads `path` and resolves `names` against its header.
    pub fn load(path: &Path, names: &ColumnConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
        let headers = reader.headers().context("Failed to read CSV header")?.clone();
        let columns = ResolvedColumns::resolve(&headers, names);

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to parse CSV file {}", path.display()))?;

        tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
        Ok(Self { columns, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn columns(&self) -> &ResolvedColumns {
        &self.columns
    }

    /// Record stored under `id`.
    pub fn record(&self, id: RecordId) -> Option<&StringRecord> {
        self.records.get(id as usize)
    }

    /// Indexed cells of every record, in load order.
    pub fn raw_rows(&self) -> impl Iterator<Item = RawRow<'_>> + '_ {
        self.records.iter().map(|record| RawRow {
            bedrooms: cell(record, self.columns.bedrooms),
            fullbaths: cell(record, self.columns.fullbaths),
            price: cell(record, self.columns.price),
        })
    }
}
