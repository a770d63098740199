//! Caller-side filters applied after the index query.
//!
//! Ages are relative to the dataset year (2018): `year_built = 2018 - age`.

use std::ops::RangeInclusive;

use csv::StringRecord;
use homefinder_core::parse::parse_int_like;
use homefinder_core::RecordId;
use serde::Serialize;

use crate::dataset::{cell, Dataset, ResolvedColumns};

/// Year the dataset was collected.
pub const DATASET_YEAR: i64 = 2018;

/// Year-built band selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearBuilt {
    After2020,
    From2010To2020,
    From2000To2009,
    From1990To1999,
    Before1990,
    Any,
}

impl YearBuilt {
    /// Maps a band label; unknown labels select every age.
    ///
    /// A blank label means no year filter at all, so rows without an age
    /// are kept.
    pub fn from_label(label: &str) -> Option<Self> {
        let band = match label.trim() {
            "" => return None,
            "After 2020" => Self::After2020,
            "2010-2020" => Self::From2010To2020,
            "2000-2009" => Self::From2000To2009,
            "1990-1999" => Self::From1990To1999,
            "Before 1990" => Self::Before1990,
            _ => Self::Any,
        };
        Some(band)
    }

    /// Accepted building ages.
    pub fn age_range(self) -> RangeInclusive<i64> {
        match self {
            Self::After2020 => -10..=0,
            Self::From2010To2020 => 0..=8,
            Self::From2000To2009 => 9..=18,
            Self::From1990To1999 => 19..=28,
            Self::Before1990 => 29..=9999,
            Self::Any => 0..=9999,
        }
    }
}

/// Required amenities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Features {
    pub basement: bool,
    pub fireplace: bool,
    pub attic: bool,
    pub garage: bool,
}

impl Features {
    pub fn any(self) -> bool {
        self.basement || self.fireplace || self.attic || self.garage
    }
}

/// Filters that need cells the index does not store.
#[derive(Debug, Clone, Default)]
pub struct CallerFilters {
    pub year_built: Option<YearBuilt>,
    pub features: Features,
}

impl CallerFilters {
    pub fn is_empty(&self) -> bool {
        self.year_built.is_none() && !self.features.any()
    }

    /// Returns true if `record` passes every active filter.
    pub fn matches(&self, record: &StringRecord, columns: &ResolvedColumns) -> bool {
        let int = |column| cell(record, column).and_then(parse_int_like);

        if let Some(band) = self.year_built {
            match int(columns.age) {
                Some(age) if band.age_range().contains(&age) => {}
                _ => return false,
            }
        }

        // Basement codes: 1 = none, 2+ = present.
        if self.features.basement && !int(columns.basement).is_some_and(|v| v > 1) {
            return false;
        }
        if self.features.fireplace && !int(columns.fireplaces).is_some_and(|v| v != 0) {
            return false;
        }
        if self.features.attic && !int(columns.attic).is_some_and(|v| v != 0) {
            return false;
        }
        if self.features.garage && !int(columns.garage).is_some_and(|v| v != 0) {
            return false;
        }
        true
    }

    /// Keeps ids whose record passes, preserving order.
    pub fn apply(&self, ids: Vec<RecordId>, dataset: &Dataset) -> Vec<RecordId> {
        if self.is_empty() {
            return ids;
        }
        ids.into_iter()
            .filter(|&id| {
                dataset
                    .record(id)
                    .is_some_and(|record| self.matches(record, dataset.columns()))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "filters_tests.rs"]
mod filters_tests;
