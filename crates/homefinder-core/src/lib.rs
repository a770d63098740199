//! # `Homefinder` Core
//!
//! In-memory inverted indexes for multi-attribute property search.
//!
//! Records (homes) are loaded once from raw text cells. Each record is posted
//! under its bedroom count, its full-bath count and a fixed-width price bin.
//! Queries combine bedroom equality, a full-bath threshold and a price range
//! by intersecting postings and then exact-filtering prices.
//!
//! ## Features
//!
//! - **Custom hash table**: FNV-1a open addressing with tombstones and a
//!   get-or-create default-factory variant
//! - **Two posting stores**: unordered hash sets, or sorted lists with
//!   two-pointer merges
//! - **Lenient parsing**: `"$320,000"`, `"2.0"`, `"3 beds"` all parse
//! - **Shared snapshots**: atomic swap of rebuilt indexes for readers
//!
//! ## Quick Start
//!
//! ```rust
//! use homefinder_core::{build_index, PropertyQuery, RawRow, SortedPostingIndex};
//!
//! let rows = [
//!     RawRow::new("4", "3", "320000"),
//!     RawRow::new("4", "2", "280000"),
//!     RawRow::new("3", "3", "310000"),
//!     RawRow::new("4", "3", "410000"),
//! ];
//! let (index, _report) = build_index(SortedPostingIndex::new(50_000)?, rows);
//!
//! let hits = PropertyQuery::new()
//!     .bedrooms(4)
//!     .min_fullbaths(3)
//!     .price_between(300_000.0, 350_000.0)
//!     .execute(&index)?;
//! assert_eq!(hits, vec![0]);
//! # Ok::<(), homefinder_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Bin arithmetic converts between f64 prices and u64 bin indices.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]

pub mod build;
pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod hash_table;
pub mod parse;
#[cfg(test)]
mod parse_tests;
pub mod posting;
pub mod query;
#[cfg(test)]
mod query_tests;
pub mod shared;

pub use build::{build_index, LoadReport, RawRow};
pub use config::{ConfigError, HomefinderConfig};
pub use error::{Error, Result};
pub use hash_table::{DefaultHashTable, HashTable};
pub use posting::{
    Attribute, AttributeIndex, IndexVariant, ParseCounts, PostingKey, Postings, RecordId,
    SetPostingIndex, SortedPostingIndex,
};
pub use query::{PriceRange, PropertyQuery};
pub use shared::SharedIndex;
