//! Index construction and timed search over a loaded dataset.

use std::time::Instant;

use anyhow::Result;
use clap::ValueEnum;
use homefinder_core::config::IndexConfig;
use homefinder_core::{
    build_index, AttributeIndex, IndexVariant, LoadReport, PropertyQuery, RecordId,
    SetPostingIndex, SortedPostingIndex,
};
use serde::Serialize;

use crate::dataset::Dataset;
use crate::filters::{CallerFilters, Features};
use crate::home::Home;

/// Which posting store(s) answer a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Method {
    Hashset,
    Posting,
    #[default]
    Both,
}

impl Method {
    fn uses(self, variant: IndexVariant) -> bool {
        match (self, variant) {
            (Self::Both, _) => true,
            (Self::Hashset, IndexVariant::Hashset) | (Self::Posting, IndexVariant::Posting) => {
                true
            }
            _ => false,
        }
    }
}

/// Both posting stores built over the same dataset.
pub struct Indexes {
    pub hashset: SetPostingIndex,
    pub posting: SortedPostingIndex,
    pub reports: [LoadReport; 2],
}

impl Indexes {
    pub fn build(dataset: &Dataset, config: &IndexConfig) -> Result<Self> {
        let (hashset, set_report) =
            build_index(SetPostingIndex::from_config(config)?, dataset.raw_rows());
        let (posting, list_report) =
            build_index(SortedPostingIndex::from_config(config)?, dataset.raw_rows());
        Ok(Self {
            hashset,
            posting,
            reports: [set_report, list_report],
        })
    }
}

/// Everything one `query` invocation asks for.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: PropertyQuery,
    pub filters: CallerFilters,
    pub method: Method,
    pub limit: usize,
    /// Year-built label as typed, echoed back.
    pub year_label: Option<String>,
}

/// Result count and wall time of one variant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Timing {
    pub count: usize,
    pub time_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Performance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashset: Option<Timing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting: Option<Timing>,
}

/// Echo of the effective query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEcho {
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub price_min: f64,
    /// `None` when unbounded.
    pub price_max: Option<f64>,
    pub year_built: Option<String>,
    pub features: Features,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub homes: Vec<Home>,
    pub performance: Performance,
    pub query: QueryEcho,
}

/// Runs `request` against the selected variant(s).
///
/// Homes are rendered from the sorted-list result when it ran and matched,
/// otherwise from the hash-set result.
pub fn search(
    dataset: &Dataset,
    indexes: &Indexes,
    request: &SearchRequest,
) -> Result<SearchResponse> {
    let mut performance = Performance::default();
    let mut set_ids = Vec::new();
    let mut list_ids = Vec::new();

    if request.method.uses(IndexVariant::Hashset) {
        let (ids, timing) = timed(dataset, &indexes.hashset, request)?;
        set_ids = ids;
        performance.hashset = Some(timing);
    }
    if request.method.uses(IndexVariant::Posting) {
        let (ids, timing) = timed(dataset, &indexes.posting, request)?;
        list_ids = ids;
        performance.posting = Some(timing);
    }

    let primary = if list_ids.is_empty() { &set_ids } else { &list_ids };
    let homes = primary
        .iter()
        .take(request.limit)
        .filter_map(|&id| {
            dataset
                .record(id)
                .map(|record| Home::from_record(id, record, dataset.columns()))
        })
        .collect();

    Ok(SearchResponse {
        homes,
        performance,
        query: QueryEcho {
            bedrooms: request.query.bedrooms,
            bathrooms: request.query.min_fullbaths,
            price_min: request.query.price.min,
            price_max: Some(request.query.price.max).filter(|m| m.is_finite()),
            year_built: request.year_label.clone(),
            features: request.filters.features,
        },
    })
}

fn timed<I: AttributeIndex>(
    dataset: &Dataset,
    index: &I,
    request: &SearchRequest,
) -> Result<(Vec<RecordId>, Timing)> {
    let start = Instant::now();
    let ids = request.query.execute(index)?;
    let ids = request.filters.apply(ids, dataset);
    let timing = Timing {
        count: ids.len(),
        time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    tracing::debug!(
        variant = %index.variant(),
        count = timing.count,
        time_ms = timing.time_ms,
        "query executed"
    );
    Ok((ids, timing))
}
