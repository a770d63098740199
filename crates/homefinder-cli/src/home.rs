//! Rendering of matched records.

use csv::StringRecord;
use homefinder_core::parse::{parse_int_like, parse_price_like};
use homefinder_core::RecordId;
use serde::Serialize;

use crate::dataset::{cell, ResolvedColumns};
use crate::filters::DATASET_YEAR;

const NOT_AVAILABLE: &str = "N/A";

/// One matched home as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Home {
    pub id: RecordId,
    pub bedrooms: String,
    pub bathrooms: String,
    pub price: Option<f64>,
    pub age: Option<i64>,
    pub year_built: Option<i64>,
    pub address: String,
    pub building_sqft: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Home {
    pub fn from_record(id: RecordId, record: &StringRecord, columns: &ResolvedColumns) -> Self {
        let text = |column| {
            cell(record, column).map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
        };
        let age = cell(record, columns.age).and_then(parse_int_like);

        let mut latitude = cell(record, columns.latitude).and_then(parse_coordinate);
        let mut longitude = cell(record, columns.longitude).and_then(parse_coordinate);
        if latitude.is_none() && longitude.is_none() {
            if let Some((lat, lon)) = cell(record, columns.location).and_then(parse_location) {
                latitude = Some(lat);
                longitude = Some(lon);
            }
        }

        Self {
            id,
            bedrooms: text(columns.bedrooms),
            bathrooms: text(columns.fullbaths),
            price: cell(record, columns.price).and_then(parse_price_like),
            age,
            year_built: age.map(|a| DATASET_YEAR - a),
            address: text(columns.address),
            building_sqft: text(columns.building_sqft),
            latitude,
            longitude,
        }
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a combined `"(lat, lon)"` cell.
pub fn parse_location(raw: &str) -> Option<(f64, f64)> {
    let inner = raw.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace());
    let (lat, lon) = inner.split_once(',')?;
    if lon.contains(',') {
        return None;
    }
    Some((parse_coordinate(lat)?, parse_coordinate(lon)?))
}
