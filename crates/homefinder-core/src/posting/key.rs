//! Posting keys and the attributes they are derived from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Integer-valued attributes indexed by exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Bedroom count.
    Bedrooms,
    /// Full-bath count.
    FullBaths,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bedrooms => f.write_str("Bedrooms"),
            Self::FullBaths => f.write_str("FullBaths"),
        }
    }
}

impl FromStr for Attribute {
    type Err = Error;

    /// Accepts the canonical names and the common short forms, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bedrooms" | "beds" => Ok(Self::Bedrooms),
            "fullbaths" | "full_baths" | "full baths" | "baths" | "bathrooms" => {
                Ok(Self::FullBaths)
            }
            other => Err(Error::InvalidQuery(format!("unknown attribute '{other}'"))),
        }
    }
}

/// Identity of one posting collection.
///
/// The `Display` form is the canonical key string (`Bedrooms=4`,
/// `FullBaths=2`, `PriceBin=[300000,350000)`); it is also what the hash table
/// hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostingKey {
    /// Exact bedroom count.
    Bedrooms(u32),
    /// Exact full-bath count.
    FullBaths(u32),
    /// Half-open price interval `[lo, hi)`.
    PriceBin {
        /// Inclusive lower bound.
        lo: u64,
        /// Exclusive upper bound.
        hi: u64,
    },
}

impl PostingKey {
    /// Key for an exact attribute value.
    #[must_use]
    pub const fn attribute(attribute: Attribute, value: u32) -> Self {
        match attribute {
            Attribute::Bedrooms => Self::Bedrooms(value),
            Attribute::FullBaths => Self::FullBaths(value),
        }
    }

    /// Key for bin number `bin` of width `width`.
    #[must_use]
    pub const fn price_bin(bin: u64, width: u64) -> Self {
        let lo = bin.saturating_mul(width);
        Self::PriceBin {
            lo,
            hi: lo.saturating_add(width),
        }
    }
}

impl fmt::Display for PostingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bedrooms(v) => write!(f, "Bedrooms={v}"),
            Self::FullBaths(v) => write!(f, "FullBaths={v}"),
            Self::PriceBin { lo, hi } => write!(f, "PriceBin=[{lo},{hi})"),
        }
    }
}
