//! Error types for `Homefinder`.
//!
//! Absence is not an error anywhere in the engine: unparsable attribute values
//! are skipped and unseen posting keys yield empty results. The variants below
//! cover structural misuse (bad construction parameters, querying an
//! unfinalized sorted-list store) and the ambient configuration/IO layer.

use thiserror::Error;

/// Result type alias for `Homefinder` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `Homefinder` operations.
///
/// Error codes follow the pattern `HF-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Price bin width must be strictly positive (HF-001).
    #[error("[HF-001] Invalid price bin width {0}: must be greater than zero")]
    InvalidPriceBin(u64),

    /// Hash table capacity or load factor out of range (HF-002).
    #[error("[HF-002] Invalid hash table parameters: capacity {capacity}, load factor {load_factor}")]
    InvalidTableParams {
        /// Requested initial capacity.
        capacity: usize,
        /// Requested load factor.
        load_factor: f64,
    },

    /// Direct lookup of a key that is not present (HF-003).
    #[error("[HF-003] Key not found: {0}")]
    KeyNotFound(String),

    /// Sorted-list store queried while still loading (HF-004).
    ///
    /// Call `finalize()` after the last `add_row` and before querying.
    #[error("[HF-004] Posting lists are not finalized; call finalize() before querying")]
    NotFinalized,

    /// Query bounds that cannot describe a price range (HF-005).
    #[error("[HF-005] Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration error (HF-006).
    #[error("[HF-006] Configuration error: {0}")]
    Config(String),

    /// IO error (HF-007).
    #[error("[HF-007] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code (e.g., "HF-004").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidPriceBin(_) => "HF-001",
            Self::InvalidTableParams { .. } => "HF-002",
            Self::KeyNotFound(_) => "HF-003",
            Self::NotFinalized => "HF-004",
            Self::InvalidQuery(_) => "HF-005",
            Self::Config(_) => "HF-006",
            Self::Io(_) => "HF-007",
        }
    }

    /// Returns true if the caller can fix the situation and retry.
    ///
    /// `NotFinalized` is recoverable by finalizing; bad construction
    /// parameters are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidPriceBin(_) | Self::InvalidTableParams { .. }
        )
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
