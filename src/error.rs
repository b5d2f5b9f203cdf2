//! Error types for the schedule model and loaders.

use thiserror::Error;

use crate::model::Instant;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A time domain whose lower bound lies after its upper bound.
    #[error("invalid time domain: {min} is after {max}")]
    InvalidDomain { min: Instant, max: Instant },

    /// A span that ends before it starts.
    #[error("span ends ({end}) before it starts ({start})")]
    InvertedSpan { start: Instant, end: Instant },

    /// A viewport must cover a non-empty range.
    #[error("viewport must start before it ends ({start} .. {end})")]
    InvalidViewport { start: Instant, end: Instant },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required columns could not be matched in the CSV header.
    #[error("CSV is missing required columns {missing:?} (found headers: {found:?})")]
    MissingColumns {
        missing: Vec<&'static str>,
        found: Vec<String>,
    },

    /// Every data row was rejected or the file had none.
    #[error("no valid jobs found ({skipped} rows skipped)")]
    NoRows { skipped: usize },
}
