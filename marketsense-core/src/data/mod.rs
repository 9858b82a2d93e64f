//! Offline ingestion of daily series.
//!
//! Loaders turn a provider payload or a CSV file into a canonical series
//! (ascending, unique dates) ready for the engines, and parse the provider's
//! quote snapshot. Fetching over the network is left to the caller.

pub mod alpha_vantage;
pub mod canonicalize;
pub mod csv_import;

pub use alpha_vantage::{load_daily, load_quote, parse_daily, parse_quote, DailySeries, StockQuote};
pub use canonicalize::{canonicalize, Canonicalized};
pub use csv_import::{load_csv, read_csv};

use thiserror::Error;

/// Structured error types for data loading.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("provider throttled the request: {0}")]
    Throttled(String),

    #[error("no data found in payload")]
    NoData,

    #[error("invalid {field} value '{value}'")]
    Parse { field: &'static str, value: String },
}
