use std::path::PathBuf;

use crate::constants::{DEFAULT_BULK_SOURCE, DEFAULT_QUOTE_URL};

/// Get chart data directory from environment variable or use default
pub fn get_chart_data_dir() -> PathBuf {
    std::env::var("FRANCHART_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("chart_data"))
}

/// Bulk historical CSV location (URL or local path)
pub fn get_bulk_source() -> String {
    std::env::var("FRANCHART_BULK_URL").unwrap_or_else(|_| DEFAULT_BULK_SOURCE.to_string())
}

/// Per-symbol quote CSV URL template with a `{symbol}` placeholder
pub fn get_quote_url_template() -> String {
    std::env::var("FRANCHART_QUOTE_URL").unwrap_or_else(|_| DEFAULT_QUOTE_URL.to_string())
}
