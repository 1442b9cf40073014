//! CSV Source Formats and Runtime Defaults
//!
//! Two CSV shapes feed the series cache:
//!
//! **Bulk source**: one document covering many symbols,
//! `date,symbol,open,high,low,close,adjClose,volume`. Fetched once per
//! session; `adjClose` is preferred as the canonical price when present.
//!
//! **Quote source**: one document per symbol,
//! `date,open,high,low,close,volume`. Ascending order is not guaranteed by
//! the provider, so rows are sorted after parse.

/// Column count for the bulk historical CSV
pub const BULK_CSV_COLUMNS: usize = 8;

/// Column indices for the bulk historical CSV (0-indexed)
pub mod bulk_column {
    pub const DATE: usize = 0;
    pub const SYMBOL: usize = 1;
    pub const OPEN: usize = 2;
    pub const HIGH: usize = 3;
    pub const LOW: usize = 4;
    pub const CLOSE: usize = 5;
    pub const ADJ_CLOSE: usize = 6;
    pub const VOLUME: usize = 7;
}

/// Column count for the per-symbol quote CSV
pub const QUOTE_CSV_COLUMNS: usize = 6;

/// Column indices for the per-symbol quote CSV (0-indexed)
pub mod quote_column {
    pub const DATE: usize = 0;
    pub const OPEN: usize = 1;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const VOLUME: usize = 5;
}

/// Date format used by both CSV sources (ISO-8601 calendar date)
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d";

/// Bound on remote fetches; the public endpoints carry no SLA
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// File name of the durable symbol cache inside the data directory
pub const STORAGE_FILE_NAME: &str = "cached_symbols.json";

/// Default bulk source when `FRANCHART_BULK_URL` is unset.
/// A value without an http(s) scheme is read as a local file path.
pub const DEFAULT_BULK_SOURCE: &str = "data/franchise_stocks.csv";

/// Default quote URL template when `FRANCHART_QUOTE_URL` is unset.
/// `{symbol}` is replaced with the uppercase ticker.
pub const DEFAULT_QUOTE_URL: &str = "https://stooq.com/q/d/l/?s={symbol}&i=d";

/// Franchise watchlist loaded when the chart command gets no symbols.
/// ^GSPC is the S&P 500 baseline.
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "^GSPC", "MCD", "YUM", "QSR", "WEN", "DPZ", "MAR", "HLT", "PLNT", "DNUT",
];

/// Longest accepted ticker symbol
pub const MAX_SYMBOL_LEN: usize = 10;

/// Number of trailing points shown in the daily-change table view
pub const TABLE_SLICE_LEN: usize = 30;
