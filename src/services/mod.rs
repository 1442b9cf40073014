pub mod daily_table;
pub mod quote_client;
pub mod range_projector;
pub mod row_decoder;
pub mod series_store;
pub mod storage;

pub use quote_client::QuoteClient;
pub use row_decoder::{parse_bulk_csv, parse_quote_csv, ParseReport};
pub use series_store::{SeriesStore, SharedSeriesStore, StoreStatus, SymbolStatus};
pub use storage::SymbolStorage;
