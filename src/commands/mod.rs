pub mod chart;
pub mod refresh;
pub mod serve;
pub mod status;

use crate::error::Result;
use crate::services::{QuoteClient, SeriesStore, SymbolStorage};
use crate::utils::get_chart_data_dir;

/// Build the one series store an entry point shares with everything else,
/// configured from the environment.
pub(crate) fn build_store() -> Result<SeriesStore> {
    let client = QuoteClient::new()?;
    let storage = SymbolStorage::new(&get_chart_data_dir());
    Ok(SeriesStore::new(client, storage))
}
