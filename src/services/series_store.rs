use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, warn};

use crate::constants::MAX_SYMBOL_LEN;
use crate::error::{Error, Result};
use crate::models::Series;
use crate::services::quote_client::QuoteClient;
use crate::services::row_decoder::{parse_bulk_csv, parse_quote_csv};
use crate::services::storage::SymbolStorage;

/// Shared series store for passing between tasks
pub type SharedSeriesStore = Arc<SeriesStore>;

/// Per-symbol summary for status displays
#[derive(Debug, Clone, Serialize)]
pub struct SymbolStatus {
    pub symbol: String,
    pub points: usize,
    pub last_date: Option<NaiveDate>,
}

/// Snapshot of cache contents
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    /// Whether the bulk dataset has been loaded this session
    pub bulk_loaded: bool,
    /// Symbols available from the bulk tier
    pub bulk_symbols: usize,
    /// Symbols held in the override tier (durably cached fetches)
    pub cached_symbols: Vec<SymbolStatus>,
}

/// Tiered symbol-to-series cache.
///
/// Lookup order: bulk tier (the multi-symbol CSV, parsed once per session),
/// override tier (durable cache of previously fetched symbols, rehydrated at
/// construction), then a remote per-symbol fetch. Fetched series are sorted,
/// deduplicated by date, stored in the override tier and persisted
/// best-effort.
///
/// Construct one instance at startup and share it by reference; series come
/// back as `Arc<Series>` so cached data cannot be mutated by callers.
pub struct SeriesStore {
    client: QuoteClient,
    storage: SymbolStorage,
    bulk: OnceCell<HashMap<String, Arc<Series>>>,
    overrides: RwLock<HashMap<String, Arc<Series>>>,
    /// One gate per symbol so concurrent requests for the same uncached
    /// symbol share a single network call
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    /// Serializes snapshot-and-save so an older snapshot can never rename
    /// over a newer one
    persist: Mutex<()>,
}

impl SeriesStore {
    /// Create a store, rehydrating the override tier from durable storage
    pub fn new(client: QuoteClient, storage: SymbolStorage) -> Self {
        let cached = storage.load();
        if !cached.is_empty() {
            info!(symbols = cached.len(), "Rehydrated symbol cache from disk");
        }

        let overrides = cached
            .into_iter()
            .map(|(symbol, series)| (symbol, Arc::new(series)))
            .collect();

        Self {
            client,
            storage,
            bulk: OnceCell::new(),
            overrides: RwLock::new(overrides),
            inflight: Mutex::new(HashMap::new()),
            persist: Mutex::new(()),
        }
    }

    /// Resolve a symbol to its full historical series.
    ///
    /// Fails with [`Error::DataUnavailable`] when no tier and no remote
    /// fetch can produce data; nothing partial is ever cached.
    pub async fn get_series(&self, symbol: &str) -> Result<Arc<Series>> {
        let symbol = normalize_symbol(symbol)?;

        // Bulk tier, loaded at most once per session
        let bulk = self.bulk.get_or_init(|| self.load_bulk_tier()).await;
        if let Some(series) = bulk.get(&symbol) {
            debug!(symbol = %symbol, points = series.len(), "Bulk tier hit");
            return Ok(series.clone());
        }

        if let Some(series) = self.overrides.read().await.get(&symbol) {
            debug!(symbol = %symbol, points = series.len(), "Override tier hit");
            return Ok(series.clone());
        }

        // Serialize concurrent fetches for the same uncached symbol
        let gate = self.inflight_gate(&symbol).await;
        let _guard = gate.lock().await;

        // A concurrent caller may have populated the cache while we waited
        if let Some(series) = self.overrides.read().await.get(&symbol) {
            drop(_guard);
            self.release_gate(&symbol, &gate).await;
            return Ok(series.clone());
        }

        let result = self.fetch_and_cache(&symbol).await;
        drop(_guard);
        self.release_gate(&symbol, &gate).await;
        result
    }

    /// Force a remote re-fetch for a symbol, overwriting any cached entry
    /// in the override tier.
    ///
    /// Lookup order is unchanged: a symbol that also exists in the bulk
    /// tier keeps resolving from the bulk tier on [`Self::get_series`],
    /// so refreshing it only updates the durable cache. The returned
    /// series is always the freshly fetched one.
    pub async fn refresh_symbol(&self, symbol: &str) -> Result<Arc<Series>> {
        let symbol = normalize_symbol(symbol)?;

        let gate = self.inflight_gate(&symbol).await;
        let _guard = gate.lock().await;
        let result = self.fetch_and_cache(&symbol).await;
        drop(_guard);
        self.release_gate(&symbol, &gate).await;
        result
    }

    /// Snapshot cache contents for status displays
    pub async fn status(&self) -> StoreStatus {
        let overrides = self.overrides.read().await;
        let mut cached_symbols: Vec<SymbolStatus> = overrides
            .iter()
            .map(|(symbol, series)| SymbolStatus {
                symbol: symbol.clone(),
                points: series.len(),
                last_date: series.last().map(|p| p.date),
            })
            .collect();
        cached_symbols.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        StoreStatus {
            bulk_loaded: self.bulk.initialized(),
            bulk_symbols: self.bulk.get().map(|m| m.len()).unwrap_or(0),
            cached_symbols,
        }
    }

    async fn fetch_and_cache(&self, symbol: &str) -> Result<Arc<Series>> {
        let text = self.client.fetch_symbol_csv(symbol).await.map_err(|e| {
            warn!(symbol = %symbol, error = %e, "Remote fetch failed");
            Error::DataUnavailable(symbol.to_string())
        })?;

        let (series, report) = parse_quote_csv(&text);
        if series.is_empty() {
            warn!(symbol = %symbol, skipped = report.skipped, "Remote source produced no valid rows");
            return Err(Error::DataUnavailable(symbol.to_string()));
        }
        debug!(symbol = %symbol, valid = report.valid, skipped = report.skipped, "Parsed remote series");

        let series = Arc::new(series);
        self.overrides
            .write()
            .await
            .insert(symbol.to_string(), series.clone());

        // Snapshot and save under one lock: writers for different symbols
        // must persist complete snapshots in order, so each write to disk
        // contains every insert that happened before it
        let _persist = self.persist.lock().await;
        let snapshot: HashMap<String, Series> = self
            .overrides
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), (**v).clone()))
            .collect();

        // Best-effort persistence; failures never block the return path
        self.storage.save(&snapshot);

        Ok(series)
    }

    async fn load_bulk_tier(&self) -> HashMap<String, Arc<Series>> {
        let text = match self.client.fetch_bulk_csv().await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Bulk dataset unreachable, continuing with empty bulk tier");
                return HashMap::new();
            }
        };

        let (grouped, report) = parse_bulk_csv(&text);
        info!(
            symbols = grouped.len(),
            valid = report.valid,
            skipped = report.skipped,
            "Loaded bulk dataset"
        );

        grouped
            .into_iter()
            .map(|(symbol, series)| (symbol, Arc::new(series)))
            .collect()
    }

    async fn inflight_gate(&self, symbol: &str) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().await;
        inflight
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn release_gate(&self, symbol: &str, gate: &Arc<Mutex<()>>) {
        let mut inflight = self.inflight.lock().await;
        // Drop the map entry only when no other task is still waiting on it
        // (map reference + our local reference)
        if Arc::strong_count(gate) <= 2 {
            inflight.remove(symbol);
        }
    }
}

fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(Error::InvalidInput("Empty ticker symbol".to_string()));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(Error::InvalidInput(format!(
            "Ticker symbol too long: {}",
            symbol
        )));
    }
    Ok(symbol)
}
