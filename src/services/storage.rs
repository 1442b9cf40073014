use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::constants::STORAGE_FILE_NAME;
use crate::error::{Error, Result};
use crate::models::Series;

/// Durable cache of per-symbol fetched series.
///
/// One JSON object keyed by uppercase symbol, dates serialized as ISO-8601
/// strings. The file is rewritten in full on every update (replace-and-
/// serialize, not incremental) via a temp file and rename.
pub struct SymbolStorage {
    path: PathBuf,
}

impl SymbolStorage {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(STORAGE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load previously cached symbols.
    ///
    /// A missing file yields an empty map; a corrupt file is logged and
    /// treated as empty rather than failing startup.
    pub fn load(&self) -> HashMap<String, Series> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Ignoring corrupt symbol cache");
                HashMap::new()
            }
        }
    }

    /// Persist the full override tier.
    ///
    /// Best-effort: failures are logged and swallowed so caching never
    /// blocks the data-return path.
    pub fn save(&self, entries: &HashMap<String, Series>) {
        match self.try_save(entries) {
            Ok(()) => info!(path = ?self.path, symbols = entries.len(), "Persisted symbol cache"),
            Err(e) => warn!(path = ?self.path, error = %e, "Failed to persist symbol cache"),
        }
    }

    fn try_save(&self, entries: &HashMap<String, Series>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(entries)
            .map_err(|e| Error::Parse(format!("Failed to serialize symbol cache: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::NaiveDate;

    fn point(date: &str, price: f64) -> PricePoint {
        PricePoint::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), price)
    }

    #[test]
    fn test_round_trip_preserves_date_price_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SymbolStorage::new(dir.path());

        let mut entries = HashMap::new();
        let mut mcd = vec![point("2024-03-01", 100.0), point("2024-03-04", 102.0)];
        mcd[0].volume = Some(1000);
        entries.insert("MCD".to_string(), mcd);

        storage.save(&entries);
        let reloaded = storage.load();

        assert_eq!(reloaded.len(), 1);
        let series = &reloaded["MCD"];
        assert_eq!(series.len(), 2);
        for (before, after) in entries["MCD"].iter().zip(series) {
            assert_eq!(before.date, after.date);
            assert_eq!(before.price, after.price);
        }
        assert_eq!(series[0].volume, Some(1000));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SymbolStorage::new(dir.path());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SymbolStorage::new(dir.path());
        fs::write(storage.path(), "not json {{{").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_dates_serialize_as_iso_strings() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SymbolStorage::new(dir.path());

        let mut entries = HashMap::new();
        entries.insert("WEN".to_string(), vec![point("2024-03-01", 19.5)]);
        storage.save(&entries);

        let raw = fs::read_to_string(storage.path()).unwrap();
        assert!(raw.contains("\"2024-03-01\""));
    }
}
