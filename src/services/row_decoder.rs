//! Typed row decoders for the two CSV source formats.
//!
//! Each row decodes to a tagged outcome instead of failing the whole parse:
//! a row missing its symbol, date, or a numeric close price is skipped and
//! counted, everything else becomes a [`PricePoint`] with non-numeric
//! optional fields nulled out.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use csv::StringRecord;

use crate::constants::{bulk_column, quote_column, BULK_CSV_COLUMNS, CSV_DATE_FORMAT, QUOTE_CSV_COLUMNS};
use crate::models::{PricePoint, Series};

/// Outcome of decoding a single CSV row
#[derive(Debug)]
pub enum RowOutcome<T> {
    Valid(T),
    Skipped(SkipReason),
}

/// Why a row was dropped during decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer columns than the source format defines
    ColumnCount,
    /// Bulk row without a resolvable symbol
    MissingSymbol,
    /// Unparseable date field
    BadDate,
    /// Close (and adjusted close) not numeric
    BadClose,
}

/// Aggregated result of parsing a full source document
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseReport {
    pub valid: usize,
    pub skipped: usize,
}

impl ParseReport {
    fn record<T>(&mut self, outcome: &RowOutcome<T>) {
        match outcome {
            RowOutcome::Valid(_) => self.valid += 1,
            RowOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

fn opt_f64(record: &StringRecord, idx: usize) -> Option<f64> {
    record
        .get(idx)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn opt_u64(record: &StringRecord, idx: usize) -> Option<u64> {
    let raw = record.get(idx)?.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    // Some providers emit volume as a float (e.g. "1234.0")
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
}

/// Parse a calendar date, tolerating datetime strings by taking the date part
fn parse_date(record: &StringRecord, idx: usize) -> Option<NaiveDate> {
    let raw = record.get(idx)?.trim();
    let date_part = raw
        .split(|c| c == ' ' || c == 'T')
        .next()
        .unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, CSV_DATE_FORMAT).ok()
}

/// Decode one bulk-source row: `date,symbol,open,high,low,close,adjClose,volume`.
///
/// The canonical price prefers `adjClose`, falling back to `close`.
pub fn decode_bulk_row(record: &StringRecord) -> RowOutcome<(String, PricePoint)> {
    if record.len() < BULK_CSV_COLUMNS {
        return RowOutcome::Skipped(SkipReason::ColumnCount);
    }

    let symbol = match record.get(bulk_column::SYMBOL) {
        Some(s) if !s.trim().is_empty() => s.trim().to_uppercase(),
        _ => return RowOutcome::Skipped(SkipReason::MissingSymbol),
    };

    let date = match parse_date(record, bulk_column::DATE) {
        Some(date) => date,
        None => return RowOutcome::Skipped(SkipReason::BadDate),
    };

    let close = opt_f64(record, bulk_column::CLOSE);
    let adj_close = opt_f64(record, bulk_column::ADJ_CLOSE);
    let price = match adj_close.or(close) {
        Some(price) => price,
        None => return RowOutcome::Skipped(SkipReason::BadClose),
    };

    RowOutcome::Valid((
        symbol,
        PricePoint {
            date,
            price,
            open: opt_f64(record, bulk_column::OPEN),
            high: opt_f64(record, bulk_column::HIGH),
            low: opt_f64(record, bulk_column::LOW),
            volume: opt_u64(record, bulk_column::VOLUME),
        },
    ))
}

/// Decode one quote-source row: `date,open,high,low,close,volume`
pub fn decode_quote_row(record: &StringRecord) -> RowOutcome<PricePoint> {
    if record.len() < QUOTE_CSV_COLUMNS {
        return RowOutcome::Skipped(SkipReason::ColumnCount);
    }

    let date = match parse_date(record, quote_column::DATE) {
        Some(date) => date,
        None => return RowOutcome::Skipped(SkipReason::BadDate),
    };

    let price = match opt_f64(record, quote_column::CLOSE) {
        Some(price) => price,
        None => return RowOutcome::Skipped(SkipReason::BadClose),
    };

    RowOutcome::Valid(PricePoint {
        date,
        price,
        open: opt_f64(record, quote_column::OPEN),
        high: opt_f64(record, quote_column::HIGH),
        low: opt_f64(record, quote_column::LOW),
        volume: opt_u64(record, quote_column::VOLUME),
    })
}

/// Parse a full bulk CSV document, grouping points by symbol.
///
/// Per-symbol series come back sorted ascending with duplicate dates
/// collapsed (last occurrence wins).
pub fn parse_bulk_csv(text: &str) -> (HashMap<String, Series>, ParseReport) {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut report = ParseReport::default();
    let mut grouped: HashMap<String, BTreeMap<NaiveDate, PricePoint>> = HashMap::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                report.skipped += 1;
                continue;
            }
        };

        let outcome = decode_bulk_row(&record);
        report.record(&outcome);
        if let RowOutcome::Valid((symbol, point)) = outcome {
            grouped.entry(symbol).or_default().insert(point.date, point);
        }
    }

    let grouped = grouped
        .into_iter()
        .map(|(symbol, by_date)| (symbol, by_date.into_values().collect()))
        .collect();
    (grouped, report)
}

/// Parse a full single-symbol CSV document.
///
/// Points come back sorted ascending with duplicate dates collapsed
/// (last occurrence wins); the provider does not guarantee order.
pub fn parse_quote_csv(text: &str) -> (Series, ParseReport) {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut report = ParseReport::default();
    let mut by_date: BTreeMap<NaiveDate, PricePoint> = BTreeMap::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                report.skipped += 1;
                continue;
            }
        };

        let outcome = decode_quote_row(&record);
        report.record(&outcome);
        if let RowOutcome::Valid(point) = outcome {
            by_date.insert(point.date, point);
        }
    }

    (by_date.into_values().collect(), report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk_record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_bulk_row_prefers_adj_close() {
        let record = bulk_record(&[
            "2024-03-01", "MCD", "99.0", "101.0", "98.5", "100.0", "99.25", "12000",
        ]);
        match decode_bulk_row(&record) {
            RowOutcome::Valid((symbol, point)) => {
                assert_eq!(symbol, "MCD");
                assert_eq!(point.price, 99.25);
                assert_eq!(point.open, Some(99.0));
                assert_eq!(point.volume, Some(12000));
            }
            RowOutcome::Skipped(reason) => panic!("row skipped: {:?}", reason),
        }
    }

    #[test]
    fn test_bulk_row_falls_back_to_close() {
        let record = bulk_record(&[
            "2024-03-01", "MCD", "99.0", "101.0", "98.5", "100.0", "", "12000",
        ]);
        match decode_bulk_row(&record) {
            RowOutcome::Valid((_, point)) => assert_eq!(point.price, 100.0),
            RowOutcome::Skipped(reason) => panic!("row skipped: {:?}", reason),
        }
    }

    #[test]
    fn test_bulk_row_nulls_non_numeric_optionals() {
        let record = bulk_record(&[
            "2024-03-01", "mcd", "n/a", "NaN", "", "100.0", "", "abc",
        ]);
        match decode_bulk_row(&record) {
            RowOutcome::Valid((symbol, point)) => {
                assert_eq!(symbol, "MCD"); // uppercase-normalized
                assert_eq!(point.open, None);
                assert_eq!(point.high, None);
                assert_eq!(point.low, None);
                assert_eq!(point.volume, None);
            }
            RowOutcome::Skipped(reason) => panic!("row skipped: {:?}", reason),
        }
    }

    #[test]
    fn test_bulk_row_skips_bad_rows() {
        let missing_symbol = bulk_record(&[
            "2024-03-01", "", "1", "1", "1", "1", "1", "1",
        ]);
        let bad_date = bulk_record(&[
            "03/01/2024", "MCD", "1", "1", "1", "1", "1", "1",
        ]);
        let bad_close = bulk_record(&[
            "2024-03-01", "MCD", "1", "1", "1", "oops", "", "1",
        ]);
        let short = bulk_record(&["2024-03-01", "MCD"]);

        assert!(matches!(
            decode_bulk_row(&missing_symbol),
            RowOutcome::Skipped(SkipReason::MissingSymbol)
        ));
        assert!(matches!(
            decode_bulk_row(&bad_date),
            RowOutcome::Skipped(SkipReason::BadDate)
        ));
        assert!(matches!(
            decode_bulk_row(&bad_close),
            RowOutcome::Skipped(SkipReason::BadClose)
        ));
        assert!(matches!(
            decode_bulk_row(&short),
            RowOutcome::Skipped(SkipReason::ColumnCount)
        ));
    }

    #[test]
    fn test_quote_row_tolerates_datetime_strings() {
        let record = StringRecord::from(vec![
            "2024-03-01 00:00:00", "99.0", "101.0", "98.5", "100.0", "12000",
        ]);
        match decode_quote_row(&record) {
            RowOutcome::Valid(point) => {
                assert_eq!(point.date.to_string(), "2024-03-01");
                assert_eq!(point.price, 100.0);
            }
            RowOutcome::Skipped(reason) => panic!("row skipped: {:?}", reason),
        }
    }

    #[test]
    fn test_parse_bulk_csv_groups_and_reports() {
        let text = "\
date,symbol,open,high,low,close,adjClose,volume
2024-03-01,MCD,99,101,98,100,100,1000
2024-03-04,MCD,100,103,100,102,102,1100
2024-03-01,YUM,50,51,49,50.5,50.5,900
bogus-date,MCD,1,1,1,1,1,1
2024-03-05,,1,1,1,1,1,1
";
        let (grouped, report) = parse_bulk_csv(text);
        assert_eq!(report.valid, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["MCD"].len(), 2);
        assert_eq!(grouped["YUM"].len(), 1);
    }

    #[test]
    fn test_parse_quote_csv_sorts_and_dedups() {
        let text = "\
date,open,high,low,close,volume
2024-03-05,101,104,101,103,1200
2024-03-01,99,101,98,100,1000
2024-03-05,101,104,101,103.5,1300
";
        let (series, report) = parse_quote_csv(text);
        assert_eq!(report.valid, 3);
        assert_eq!(series.len(), 2);
        assert!(series[0].date < series[1].date);
        // Last occurrence wins for a duplicate date
        assert_eq!(series[1].price, 103.5);
    }

    #[test]
    fn test_parse_quote_csv_empty_document() {
        let (series, report) = parse_quote_csv("date,open,high,low,close,volume\n");
        assert!(series.is_empty());
        assert_eq!(report.valid, 0);
    }
}
