use chrono::NaiveDate;
use serde::Serialize;

/// One row of the daily-change table view.
///
/// `change` fields are `None` on the first row of a series, where no prior
/// point exists to compare against.
#[derive(Debug, Clone, Serialize)]
pub struct DailyChange {
    pub date: NaiveDate,

    /// Canonical (adjusted/close) price for the day
    pub price: f64,

    /// Absolute change from the previous point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,

    /// Percent change from the previous point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}
