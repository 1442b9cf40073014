use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily bar for a single symbol.
///
/// `price` is the canonical series value: the adjusted close when the source
/// provides one, the plain close otherwise. Optional fields stay `None` when
/// the source row carries a missing or non-numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar day of the bar (no intraday granularity)
    pub date: NaiveDate,

    /// Adjusted/close price used as the canonical series value
    pub price: f64,

    /// Opening price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,

    /// Highest price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,

    /// Lowest price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,

    /// Trading volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PricePoint {
    /// Create a point with only a date and canonical price
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }
}

/// Chart-ready point consumed by the rendering collaborator.
///
/// In dollar mode `y == price`; in percent mode `y` is the change from the
/// basis price and `price` keeps the raw value for tooltips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: f64,
    pub price: f64,
}
