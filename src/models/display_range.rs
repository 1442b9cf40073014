use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Named display window for slicing a series.
///
/// `1d` and `5d` are trading-day counts taken from the tail of the series,
/// since daily bars do not exist for weekends and holidays. All other ranges
/// are calendar cutoffs from "now"; `max` leaves the series untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayRange {
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "5d")]
    Day5,
    #[serde(rename = "1mo")]
    Month1,
    #[serde(rename = "3mo")]
    Month3,
    #[serde(rename = "6mo")]
    Month6,
    #[serde(rename = "ytd")]
    Ytd,
    #[serde(rename = "1y")]
    Year1,
    #[serde(rename = "2y")]
    Year2,
    #[serde(rename = "5y")]
    Year5,
    #[serde(rename = "10y")]
    Year10,
    #[serde(rename = "max")]
    Max,
}

/// Concrete window a range resolves to for a given "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeWindow {
    /// Last N points of the series (trading-day count)
    TailPoints(usize),
    /// Every point with `date >= cutoff`
    From(NaiveDate),
    /// The full series
    All,
}

impl DisplayRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayRange::Day1 => "1d",
            DisplayRange::Day5 => "5d",
            DisplayRange::Month1 => "1mo",
            DisplayRange::Month3 => "3mo",
            DisplayRange::Month6 => "6mo",
            DisplayRange::Ytd => "ytd",
            DisplayRange::Year1 => "1y",
            DisplayRange::Year2 => "2y",
            DisplayRange::Year5 => "5y",
            DisplayRange::Year10 => "10y",
            DisplayRange::Max => "max",
        }
    }

    /// Resolve the range to a concrete window relative to `today`
    pub fn window(&self, today: NaiveDate) -> RangeWindow {
        let days_back = |days: i64| RangeWindow::From(today - Duration::days(days));

        match self {
            DisplayRange::Day1 => RangeWindow::TailPoints(1),
            DisplayRange::Day5 => RangeWindow::TailPoints(5),
            DisplayRange::Month1 => days_back(30),
            DisplayRange::Month3 => days_back(90),
            DisplayRange::Month6 => days_back(180),
            DisplayRange::Ytd => {
                let jan1 = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                    .expect("January 1st exists for any in-range year");
                RangeWindow::From(jan1)
            }
            DisplayRange::Year1 => days_back(365),
            DisplayRange::Year2 => days_back(2 * 365),
            DisplayRange::Year5 => days_back(5 * 365),
            DisplayRange::Year10 => days_back(10 * 365),
            DisplayRange::Max => RangeWindow::All,
        }
    }

    /// Get all available ranges
    pub fn all() -> Vec<DisplayRange> {
        vec![
            DisplayRange::Day1,
            DisplayRange::Day5,
            DisplayRange::Month1,
            DisplayRange::Month3,
            DisplayRange::Month6,
            DisplayRange::Ytd,
            DisplayRange::Year1,
            DisplayRange::Year2,
            DisplayRange::Year5,
            DisplayRange::Year10,
            DisplayRange::Max,
        ]
    }
}

impl FromStr for DisplayRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" => Ok(DisplayRange::Day1),
            "5d" => Ok(DisplayRange::Day5),
            "1mo" => Ok(DisplayRange::Month1),
            "3mo" => Ok(DisplayRange::Month3),
            "6mo" => Ok(DisplayRange::Month6),
            "ytd" => Ok(DisplayRange::Ytd),
            "1y" => Ok(DisplayRange::Year1),
            "2y" => Ok(DisplayRange::Year2),
            "5y" => Ok(DisplayRange::Year5),
            "10y" => Ok(DisplayRange::Year10),
            "max" => Ok(DisplayRange::Max),
            other => Err(Error::InvalidInput(format!(
                "Unknown range '{}', expected one of 1d, 5d, 1mo, 3mo, 6mo, ytd, 1y, 2y, 5y, 10y, max",
                other
            ))),
        }
    }
}

impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for DisplayRange {
    fn default() -> Self {
        DisplayRange::Ytd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_trip_strings() {
        for range in DisplayRange::all() {
            assert_eq!(range.as_str().parse::<DisplayRange>().unwrap(), range);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("7w".parse::<DisplayRange>().is_err());
    }

    #[test]
    fn test_tail_windows() {
        let today = date(2026, 8, 26);
        assert_eq!(DisplayRange::Day1.window(today), RangeWindow::TailPoints(1));
        assert_eq!(DisplayRange::Day5.window(today), RangeWindow::TailPoints(5));
    }

    #[test]
    fn test_calendar_windows() {
        let today = date(2026, 8, 26);
        assert_eq!(
            DisplayRange::Month1.window(today),
            RangeWindow::From(date(2026, 7, 27))
        );
        assert_eq!(
            DisplayRange::Year1.window(today),
            RangeWindow::From(date(2025, 8, 26))
        );
    }

    #[test]
    fn test_ytd_window_is_january_first() {
        let today = date(2026, 8, 26);
        assert_eq!(
            DisplayRange::Ytd.window(today),
            RangeWindow::From(date(2026, 1, 1))
        );
    }

    #[test]
    fn test_max_window() {
        assert_eq!(DisplayRange::Max.window(date(2026, 8, 26)), RangeWindow::All);
    }
}
