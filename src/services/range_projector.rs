//! Pure range filtering and display projection.
//!
//! Nothing here holds state: the current range, mode, and basis all belong
//! to the calling layer and are passed in per call, so a pan or zoom only
//! needs a re-base, never a re-fetch.

use chrono::{NaiveDate, Utc};

use crate::models::{ChartPoint, DisplayMode, DisplayRange, PricePoint, RangeWindow, Series};

/// Slice a series to a display range, relative to the current date.
pub fn filter_by_range(series: &[PricePoint], range: DisplayRange) -> Series {
    filter_by_range_at(series, range, Utc::now().date_naive())
}

/// Range filter with an injectable "today".
///
/// An empty result stays empty; callers own the empty-state display and
/// must not be handed unfiltered data as a fallback.
pub fn filter_by_range_at(series: &[PricePoint], range: DisplayRange, today: NaiveDate) -> Series {
    match range.window(today) {
        RangeWindow::All => series.to_vec(),
        RangeWindow::TailPoints(n) => {
            let start = series.len().saturating_sub(n);
            series[start..].to_vec()
        }
        RangeWindow::From(cutoff) => series
            .iter()
            .filter(|p| p.date >= cutoff)
            .cloned()
            .collect(),
    }
}

/// Transform a series for charting without mutating it.
///
/// Dollar mode mirrors prices; percent mode rebases every point against
/// `basis`. Transform the full series (not just the visible slice) so that
/// panning only requires calling [`recompute_basis`] and projecting again.
pub fn project(series: &[PricePoint], mode: DisplayMode, basis: f64) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|p| {
            let y = match mode {
                DisplayMode::Dollar => p.price,
                DisplayMode::Percent => percent_change(p.price, basis),
            };
            ChartPoint {
                x: p.date,
                y,
                price: p.price,
            }
        })
        .collect()
}

/// Basis price for percent mode: the price of the first point inside the
/// visible window. When no point falls inside, the previous basis is
/// returned unchanged so a degenerate pan is a safe no-op.
pub fn recompute_basis(
    series: &[PricePoint],
    visible_min: NaiveDate,
    visible_max: NaiveDate,
    previous: f64,
) -> f64 {
    series
        .iter()
        .find(|p| p.date >= visible_min && p.date <= visible_max)
        .map(|p| p.price)
        .unwrap_or(previous)
}

/// Default basis when the caller has no visible window yet (initial render):
/// the first point of the filtered range.
pub fn default_basis(filtered: &[PricePoint]) -> Option<f64> {
    filtered.first().map(|p| p.price)
}

fn percent_change(price: f64, basis: f64) -> f64 {
    if basis == 0.0 {
        0.0
    } else {
        (price - basis) / basis * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Three consecutive trading days of MCD closes
    fn mcd_series() -> Series {
        vec![
            PricePoint::new(date("2024-03-01"), 100.0),
            PricePoint::new(date("2024-03-04"), 102.0),
            PricePoint::new(date("2024-03-05"), 98.0),
        ]
    }

    #[test]
    fn test_max_returns_identical_sequence() {
        let series = mcd_series();
        let filtered = filter_by_range_at(&series, DisplayRange::Max, date("2024-03-06"));
        assert_eq!(filtered, series);
    }

    #[test]
    fn test_one_day_takes_tail_point() {
        let series = mcd_series();
        let filtered = filter_by_range_at(&series, DisplayRange::Day1, date("2024-03-06"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, date("2024-03-05"));
    }

    #[test]
    fn test_one_day_on_empty_series() {
        let filtered = filter_by_range_at(&[], DisplayRange::Day1, date("2024-03-06"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_five_day_short_series_keeps_everything() {
        let series = mcd_series();
        let filtered = filter_by_range_at(&series, DisplayRange::Day5, date("2024-03-06"));
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_stale_series_filters_to_empty() {
        // Latest point is 45 days before "today": 1mo must come back empty,
        // not fall back to unfiltered data
        let series = mcd_series();
        let filtered = filter_by_range_at(&series, DisplayRange::Month1, date("2024-04-19"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_ytd_cuts_at_january_first() {
        let series = vec![
            PricePoint::new(date("2023-12-29"), 95.0),
            PricePoint::new(date("2024-01-02"), 100.0),
            PricePoint::new(date("2024-01-03"), 101.0),
        ];
        let filtered = filter_by_range_at(&series, DisplayRange::Ytd, date("2024-03-06"));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date, date("2024-01-02"));
    }

    #[test]
    fn test_dollar_projection_mirrors_prices() {
        let points = project(&mcd_series(), DisplayMode::Dollar, 100.0);
        let y: Vec<f64> = points.iter().map(|p| p.y).collect();
        assert_eq!(y, vec![100.0, 102.0, 98.0]);
    }

    #[test]
    fn test_percent_projection_rebases() {
        let points = project(&mcd_series(), DisplayMode::Percent, 100.0);
        let y: Vec<f64> = points.iter().map(|p| p.y).collect();
        assert_eq!(y, vec![0.0, 2.0, -2.0]);
        // Raw prices survive for tooltips
        assert_eq!(points[1].price, 102.0);
    }

    #[test]
    fn test_percent_is_zero_at_basis() {
        let series = mcd_series();
        let points = project(&series, DisplayMode::Percent, series[0].price);
        assert_eq!(points[0].y, 0.0);
    }

    #[test]
    fn test_percent_with_zero_basis_is_safe() {
        let points = project(&mcd_series(), DisplayMode::Percent, 0.0);
        assert!(points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_recompute_basis_picks_first_visible_point() {
        let series = mcd_series();
        let basis = recompute_basis(&series, date("2024-03-02"), date("2024-03-05"), 100.0);
        assert_eq!(basis, 102.0);
    }

    #[test]
    fn test_recompute_basis_keeps_previous_when_window_is_empty() {
        let series = mcd_series();
        let basis = recompute_basis(&series, date("2024-06-01"), date("2024-06-30"), 100.0);
        assert_eq!(basis, 100.0);
    }

    #[test]
    fn test_default_basis() {
        assert_eq!(default_basis(&mcd_series()), Some(100.0));
        assert_eq!(default_basis(&[]), None);
    }
}
