use crate::constants::TABLE_SLICE_LEN;
use crate::models::{DailyChange, PricePoint};

/// Build the trailing daily-change view of a series for the table
/// collaborator: the last 30 points with per-day change against the prior
/// point (which may sit just before the slice).
pub fn daily_changes(series: &[PricePoint]) -> Vec<DailyChange> {
    let start = series.len().saturating_sub(TABLE_SLICE_LEN);
    let slice = &series[start..];

    slice
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let prev = if i == 0 {
                start.checked_sub(1).map(|j| &series[j])
            } else {
                Some(&slice[i - 1])
            };

            let change = prev.map(|q| point.price - q.price);
            let change_percent = prev.and_then(|q| {
                if q.price == 0.0 {
                    None
                } else {
                    Some((point.price - q.price) / q.price * 100.0)
                }
            });

            DailyChange {
                date: point.date,
                price: point.price,
                change,
                change_percent,
                volume: point.volume,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series_of(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64);
                PricePoint::new(date, price)
            })
            .collect()
    }

    #[test]
    fn test_first_row_of_series_has_no_change() {
        let rows = daily_changes(&series_of(&[100.0, 102.0]));
        assert_eq!(rows.len(), 2);
        assert!(rows[0].change.is_none());
        assert_eq!(rows[1].change, Some(2.0));
        assert_eq!(rows[1].change_percent, Some(2.0));
    }

    #[test]
    fn test_slice_is_capped_at_thirty_points() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let rows = daily_changes(&series_of(&prices));
        assert_eq!(rows.len(), TABLE_SLICE_LEN);
        // The first row of the slice still sees the point before it
        assert_eq!(rows[0].change, Some(1.0));
    }

    #[test]
    fn test_empty_series() {
        assert!(daily_changes(&[]).is_empty());
    }
}
