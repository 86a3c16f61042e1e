use crate::model::{PercentChange, PercentChangeSeries, RollingSeries};

/// Reported change when yesterday was zero and today is not.
///
/// Growth from zero has no finite ratio. A flat 100% is used as an
/// approximation so that restarts stay visible on a bounded chart; it is not
/// a computed value.
pub const ZERO_BASE_GROWTH_PCT: f64 = 100.0;

/// Day-over-day percentage change of a rolling series. Each entry is dated
/// with the later of the two days it compares, so the first day is dropped.
pub fn percentage_change(series: &RollingSeries) -> PercentChangeSeries {
    if series.len() < 2 {
        return PercentChangeSeries::default();
    }

    let points = series
        .values
        .windows(2)
        .zip(series.dates.iter().skip(1))
        .map(|(pair, date)| PercentChange {
            date: *date,
            pct_change: change_between(pair[0], pair[1]),
        })
        .collect();

    PercentChangeSeries { points }
}

fn change_between(yesterday: f64, today: f64) -> f64 {
    if yesterday != 0.0 {
        (today - yesterday) / yesterday * 100.0
    } else if today == 0.0 {
        0.0
    } else {
        ZERO_BASE_GROWTH_PCT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{days_between, parse_date};
    use pretty_assertions::assert_eq;

    fn series(values: &[f64]) -> RollingSeries {
        let start = parse_date("2024-07-01").unwrap();
        let end = start + chrono::Duration::days(values.len().saturating_sub(1) as i64);
        RollingSeries {
            dates: days_between(start, end).take(values.len()).collect(),
            values: values.to_vec(),
        }
    }

    fn changes(values: &[f64]) -> Vec<f64> {
        percentage_change(&series(values))
            .points
            .into_iter()
            .map(|p| p.pct_change)
            .collect()
    }

    #[test]
    fn zero_base_uses_fixed_sentinel() {
        assert_eq!(changes(&[0.0, 0.0, 5.0]), vec![0.0, 100.0]);
    }

    #[test]
    fn halving_is_minus_fifty() {
        assert_eq!(changes(&[4.0, 2.0]), vec![-50.0]);
    }

    #[test]
    fn drop_to_zero_is_minus_hundred() {
        assert_eq!(changes(&[3.0, 0.0, 0.0]), vec![-100.0, 0.0]);
    }

    #[test]
    fn dates_shift_forward_by_one() {
        let result = percentage_change(&series(&[1.0, 2.0, 3.0]));
        let dates: Vec<_> = result.points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![parse_date("2024-07-02").unwrap(), parse_date("2024-07-03").unwrap()]
        );
        assert_eq!(result.points[0].pct_change, 100.0);
        assert_eq!(result.points[1].pct_change, 50.0);
    }

    #[test]
    fn short_series_yield_nothing() {
        assert!(changes(&[]).is_empty());
        assert!(changes(&[7.0]).is_empty());
    }
}
