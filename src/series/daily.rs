use super::rolling::rolling_average;
use crate::error::Result;
use crate::model::{CommitRecord, DailyActivity, DailyPoint, DailySeries, RollingSeries};
use crate::util::days_between;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

#[derive(Default)]
struct DayAccum<'a> {
    commits: u64,
    users: HashSet<&'a str>,
}

/// Sum commits and count distinct active users per day, then zero-fill every
/// calendar day between the first and last recorded day. A zero-count record
/// still extends the range but does not make its user active.
pub fn aggregate_daily(records: &[CommitRecord]) -> DailySeries {
    let mut day_map: BTreeMap<NaiveDate, DayAccum> = BTreeMap::new();

    for record in records {
        let entry = day_map.entry(record.date).or_default();
        entry.commits = entry.commits.saturating_add(record.commit_count);
        if record.commit_count > 0 {
            entry.users.insert(record.user_id.as_str());
        }
    }

    let (first, last) = match (day_map.keys().next(), day_map.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return DailySeries::default(),
    };

    let points = days_between(first, last)
        .map(|date| match day_map.get(&date) {
            Some(accum) => DailyPoint {
                date,
                total_commits: accum.commits,
                active_users: accum.users.len() as u64,
            },
            None => DailyPoint {
                date,
                total_commits: 0,
                active_users: 0,
            },
        })
        .collect();

    DailySeries { points }
}

pub fn build_daily(records: &[CommitRecord], window: usize) -> Result<DailyActivity> {
    let raw = aggregate_daily(records);
    let dates = raw.dates();

    let commits_rolling = RollingSeries {
        dates: dates.clone(),
        values: rolling_average(&raw.commits(), window)?,
    };
    let users_rolling = RollingSeries {
        dates,
        values: rolling_average(&raw.active_users(), window)?,
    };

    Ok(DailyActivity {
        window,
        raw,
        commits_rolling,
        users_rolling,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrendError;
    use crate::util::parse_date;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn rec(user: &str, date: &str, count: u64) -> CommitRecord {
        CommitRecord::new(user, d(date), count)
    }

    fn point(date: &str, commits: u64, users: u64) -> DailyPoint {
        DailyPoint {
            date: d(date),
            total_commits: commits,
            active_users: users,
        }
    }

    #[test]
    fn fills_missing_days_with_zero() {
        let records = vec![rec("alice", "2024-01-01", 3), rec("bob", "2024-01-03", 2)];
        let series = aggregate_daily(&records);
        assert_eq!(
            series.points,
            vec![
                point("2024-01-01", 3, 1),
                point("2024-01-02", 0, 0),
                point("2024-01-03", 2, 1),
            ]
        );
    }

    #[test]
    fn users_counted_once_per_day_commits_summed() {
        let records = vec![
            rec("alice", "2024-03-10", 2),
            rec("bob", "2024-03-10", 5),
            rec("alice", "2024-03-10", 1),
        ];
        let series = aggregate_daily(&records);
        assert_eq!(series.points, vec![point("2024-03-10", 8, 2)]);
    }

    #[test]
    fn zero_count_records_extend_the_range() {
        let records = vec![
            rec("alice", "2024-01-01", 0),
            rec("alice", "2024-01-03", 2),
            rec("bob", "2024-01-05", 0),
        ];
        let series = aggregate_daily(&records);
        assert_eq!(
            series.points,
            vec![
                point("2024-01-01", 0, 0),
                point("2024-01-02", 0, 0),
                point("2024-01-03", 2, 1),
                point("2024-01-04", 0, 0),
                point("2024-01-05", 0, 0),
            ]
        );
    }

    #[test]
    fn zero_count_user_is_not_active() {
        let records = vec![rec("alice", "2024-01-02", 4), rec("bob", "2024-01-02", 0)];
        assert_eq!(aggregate_daily(&records).points, vec![point("2024-01-02", 4, 1)]);
    }

    #[test]
    fn only_zero_counts_give_all_zero_series() {
        let series = aggregate_daily(&[rec("alice", "2024-01-01", 0)]);
        assert_eq!(series.points, vec![point("2024-01-01", 0, 0)]);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let records = vec![rec("a", "2024-01-01", u64::MAX), rec("b", "2024-01-01", 1)];
        assert_eq!(aggregate_daily(&records).points, vec![point("2024-01-01", u64::MAX, 2)]);
    }

    #[test]
    fn series_is_contiguous() {
        let records = vec![
            rec("a", "2024-02-25", 1),
            rec("b", "2024-03-04", 1),
            rec("c", "2024-02-29", 6),
        ];
        let dates = aggregate_daily(&records).dates();
        assert_eq!(dates.len(), 9);
        for pair in dates.windows(2) {
            assert_eq!(pair[1], pair[0].succ_opt().unwrap());
        }
    }

    #[test]
    fn empty_records_give_empty_activity() {
        let activity = build_daily(&[], 7).unwrap();
        assert!(activity.is_empty());
        assert!(activity.commits_rolling.is_empty());
        assert!(activity.users_rolling.is_empty());
    }

    #[test]
    fn rolling_columns_align_with_raw_dates() {
        let records = vec![
            rec("alice", "2024-01-01", 4),
            rec("bob", "2024-01-01", 2),
            rec("alice", "2024-01-04", 6),
        ];
        let activity = build_daily(&records, 2).unwrap();
        assert_eq!(activity.raw.len(), 4);
        assert_eq!(activity.commits_rolling.dates, activity.raw.dates());
        assert_eq!(activity.users_rolling.dates, activity.raw.dates());
        assert_eq!(activity.commits_rolling.values, vec![6.0, 3.0, 0.0, 3.0]);
        assert_eq!(activity.users_rolling.values, vec![2.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let records = vec![
            rec("x", "2024-05-01", 1),
            rec("y", "2024-05-09", 3),
            rec("x", "2024-05-09", 2),
        ];
        assert_eq!(build_daily(&records, 7).unwrap(), build_daily(&records, 7).unwrap());
    }

    #[test]
    fn zero_window_fails_fast() {
        let records = vec![rec("x", "2024-05-01", 1)];
        assert!(matches!(
            build_daily(&records, 0),
            Err(TrendError::InvalidArgument(_))
        ));
    }
}
