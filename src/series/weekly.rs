use crate::model::{CommitRecord, WeekLabel, WeeklyBucket, WeeklySeries};
use crate::util::{week_monday, week_of};
use std::collections::{BTreeMap, HashSet};

#[derive(Default)]
struct WeekAccum<'a> {
    commits: u64,
    users: HashSet<&'a str>,
}

/// Bucket records by ISO week. Weeks without activity are not emitted.
pub fn aggregate_weekly(records: &[CommitRecord]) -> WeeklySeries {
    let mut week_map: BTreeMap<WeekLabel, WeekAccum> = BTreeMap::new();

    for record in records.iter().filter(|r| r.commit_count > 0) {
        let entry = week_map.entry(week_of(&record.date)).or_default();
        entry.commits = entry.commits.saturating_add(record.commit_count);
        entry.users.insert(record.user_id.as_str());
    }

    let buckets = week_map
        .into_iter()
        .filter_map(|(week, WeekAccum { commits, users })| {
            // only unreachable for labels chrono produced itself
            let week_start = week_monday(week)?;
            Some(WeeklyBucket {
                iso_year: week.year,
                iso_week: week.week,
                label: week.to_string(),
                week_start,
                total_commits: commits,
                active_users: users.len() as u64,
            })
        })
        .collect();

    WeeklySeries { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_date;
    use chrono::{Datelike, Weekday};
    use pretty_assertions::assert_eq;

    fn rec(user: &str, date: &str, count: u64) -> CommitRecord {
        CommitRecord::new(user, parse_date(date).unwrap(), count)
    }

    #[test]
    fn groups_by_iso_week_starting_monday() {
        let records = vec![
            rec("alice", "2024-07-15", 2),
            rec("bob", "2024-07-21", 3),
            rec("alice", "2024-07-21", 1),
            rec("carol", "2024-07-22", 4),
        ];
        let weekly = aggregate_weekly(&records);
        let labels: Vec<_> = weekly.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-W29", "2024-W30"]);

        let w29 = &weekly.buckets[0];
        assert_eq!(w29.total_commits, 6);
        assert_eq!(w29.active_users, 2);
        assert_eq!(w29.week_start, parse_date("2024-07-15").unwrap());
        assert_eq!(w29.week_start.weekday(), Weekday::Mon);

        let w30 = &weekly.buckets[1];
        assert_eq!((w30.total_commits, w30.active_users), (4, 1));
    }

    #[test]
    fn gaps_between_weeks_are_not_filled() {
        let records = vec![rec("a", "2024-01-02", 1), rec("a", "2024-03-01", 1)];
        let weekly = aggregate_weekly(&records);
        assert_eq!(weekly.len(), 2);
        for bucket in &weekly.buckets {
            assert!(bucket.total_commits > 0 || bucket.active_users > 0);
        }
    }

    #[test]
    fn zero_only_weeks_are_dropped() {
        let records = vec![rec("a", "2024-01-02", 0), rec("b", "2024-01-09", 2)];
        let weekly = aggregate_weekly(&records);
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly.buckets[0].label, "2024-W02");
    }

    #[test]
    fn year_boundary_follows_iso_calendar() {
        let records = vec![
            rec("a", "2020-12-31", 1),
            rec("b", "2021-01-03", 1),
            rec("c", "2021-01-04", 1),
            rec("d", "2019-12-30", 1),
        ];
        let weekly = aggregate_weekly(&records);
        let labels: Vec<_> = weekly.buckets.iter().map(|b| b.label.clone()).collect();
        assert_eq!(labels, vec!["2020-W01", "2020-W53", "2021-W01"]);
        assert_eq!(weekly.buckets[1].total_commits, 2);
        assert_eq!(weekly.buckets[0].week_start, parse_date("2019-12-30").unwrap());
    }

    #[test]
    fn single_digit_weeks_sort_before_double_digit() {
        let records = vec![rec("a", "2024-03-11", 1), rec("a", "2024-01-29", 1)];
        let weekly = aggregate_weekly(&records);
        let labels: Vec<_> = weekly.buckets.iter().map(|b| b.label.clone()).collect();
        assert_eq!(labels, vec!["2024-W05", "2024-W11"]);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let records = vec![rec("a", "2024-07-15", u64::MAX), rec("b", "2024-07-16", 7)];
        let weekly = aggregate_weekly(&records);
        assert_eq!(weekly.buckets[0].total_commits, u64::MAX);
        assert_eq!(weekly.buckets[0].active_users, 2);
    }

    #[test]
    fn empty_input() {
        assert!(aggregate_weekly(&[]).is_empty());
    }
}
