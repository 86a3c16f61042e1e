use crate::error::{Result, TrendError};
use crate::model::WeekLabel;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| TrendError::InvalidDate(format!("'{input}': {e}")))
}

pub fn week_of(date: &NaiveDate) -> WeekLabel {
    let iso = date.iso_week();
    WeekLabel {
        year: iso.year(),
        week: iso.week(),
    }
}

pub fn week_monday(week: WeekLabel) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(week.year, week.week, Weekday::Mon)
}

/// Parse `YYYY-Www` (`2024-W29`); lowercase `w` and single-digit weeks are accepted.
pub fn parse_week_label(input: &str) -> Result<WeekLabel> {
    let trimmed = input.trim();
    let (year, week) = trimmed
        .split_once(&['W', 'w'][..])
        .ok_or_else(|| TrendError::InvalidWeek(format!("'{input}': expected YYYY-Www")))?;
    let year: i32 = year
        .trim_end_matches('-')
        .parse()
        .map_err(|_| TrendError::InvalidWeek(format!("'{input}': bad year")))?;
    let week: u32 = week
        .parse()
        .map_err(|_| TrendError::InvalidWeek(format!("'{input}': bad week number")))?;

    let label = WeekLabel { year, week };
    if week_monday(label).is_none() {
        return Err(TrendError::InvalidWeek(format!(
            "'{input}': week {week} does not exist in {year}"
        )));
    }
    Ok(label)
}

/// Every day from `first` to `last`, both included.
pub fn days_between(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |d| *d <= last)
}

pub fn week_end_exclusive(monday: NaiveDate) -> NaiveDate {
    monday + Duration::days(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn week_label_uses_iso_year() {
        // 2024-12-30 is Monday of 2025-W01
        assert_eq!(week_of(&d("2024-12-30")).to_string(), "2025-W01");
        // 2021-01-03 is Sunday of 2020-W53
        assert_eq!(week_of(&d("2021-01-03")).to_string(), "2020-W53");
        assert_eq!(week_of(&d("2024-07-17")).to_string(), "2024-W29");
    }

    #[test]
    fn monday_of_week() {
        let monday = week_monday(WeekLabel { year: 2024, week: 29 }).unwrap();
        assert_eq!(monday, d("2024-07-15"));
        assert_eq!(monday.weekday(), Weekday::Mon);
    }

    #[test]
    fn parses_week_labels() {
        assert_eq!(parse_week_label("2024-W30").unwrap(), WeekLabel { year: 2024, week: 30 });
        assert_eq!(parse_week_label("2024w5").unwrap(), WeekLabel { year: 2024, week: 5 });
        assert!(parse_week_label("2024-30").is_err());
        assert!(parse_week_label("2023-W53").is_err());
        assert!(parse_week_label("2020-W53").is_ok());
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("17/07/2024").is_err());
    }

    #[test]
    fn day_range_is_inclusive() {
        let days: Vec<_> = days_between(d("2024-02-28"), d("2024-03-01")).collect();
        assert_eq!(days, vec![d("2024-02-28"), d("2024-02-29"), d("2024-03-01")]);
        assert_eq!(days_between(d("2024-01-01"), d("2024-01-01")).count(), 1);
    }
}
