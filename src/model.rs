use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

/// One user's commit count on one day, as read from a country file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub commit_count: u64,
}

impl CommitRecord {
    pub fn new(user_id: impl Into<String>, date: NaiveDate, commit_count: u64) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            commit_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total_commits: u64,
    pub active_users: u64,
}

/// Contiguous daily series: one point per calendar day, zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn commits(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total_commits as f64).collect()
    }

    pub fn active_users(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.active_users as f64).collect()
    }
}

/// Averaged values aligned one-to-one with `dates`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl RollingSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyActivity {
    pub window: usize,
    pub raw: DailySeries,
    pub commits_rolling: RollingSeries,
    pub users_rolling: RollingSeries,
}

impl DailyActivity {
    pub fn empty(window: usize) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// ISO-8601 week identifier, printed as `YYYY-Www`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekLabel {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    pub iso_year: i32,
    pub iso_week: u32,
    pub label: String,
    pub week_start: NaiveDate,
    pub total_commits: u64,
    pub active_users: u64,
}

impl WeeklyBucket {
    pub fn week_label(&self) -> WeekLabel {
        WeekLabel {
            year: self.iso_year,
            week: self.iso_week,
        }
    }
}

/// Sparse weekly series: only weeks that saw activity are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySeries {
    pub buckets: Vec<WeeklyBucket>,
}

impl WeeklySeries {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentChange {
    pub date: NaiveDate,
    pub pct_change: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentChangeSeries {
    pub points: Vec<PercentChange>,
}

impl PercentChangeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Every series derived for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySeries {
    pub country: String,
    pub daily: DailyActivity,
    pub weekly: WeeklySeries,
    pub pct_change: PercentChangeSeries,
    pub load_error: Option<String>,
}

impl CountrySeries {
    pub fn has_data(&self) -> bool {
        !self.daily.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCountryOutput {
    pub country: String,
    pub window: usize,
    pub points: Vec<DailyRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub total_commits: u64,
    pub active_users: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_rolling_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_rolling_avg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_dir: String,
    pub window: usize,
    pub countries: Vec<DailyCountryOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyCountryOutput {
    pub country: String,
    pub buckets: Vec<WeeklyBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_dir: String,
    pub countries: Vec<WeeklyCountryOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeCountryOutput {
    pub country: String,
    pub points: Vec<PercentChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_dir: String,
    pub window: usize,
    pub countries: Vec<ChangeCountryOutput>,
}

/// Inclusive calendar span used for chart highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan {
    pub start: WeekLabel,
    pub end: WeekLabel,
}

impl WeekSpan {
    pub fn contains(&self, week: &WeekLabel) -> bool {
        week >= &self.start && week <= &self.end
    }
}
