use crate::error::{Result, TrendError};
use crate::model::CommitRecord;
use crate::util::DATE_FORMAT;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-user entry of a country file. Fields other than `daily_commits` are ignored.
#[derive(Debug, Deserialize)]
struct UserActivity {
    #[serde(default)]
    daily_commits: BTreeMap<String, u64>,
}

pub fn country_data_path(data_dir: &Path, country: &str) -> PathBuf {
    data_dir.join(format!("{country}_data.json"))
}

pub fn load_records(path: &Path) -> Result<Vec<CommitRecord>> {
    let raw = std::fs::read_to_string(path).map_err(|e| TrendError::data_load(path, e))?;
    parse_records(&raw).map_err(|e| match e {
        TrendError::DataLoad { reason, .. } => TrendError::data_load(path, reason),
        other => other,
    })
}

/// Flatten a `user -> {daily_commits: {date -> count}}` document into records,
/// ordered by user id and then date.
pub fn parse_records(json: &str) -> Result<Vec<CommitRecord>> {
    let users: BTreeMap<String, UserActivity> =
        serde_json::from_str(json).map_err(|e| TrendError::data_load("<input>", e))?;

    let mut records = Vec::new();
    for (user_id, activity) in users {
        for (day, commit_count) in activity.daily_commits {
            let date = NaiveDate::parse_from_str(&day, DATE_FORMAT).map_err(|e| {
                TrendError::data_load("<input>", format!("user {user_id}: bad date '{day}': {e}"))
            })?;
            records.push(CommitRecord {
                user_id: user_id.clone(),
                date,
                commit_count,
            });
        }
    }

    Ok(records)
}
