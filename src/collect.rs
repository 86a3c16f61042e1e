use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::ingest::{country_data_path, load_records};
use crate::model::{CommitRecord, CountrySeries, DailyActivity, PercentChangeSeries, WeeklySeries};
use crate::series::{aggregate_weekly, build_daily, percentage_change};
use indicatif::{ProgressBar, ProgressStyle};

/// Derive every series for one country from its records.
pub fn build_country(country: &str, records: &[CommitRecord], window: usize) -> Result<CountrySeries> {
    let daily = build_daily(records, window)?;
    let weekly = aggregate_weekly(records);
    let pct_change = percentage_change(&daily.commits_rolling);

    Ok(CountrySeries {
        country: country.to_string(),
        daily,
        weekly,
        pct_change,
        load_error: None,
    })
}

fn empty_country(country: &str, window: usize, load_error: String) -> CountrySeries {
    CountrySeries {
        country: country.to_string(),
        daily: DailyActivity::empty(window),
        weekly: WeeklySeries::default(),
        pct_change: PercentChangeSeries::default(),
        load_error: Some(load_error),
    }
}

/// Load and process each configured country in order. A country whose file
/// is missing or malformed yields empty series; other errors abort.
pub fn collect_countries(config: &AnalysisConfig, show_progress: bool) -> Result<Vec<CountrySeries>> {
    config.validate()?;

    let pb = if show_progress {
        let pb = ProgressBar::new(config.countries.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(config.countries.len());

    for country in &config.countries {
        pb.set_message(country.clone());
        let path = country_data_path(&config.data_dir, country);

        let series = match load_records(&path) {
            Ok(records) => {
                tracing::debug!(country = %country, records = records.len(), "loaded country data");
                build_country(country, &records, config.window)?
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(country = %country, error = %e, "skipping country data");
                empty_country(country, config.window, e.to_string())
            }
            Err(e) => return Err(e),
        };

        results.push(series);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrendError;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_country(dir: &std::path::Path, country: &str, body: &str) {
        fs::write(country_data_path(dir, country), body).unwrap();
    }

    #[test]
    fn failed_country_does_not_block_others() {
        let dir = tempfile::tempdir().unwrap();
        write_country(
            dir.path(),
            "India",
            r#"{"a": {"daily_commits": {"2024-07-16": 2, "2024-07-18": 4}}}"#,
        );
        write_country(dir.path(), "Philippines", "{ broken");

        let config = AnalysisConfig::new(
            dir.path(),
            vec!["Bangladesh".into(), "India".into(), "Philippines".into()],
            7,
        )
        .unwrap();
        let countries = collect_countries(&config, false).unwrap();

        let names: Vec<_> = countries.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(names, vec!["Bangladesh", "India", "Philippines"]);

        assert!(!countries[0].has_data());
        assert!(countries[0].load_error.is_some());
        assert!(countries[2].load_error.is_some());

        let india = &countries[1];
        assert!(india.load_error.is_none());
        assert_eq!(india.daily.raw.len(), 3);
        assert_eq!(india.weekly.len(), 1);
        assert_eq!(india.pct_change.len(), 2);
    }

    #[test]
    fn empty_document_gives_empty_series_without_error() {
        let dir = tempfile::tempdir().unwrap();
        write_country(dir.path(), "India", "{}");
        let config = AnalysisConfig::new(dir.path(), vec!["India".into()], 7).unwrap();
        let countries = collect_countries(&config, false).unwrap();
        assert!(countries[0].load_error.is_none());
        assert!(countries[0].daily.is_empty());
        assert!(countries[0].weekly.is_empty());
        assert!(countries[0].pct_change.is_empty());
    }

    #[test]
    fn invalid_window_is_fatal() {
        let config = AnalysisConfig {
            window: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            collect_countries(&config, false),
            Err(TrendError::InvalidArgument(_))
        ));
    }
}
