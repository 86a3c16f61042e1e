use crate::collect::collect_countries;
use crate::config::AnalysisConfig;
use crate::model::{CountrySeries, DailyCountryOutput, DailyOutput, DailyRow, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(config: AnalysisConfig, json: bool, ndjson: bool, raw: bool) -> anyhow::Result<()> {
    let machine = json || ndjson;
    let countries = collect_countries(&config, !machine).context("Failed to load country data")?;
    let daily: Vec<DailyCountryOutput> = countries.iter().map(|c| daily_rows(c, raw)).collect();

    if json {
        output_json(&daily, &config)?;
    } else if ndjson {
        output_ndjson(&daily)?;
    } else {
        output_table(&daily, raw)?;
    }

    Ok(())
}

pub fn daily_rows(country: &CountrySeries, raw: bool) -> DailyCountryOutput {
    let activity = &country.daily;
    let points = activity
        .raw
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| DailyRow {
            date: p.date,
            total_commits: p.total_commits,
            active_users: p.active_users,
            commits_rolling_avg: (!raw).then(|| activity.commits_rolling.values.get(i).copied()).flatten(),
            users_rolling_avg: (!raw).then(|| activity.users_rolling.values.get(i).copied()).flatten(),
        })
        .collect();

    DailyCountryOutput {
        country: country.country.clone(),
        window: activity.window,
        points,
        load_error: country.load_error.clone(),
    }
}

fn output_json(daily: &[DailyCountryOutput], config: &AnalysisConfig) -> anyhow::Result<()> {
    let output = DailyOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_dir: config.data_dir.to_string_lossy().to_string(),
        window: config.window,
        countries: daily.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One line per (country, day).
fn output_ndjson(daily: &[DailyCountryOutput]) -> anyhow::Result<()> {
    for country in daily {
        for row in &country.points {
            let mut value = serde_json::to_value(row)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("country".to_string(), country.country.clone().into());
            }
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

fn output_table(daily: &[DailyCountryOutput], raw: bool) -> anyhow::Result<()> {
    for country in daily {
        println!("{}", style(format!("Daily activity - {}", country.country)).bold());
        if let Some(err) = &country.load_error {
            println!("  {}\n", style(err).red());
            continue;
        }
        if country.points.is_empty() {
            println!("  No data to display\n");
            continue;
        }

        if raw {
            println!("{:<12} {:>8} {:>8}", "Date", "Commits", "Users");
            println!("{}", "─".repeat(30));
        } else {
            println!(
                "{:<12} {:>8} {:>8} {:>12} {:>12}",
                "Date",
                "Commits",
                "Users",
                format!("Avg({})", country.window),
                "Users avg"
            );
            println!("{}", "─".repeat(56));
        }

        for row in &country.points {
            let date = if row.total_commits == 0 {
                style(row.date.to_string()).dim()
            } else {
                style(row.date.to_string())
            };
            match (row.commits_rolling_avg, row.users_rolling_avg) {
                (Some(c), Some(u)) => println!(
                    "{:<12} {:>8} {:>8} {:>12.2} {:>12.2}",
                    date, row.total_commits, row.active_users, c, u
                ),
                _ => println!("{:<12} {:>8} {:>8}", date, row.total_commits, row.active_users),
            }
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::build_country;
    use crate::model::CommitRecord;
    use crate::util::parse_date;
    use pretty_assertions::assert_eq;

    #[test]
    fn rows_carry_rolling_columns_unless_raw() {
        let records = vec![
            CommitRecord::new("a", parse_date("2024-01-01").unwrap(), 3),
            CommitRecord::new("b", parse_date("2024-01-03").unwrap(), 2),
        ];
        let country = build_country("India", &records, 7).unwrap();

        let full = daily_rows(&country, false);
        assert_eq!(full.points.len(), 3);
        assert_eq!(full.points[1].total_commits, 0);
        assert_eq!(full.points[1].commits_rolling_avg, Some(1.5));
        assert_eq!(full.points[2].users_rolling_avg, Some(2.0 / 3.0));

        let raw = daily_rows(&country, true);
        assert!(raw.points.iter().all(|p| p.commits_rolling_avg.is_none()));
    }
}
