use crate::collect::collect_countries;
use crate::config::AnalysisConfig;
use crate::model::{WeeklyBucket, WeeklyCountryOutput, WeeklyOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(config: AnalysisConfig, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let machine = json || ndjson;
    let countries = collect_countries(&config, !machine).context("Failed to load country data")?;
    let weekly: Vec<WeeklyCountryOutput> = countries
        .into_iter()
        .map(|c| WeeklyCountryOutput {
            country: c.country,
            buckets: c.weekly.buckets,
            load_error: c.load_error,
        })
        .collect();

    if json {
        output_json(&weekly, &config)?;
    } else if ndjson {
        output_ndjson(&weekly)?;
    } else {
        output_heatmap(&weekly)?;
    }

    Ok(())
}

fn output_json(weekly: &[WeeklyCountryOutput], config: &AnalysisConfig) -> anyhow::Result<()> {
    let output = WeeklyOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_dir: config.data_dir.to_string_lossy().to_string(),
        countries: weekly.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(weekly: &[WeeklyCountryOutput]) -> anyhow::Result<()> {
    for country in weekly {
        for bucket in &country.buckets {
            let mut value = serde_json::to_value(bucket)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("country".to_string(), country.country.clone().into());
            }
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

fn intensity(value: u64, max: u64) -> u32 {
    if max == 0 {
        return 0;
    }
    ((value as f64 / max as f64) * 5.0) as u32
}

fn commit_glyph(level: u32) -> &'static str {
    match level {
        0 => " ",
        1 => "▁",
        2 => "▃",
        3 => "▅",
        4 => "▇",
        _ => "█",
    }
}

fn user_glyph(level: u32) -> &'static str {
    match level {
        0 => " ",
        1 => "░",
        2 => "▒",
        3 => "▓",
        _ => "█",
    }
}

fn print_bucket(bucket: &WeeklyBucket, max_commits: u64, max_users: u64) {
    println!(
        "{} {} {} {} commits: {:>6}, users: {:>5}",
        bucket.label,
        style(bucket.week_start).dim(),
        style(commit_glyph(intensity(bucket.total_commits, max_commits))).green(),
        style(user_glyph(intensity(bucket.active_users, max_users))).blue(),
        bucket.total_commits,
        bucket.active_users
    );
}

fn output_heatmap(weekly: &[WeeklyCountryOutput]) -> anyhow::Result<()> {
    for country in weekly {
        println!("{}", style(format!("Weekly activity - {}", country.country)).bold());
        println!("{}", "─".repeat(50));

        if let Some(err) = &country.load_error {
            println!("{}\n", style(err).red());
            continue;
        }
        if country.buckets.is_empty() {
            println!("No data to display\n");
            continue;
        }

        let max_commits = country.buckets.iter().map(|b| b.total_commits).max().unwrap_or(1);
        let max_users = country.buckets.iter().map(|b| b.active_users).max().unwrap_or(1);
        for bucket in &country.buckets {
            print_bucket(bucket, max_commits, max_users);
        }
        println!();
    }

    println!("{}", style("Legend").bold());
    println!("  {} commits intensity", style("▁▃▅▇█").green());
    println!("  {} active users intensity", style("░▒▓█").blue());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_scales_to_five_levels() {
        assert_eq!(intensity(0, 10), 0);
        assert_eq!(intensity(5, 10), 2);
        assert_eq!(intensity(10, 10), 5);
        assert_eq!(intensity(3, 0), 0);
        assert_eq!(commit_glyph(intensity(10, 10)), "█");
        assert_eq!(user_glyph(4), "█");
    }
}
