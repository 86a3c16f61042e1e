use crate::collect::collect_countries;
use crate::config::AnalysisConfig;
use crate::model::{ChangeCountryOutput, ChangeOutput, SCHEMA_VERSION};
use crate::series::ZERO_BASE_GROWTH_PCT;
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(config: AnalysisConfig, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let machine = json || ndjson;
    let countries = collect_countries(&config, !machine).context("Failed to load country data")?;
    let changes: Vec<ChangeCountryOutput> = countries
        .into_iter()
        .map(|c| ChangeCountryOutput {
            country: c.country,
            points: c.pct_change.points,
            load_error: c.load_error,
        })
        .collect();

    if json {
        output_json(&changes, &config)?;
    } else if ndjson {
        output_ndjson(&changes)?;
    } else {
        output_table(&changes, config.window)?;
    }

    Ok(())
}

fn output_json(changes: &[ChangeCountryOutput], config: &AnalysisConfig) -> anyhow::Result<()> {
    let output = ChangeOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_dir: config.data_dir.to_string_lossy().to_string(),
        window: config.window,
        countries: changes.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(changes: &[ChangeCountryOutput]) -> anyhow::Result<()> {
    for country in changes {
        for point in &country.points {
            let mut value = serde_json::to_value(point)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("country".to_string(), country.country.clone().into());
            }
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

fn output_table(changes: &[ChangeCountryOutput], window: usize) -> anyhow::Result<()> {
    for country in changes {
        println!(
            "{}",
            style(format!("Daily change of {window}-day average - {}", country.country)).bold()
        );
        println!("{}", "─".repeat(30));

        if let Some(err) = &country.load_error {
            println!("{}\n", style(err).red());
            continue;
        }
        if country.points.is_empty() {
            println!("Not enough data\n");
            continue;
        }

        for point in &country.points {
            let text = format!("{:>+9.2}%", point.pct_change);
            let styled = if point.pct_change > 0.0 {
                style(text).green()
            } else if point.pct_change < 0.0 {
                style(text).red()
            } else {
                style(text).dim()
            };
            println!("{:<12} {}", point.date.to_string(), styled);
        }
        println!();
    }

    println!(
        "{}",
        style(format!(
            "Growth from a zero average is shown as {ZERO_BASE_GROWTH_PCT:+.0}%."
        ))
        .dim()
    );
    Ok(())
}
