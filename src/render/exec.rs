use super::{daily_rolling_charts, full_chart_set, ChartRenderer, NamedChart, SvgRenderer};
use crate::collect::collect_countries;
use crate::config::{AnalysisConfig, RenderConfig};
use crate::error::Result;
use crate::model::CountrySeries;
use anyhow::Context;
use console::style;
use std::path::{Path, PathBuf};

/// Render each chart into `dir` as `{file_stem}.{ext}`, creating `dir` first.
pub fn write_charts(
    renderer: &dyn ChartRenderer,
    dir: &Path,
    charts: &[NamedChart],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(charts.len());
    for named in charts.iter().filter(|c| c.chart.has_data()) {
        let path = dir.join(format!("{}.{}", named.file_stem, renderer.extension()));
        renderer.render(&named.chart, &path)?;
        tracing::info!(path = %path.display(), "chart written");
        written.push(path);
    }
    Ok(written)
}

pub fn exec(analysis: AnalysisConfig, render: RenderConfig, quiet: bool) -> anyhow::Result<()> {
    let countries = collect_countries(&analysis, !quiet).context("Failed to load country data")?;
    let renderer = SvgRenderer::default();

    let charts = full_chart_set(&countries, &render, analysis.window);
    let mut written = write_charts(&renderer, &render.output_dir, &charts)
        .with_context(|| format!("Failed to write charts to {}", render.output_dir.display()))?;

    if render.unshaded_copy {
        let plain = daily_rolling_charts(&countries, None, analysis.window);
        let dir = render.unshaded_dir();
        written.extend(
            write_charts(&renderer, &dir, &plain)
                .with_context(|| format!("Failed to write charts to {}", dir.display()))?,
        );
    }

    if !quiet {
        output_summary(&countries, &written);
    }
    Ok(())
}

fn output_summary(countries: &[CountrySeries], written: &[PathBuf]) {
    println!("{}", style("Chart Summary").bold());
    println!("{}", "─".repeat(50));

    for country in countries {
        match (&country.load_error, country.has_data()) {
            (Some(err), _) => println!("{:<16} {}", country.country, style(err).red()),
            (None, false) => println!("{:<16} {}", country.country, style("no activity").yellow()),
            (None, true) => {
                let first = country.daily.raw.points.first().map(|p| p.date);
                let last = country.daily.raw.points.last().map(|p| p.date);
                if let (Some(first), Some(last)) = (first, last) {
                    println!(
                        "{:<16} {} to {} ({} days, {} weeks)",
                        country.country,
                        style(first).dim(),
                        style(last).dim(),
                        country.daily.raw.len(),
                        country.weekly.len()
                    );
                }
            }
        }
    }

    println!();
    for path in written {
        println!("Saved {}", style(path.display()).green());
    }
    println!("\n{} charts written", style(written.len()).cyan());
}
