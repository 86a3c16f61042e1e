use super::{country_color, Chart, ChartLine, Highlight, NamedChart};
use crate::config::RenderConfig;
use crate::model::{CountrySeries, DateSpan, WeekSpan, WeeklySeries};
use crate::util::week_end_exclusive;
use chrono::NaiveDate;

const HIGHLIGHT_LABEL: &str = "Blackout period";
const PCT_BUFFER: f64 = 10.0;

fn upper_bound(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn max_of(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, f64::max)
}

fn day_highlight(span: Option<DateSpan>) -> Option<Highlight> {
    span.map(|s| Highlight {
        start: s.start,
        end: s.end,
        label: HIGHLIGHT_LABEL.to_string(),
        edge_markers: true,
    })
}

/// Band covering the highlighted weeks that `weekly` actually contains:
/// Monday of the first one up to a week after Monday of the last one.
pub fn resolve_week_highlight(weekly: &WeeklySeries, span: &WeekSpan) -> Option<DateSpan> {
    let mut inside = weekly
        .buckets
        .iter()
        .filter(|b| span.contains(&b.week_label()))
        .map(|b| b.week_start);

    let first = inside.next()?;
    let last = inside.last().unwrap_or(first);
    Some(DateSpan::new(first, week_end_exclusive(last)))
}

struct Column<'a> {
    file_suffix: &'a str,
    comparison_stem: &'a str,
    title: &'a str,
    y_label: &'a str,
    line_label: &'a str,
    markers: bool,
}

fn individual_and_comparison(
    countries: &[CountrySeries],
    column: &Column<'_>,
    x_label: &str,
    points_of: impl Fn(&CountrySeries) -> Vec<(NaiveDate, f64)>,
    highlight_of: impl Fn(&CountrySeries) -> Option<DateSpan>,
    comparison_highlight: Option<DateSpan>,
) -> Vec<NamedChart> {
    let mut charts = Vec::new();
    let mut comparison_lines = Vec::new();
    let mut overall_max = 0.0f64;

    for (index, country) in countries.iter().enumerate() {
        let points = points_of(country);
        if points.is_empty() {
            continue;
        }
        let local_max = max_of(points.iter().map(|(_, v)| *v));
        overall_max = overall_max.max(local_max);
        let color = country_color(&country.country, index).to_string();

        charts.push(NamedChart {
            file_stem: format!("{}_{}", country.country, column.file_suffix),
            chart: Chart {
                title: format!("{} - {}", column.title, country.country),
                x_label: x_label.to_string(),
                y_label: column.y_label.to_string(),
                lines: vec![ChartLine {
                    label: column.line_label.to_string(),
                    color: color.clone(),
                    points: points.clone(),
                    markers: column.markers,
                }],
                y_range: (0.0, upper_bound(local_max)),
                highlight: day_highlight(highlight_of(country)),
                zero_line: false,
            },
        });

        comparison_lines.push(ChartLine {
            label: country.country.clone(),
            color,
            points,
            markers: false,
        });
    }

    if !comparison_lines.is_empty() {
        charts.push(NamedChart {
            file_stem: column.comparison_stem.to_string(),
            chart: Chart {
                title: format!("{} comparison", column.title),
                x_label: x_label.to_string(),
                y_label: column.y_label.to_string(),
                lines: comparison_lines,
                y_range: (0.0, upper_bound(overall_max)),
                highlight: day_highlight(comparison_highlight),
                zero_line: false,
            },
        });
    }

    charts
}

pub fn daily_raw_charts(countries: &[CountrySeries], highlight: Option<DateSpan>) -> Vec<NamedChart> {
    let column = Column {
        file_suffix: "commits_raw",
        comparison_stem: "comparacion_commits_raw",
        title: "Daily commits (raw)",
        y_label: "Commits",
        line_label: "Daily commits",
        markers: true,
    };
    individual_and_comparison(
        countries,
        &column,
        "Date",
        |c| {
            c.daily
                .raw
                .points
                .iter()
                .map(|p| (p.date, p.total_commits as f64))
                .collect()
        },
        |_| highlight,
        highlight,
    )
}

pub fn daily_rolling_charts(
    countries: &[CountrySeries],
    highlight: Option<DateSpan>,
    window: usize,
) -> Vec<NamedChart> {
    let line_label = format!("Rolling average ({window} days)");
    let column = Column {
        file_suffix: "commits_diarios",
        comparison_stem: "comparacion_commits_diarios",
        title: "Daily GitHub commits",
        y_label: "Commits (rolling average)",
        line_label: &line_label,
        markers: false,
    };
    individual_and_comparison(
        countries,
        &column,
        "Date",
        |c| c.daily.commits_rolling.points().collect(),
        |_| highlight,
        highlight,
    )
}

/// Percentage-change charts: y axis padded by ten points either side and a
/// reference line at zero.
pub fn change_charts(countries: &[CountrySeries], highlight: Option<DateSpan>) -> Vec<NamedChart> {
    let mut charts = Vec::new();
    let mut comparison_lines = Vec::new();
    let (mut overall_min, mut overall_max) = (0.0f64, 0.0f64);

    for (index, country) in countries.iter().enumerate() {
        let points: Vec<_> = country
            .pct_change
            .points
            .iter()
            .map(|p| (p.date, p.pct_change))
            .collect();
        if points.is_empty() {
            continue;
        }

        let local_min = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let local_max = points.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        overall_min = overall_min.min(local_min);
        overall_max = overall_max.max(local_max);
        let color = country_color(&country.country, index).to_string();

        charts.push(NamedChart {
            file_stem: format!("{}_cambio_porcentual", country.country),
            chart: Chart {
                title: format!("Daily percentage change in commits - {}", country.country),
                x_label: "Date".to_string(),
                y_label: "Change (%)".to_string(),
                lines: vec![ChartLine {
                    label: "Daily percentage change".to_string(),
                    color: color.clone(),
                    points: points.clone(),
                    markers: false,
                }],
                y_range: (local_min - PCT_BUFFER, local_max + PCT_BUFFER),
                highlight: day_highlight(highlight),
                zero_line: true,
            },
        });

        comparison_lines.push(ChartLine {
            label: country.country.clone(),
            color,
            points,
            markers: false,
        });
    }

    if !comparison_lines.is_empty() {
        charts.push(NamedChart {
            file_stem: "comparacion_cambio_porcentual".to_string(),
            chart: Chart {
                title: "Daily percentage change in commits comparison".to_string(),
                x_label: "Date".to_string(),
                y_label: "Change (%)".to_string(),
                lines: comparison_lines,
                y_range: (overall_min - PCT_BUFFER, overall_max + PCT_BUFFER),
                highlight: day_highlight(highlight),
                zero_line: true,
            },
        });
    }

    charts
}

/// Weekly commit and active-user charts. Individual charts highlight the
/// weeks present in that country; comparisons use the first country that has
/// weekly data as the reference.
pub fn weekly_charts(countries: &[CountrySeries], span: Option<WeekSpan>) -> Vec<NamedChart> {
    let reference = countries.iter().find(|c| !c.weekly.is_empty());
    let comparison_highlight =
        span.and_then(|s| reference.and_then(|r| resolve_week_highlight(&r.weekly, &s)));
    let own_highlight = |c: &CountrySeries| span.and_then(|s| resolve_week_highlight(&c.weekly, &s));

    let commits = Column {
        file_suffix: "commits_semanales",
        comparison_stem: "comparacion_commits_semanales",
        title: "Weekly GitHub commits",
        y_label: "Commits",
        line_label: "Weekly commits",
        markers: true,
    };
    let users = Column {
        file_suffix: "usuarios_semanales",
        comparison_stem: "comparacion_usuarios_semanales",
        title: "Weekly active GitHub users",
        y_label: "Active users",
        line_label: "Weekly active users",
        markers: true,
    };

    let mut charts = individual_and_comparison(
        countries,
        &commits,
        "Week",
        |c| {
            c.weekly
                .buckets
                .iter()
                .map(|b| (b.week_start, b.total_commits as f64))
                .collect()
        },
        own_highlight,
        comparison_highlight,
    );
    charts.extend(individual_and_comparison(
        countries,
        &users,
        "Week",
        |c| {
            c.weekly
                .buckets
                .iter()
                .map(|b| (b.week_start, b.active_users as f64))
                .collect()
        },
        own_highlight,
        comparison_highlight,
    ));

    for chart in &mut charts {
        if let Some(h) = chart.chart.highlight.as_mut() {
            h.edge_markers = false;
        }
    }
    charts
}

/// Every chart written into the main output directory.
pub fn full_chart_set(countries: &[CountrySeries], config: &RenderConfig, window: usize) -> Vec<NamedChart> {
    let day_span = config.show_highlight.then_some(config.highlight);
    let week_span = config.show_highlight.then_some(config.week_highlight);

    let mut charts = daily_raw_charts(countries, day_span);
    charts.extend(daily_rolling_charts(countries, day_span, window));
    charts.extend(change_charts(countries, day_span));
    charts.extend(weekly_charts(countries, week_span));
    charts
}
