pub mod exec;
pub mod plan;
pub mod svg;

pub use exec::{exec, write_charts};
pub use plan::{
    change_charts, daily_raw_charts, daily_rolling_charts, full_chart_set, resolve_week_highlight,
    weekly_charts,
};
pub use svg::SvgRenderer;

use crate::error::Result;
use chrono::NaiveDate;
use std::path::Path;

/// Something that turns a [`Chart`] into a file.
pub trait ChartRenderer {
    fn extension(&self) -> &'static str;
    fn render(&self, chart: &Chart, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub label: String,
    pub color: String,
    pub points: Vec<(NaiveDate, f64)>,
    pub markers: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    /// Dashed vertical lines at both ends of the band.
    pub edge_markers: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub lines: Vec<ChartLine>,
    pub y_range: (f64, f64),
    pub highlight: Option<Highlight>,
    pub zero_line: bool,
}

impl Chart {
    pub fn has_data(&self) -> bool {
        self.lines.iter().any(|l| !l.points.is_empty())
    }

    /// First and last date covered by any line or by the highlight band.
    pub fn x_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .lines
            .iter()
            .flat_map(|l| l.points.iter().map(|(d, _)| *d))
            .chain(self.highlight.iter().flat_map(|h| [h.start, h.end]));

        dates.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }
}

/// A chart plus the file stem it is written under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedChart {
    pub file_stem: String,
    pub chart: Chart,
}

const PALETTE: [&str; 6] = ["orange", "red", "teal", "brown", "olive", "navy"];

pub fn country_color(country: &str, index: usize) -> &'static str {
    match country {
        "Bangladesh" => "blue",
        "India" => "green",
        "Philippines" => "purple",
        _ => PALETTE[index % PALETTE.len()],
    }
}
