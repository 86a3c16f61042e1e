use super::{Chart, ChartRenderer};
use crate::error::{Result, TrendError};
use chrono::{Duration, NaiveDate};
use std::fmt::Write;
use std::path::Path;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 110.0;
const Y_TICKS: usize = 5;
const X_TICK_DAYS: i64 = 14;

/// Writes charts as standalone SVG documents.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

struct Frame {
    x0: NaiveDate,
    days: f64,
    y_min: f64,
    y_max: f64,
    plot_w: f64,
    plot_h: f64,
}

impl Frame {
    fn x(&self, date: NaiveDate) -> f64 {
        let offset = (date - self.x0).num_days() as f64;
        MARGIN_LEFT + offset / self.days * self.plot_w
    }

    fn y(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.y_min, self.y_max);
        MARGIN_TOP + (self.y_max - clamped) / (self.y_max - self.y_min) * self.plot_h
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

impl SvgRenderer {
    pub fn to_svg(&self, chart: &Chart) -> Result<String> {
        let (x0, x1) = chart
            .x_extent()
            .ok_or_else(|| TrendError::Render(format!("chart '{}' has no data", chart.title)))?;

        let (mut y_min, mut y_max) = chart.y_range;
        if !(y_max > y_min) {
            y_min = y_min.min(0.0);
            y_max = y_min + 1.0;
        }

        let width = self.width as f64;
        let height = self.height as f64;
        let frame = Frame {
            x0,
            days: ((x1 - x0).num_days() as f64).max(1.0),
            y_min,
            y_max,
            plot_w: width - MARGIN_LEFT - MARGIN_RIGHT,
            plot_h: height - MARGIN_TOP - MARGIN_BOTTOM,
        };

        let mut svg = String::new();
        self.write_document(&mut svg, chart, &frame, x1)
            .map_err(|e| TrendError::Render(format!("failed to format '{}': {e}", chart.title)))?;
        Ok(svg)
    }

    fn write_document(&self, svg: &mut String, chart: &Chart, frame: &Frame, x1: NaiveDate) -> std::fmt::Result {
        let (w, h) = (self.width, self.height);
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#
        )?;
        writeln!(svg, r#"<rect width="{w}" height="{h}" fill="white"/>"#)?;
        writeln!(
            svg,
            r#"<text x="{}" y="30" text-anchor="middle" font-size="18">{}</text>"#,
            w as f64 / 2.0,
            escape(&chart.title)
        )?;

        let plot_bottom = MARGIN_TOP + frame.plot_h;
        let plot_right = MARGIN_LEFT + frame.plot_w;

        // grid + y ticks
        for i in 0..=Y_TICKS {
            let value = frame.y_min + (frame.y_max - frame.y_min) * i as f64 / Y_TICKS as f64;
            let y = frame.y(value);
            writeln!(
                svg,
                r#"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{plot_right:.1}" y2="{y:.1}" stroke="lightgray" stroke-dasharray="4 4"/>"#
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
                MARGIN_LEFT - 8.0,
                y + 4.0,
                format_tick(value)
            )?;
        }

        // x ticks every two weeks
        let mut tick = frame.x0;
        while tick <= x1 {
            let x = frame.x(tick);
            writeln!(
                svg,
                r#"<line x1="{x:.1}" y1="{MARGIN_TOP}" x2="{x:.1}" y2="{plot_bottom:.1}" stroke="lightgray" stroke-dasharray="4 4"/>"#
            )?;
            writeln!(
                svg,
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="end" transform="rotate(-45 {x:.1} {:.1})">{}</text>"#,
                plot_bottom + 16.0,
                plot_bottom + 16.0,
                tick.format("%Y-%m-%d")
            )?;
            tick += Duration::days(X_TICK_DAYS);
        }

        if let Some(highlight) = &chart.highlight {
            let (hx0, hx1) = (frame.x(highlight.start), frame.x(highlight.end));
            writeln!(
                svg,
                r#"<rect x="{hx0:.1}" y="{MARGIN_TOP}" width="{:.1}" height="{:.1}" fill="yellow" fill-opacity="0.2"><title>{}</title></rect>"#,
                (hx1 - hx0).max(1.0),
                frame.plot_h,
                escape(&highlight.label)
            )?;
            if highlight.edge_markers {
                for x in [hx0, hx1] {
                    writeln!(
                        svg,
                        r#"<line x1="{x:.1}" y1="{MARGIN_TOP}" x2="{x:.1}" y2="{plot_bottom:.1}" stroke="red" stroke-opacity="0.7" stroke-dasharray="6 4"/>"#
                    )?;
                }
            }
        }

        if chart.zero_line && frame.y_min < 0.0 && frame.y_max > 0.0 {
            let y = frame.y(0.0);
            writeln!(
                svg,
                r#"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{plot_right:.1}" y2="{y:.1}" stroke="black" stroke-opacity="0.3"/>"#
            )?;
        }

        for line in chart.lines.iter().filter(|l| !l.points.is_empty()) {
            let coords: Vec<String> = line
                .points
                .iter()
                .map(|(d, v)| format!("{:.1},{:.1}", frame.x(*d), frame.y(*v)))
                .collect();
            let stroke_width = if line.markers { 1.0 } else { 2.5 };
            writeln!(
                svg,
                r#"<polyline fill="none" stroke="{}" stroke-width="{stroke_width}" points="{}"/>"#,
                escape(&line.color),
                coords.join(" ")
            )?;
            if line.markers {
                for (d, v) in &line.points {
                    writeln!(
                        svg,
                        r#"<circle cx="{:.1}" cy="{:.1}" r="2.5" fill="{}"/>"#,
                        frame.x(*d),
                        frame.y(*v),
                        escape(&line.color)
                    )?;
                }
            }
        }

        // axes
        writeln!(
            svg,
            r#"<rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
            frame.plot_w, frame.plot_h
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + frame.plot_w / 2.0,
            self.height as f64 - 10.0,
            escape(&chart.x_label)
        )?;
        writeln!(
            svg,
            r#"<text x="20" y="{:.1}" text-anchor="middle" transform="rotate(-90 20 {:.1})">{}</text>"#,
            MARGIN_TOP + frame.plot_h / 2.0,
            MARGIN_TOP + frame.plot_h / 2.0,
            escape(&chart.y_label)
        )?;

        // legend
        let legend_x = plot_right - 200.0;
        let mut legend_y = MARGIN_TOP + 20.0;
        for line in &chart.lines {
            writeln!(
                svg,
                r#"<line x1="{legend_x:.1}" y1="{legend_y:.1}" x2="{:.1}" y2="{legend_y:.1}" stroke="{}" stroke-width="2.5"/>"#,
                legend_x + 24.0,
                escape(&line.color)
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}">{}</text>"#,
                legend_x + 30.0,
                legend_y + 4.0,
                escape(&line.label)
            )?;
            legend_y += 18.0;
        }
        if let Some(highlight) = &chart.highlight {
            writeln!(
                svg,
                r#"<rect x="{legend_x:.1}" y="{:.1}" width="24" height="10" fill="yellow" fill-opacity="0.4"/>"#,
                legend_y - 5.0
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}">{}</text>"#,
                legend_x + 30.0,
                legend_y + 4.0,
                escape(&highlight.label)
            )?;
        }

        writeln!(svg, "</svg>")
    }
}

impl ChartRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, chart: &Chart, path: &Path) -> Result<()> {
        let svg = self.to_svg(chart)?;
        std::fs::write(path, svg)?;
        Ok(())
    }
}
