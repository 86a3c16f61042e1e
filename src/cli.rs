use crate::config::{
    AnalysisConfig, RenderConfig, DEFAULT_COUNTRIES, DEFAULT_DATA_DIR, DEFAULT_HIGHLIGHT_END,
    DEFAULT_HIGHLIGHT_START, DEFAULT_HIGHLIGHT_WEEK_END, DEFAULT_HIGHLIGHT_WEEK_START,
    DEFAULT_OUTPUT_DIR, DEFAULT_WINDOW,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commit-trends")]
#[command(about = "Daily and weekly commit activity trends per country, with blackout highlighting")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Directory holding {country}_data.json files", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[arg(
        long,
        help = "Comma-separated list of countries",
        value_delimiter = ',',
        default_values_t = DEFAULT_COUNTRIES.map(String::from)
    )]
    pub countries: Vec<String>,

    #[arg(long, help = "Rolling average window in days", default_value_t = DEFAULT_WINDOW)]
    pub window: usize,
}

impl CommonArgs {
    pub fn to_config(&self) -> crate::error::Result<AnalysisConfig> {
        AnalysisConfig::new(self.data_dir.clone(), self.countries.clone(), self.window)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Gap-filled daily commits and active users with rolling averages
    Daily {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Omit rolling averages")]
        raw: bool,
    },
    /// Commits and active users per ISO week
    Weekly {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Day-over-day percentage change of the rolling commit average
    Change {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Write individual and comparison charts
    Render {
        #[arg(long, help = "Output directory for charts", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        #[arg(long, help = "First day of the highlight period (YYYY-MM-DD)", default_value = DEFAULT_HIGHLIGHT_START)]
        highlight_start: String,

        #[arg(long, help = "Last day of the highlight period (YYYY-MM-DD)", default_value = DEFAULT_HIGHLIGHT_END)]
        highlight_end: String,

        #[arg(long, help = "First highlighted ISO week (YYYY-Www)", default_value = DEFAULT_HIGHLIGHT_WEEK_START)]
        highlight_week_start: String,

        #[arg(long, help = "Last highlighted ISO week (YYYY-Www)", default_value = DEFAULT_HIGHLIGHT_WEEK_END)]
        highlight_week_end: String,

        #[arg(long, help = "Do not shade the highlight period")]
        no_highlight: bool,

        #[arg(long, help = "Skip the extra unshaded copy of the daily charts")]
        skip_unshaded: bool,

        #[arg(long, short, help = "No progress bar or summary")]
        quiet: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let analysis = self.common.to_config().context("Invalid configuration")?;

        match self.command {
            Commands::Daily { json, ndjson, raw } => crate::daily::exec(analysis, json, ndjson, raw),
            Commands::Weekly { json, ndjson } => crate::weekly::exec(analysis, json, ndjson),
            Commands::Change { json, ndjson } => crate::change::exec(analysis, json, ndjson),
            Commands::Render {
                output,
                highlight_start,
                highlight_end,
                highlight_week_start,
                highlight_week_end,
                no_highlight,
                skip_unshaded,
                quiet,
            } => {
                let render = RenderConfig::from_labels(
                    output,
                    &highlight_start,
                    &highlight_end,
                    &highlight_week_start,
                    &highlight_week_end,
                )
                .context("Invalid highlight period")?
                .with_highlight(!no_highlight)
                .with_unshaded_copy(!skip_unshaded);

                crate::render::exec(analysis, render, quiet)
            }
        }
    }
}
