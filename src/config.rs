use crate::error::{Result, TrendError};
use crate::model::{DateSpan, WeekSpan};
use crate::util::{parse_date, parse_week_label};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_COUNTRIES: [&str; 3] = ["Bangladesh", "India", "Philippines"];
pub const DEFAULT_WINDOW: usize = 7;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_HIGHLIGHT_START: &str = "2024-07-17";
pub const DEFAULT_HIGHLIGHT_END: &str = "2024-07-24";
pub const DEFAULT_HIGHLIGHT_WEEK_START: &str = "2024-W29";
pub const DEFAULT_HIGHLIGHT_WEEK_END: &str = "2024-W30";
pub const UNSHADED_SUBDIR: &str = "sin_sombreado";

/// Inputs shared by every command: where the country files live, which
/// countries to load, and the rolling window.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub countries: Vec<String>,
    pub window: usize,
}

impl AnalysisConfig {
    pub fn new(data_dir: impl Into<PathBuf>, countries: Vec<String>, window: usize) -> Result<Self> {
        let config = Self {
            data_dir: data_dir.into(),
            countries,
            window,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(TrendError::InvalidArgument(
                "window must be a positive number of days".to_string(),
            ));
        }
        if self.countries.is_empty() {
            return Err(TrendError::InvalidArgument(
                "at least one country is required".to_string(),
            ));
        }
        if let Some(blank) = self.countries.iter().find(|c| c.trim().is_empty()) {
            return Err(TrendError::InvalidArgument(format!(
                "country name '{blank}' is empty"
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            window: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub highlight: DateSpan,
    pub week_highlight: WeekSpan,
    pub show_highlight: bool,
    /// Also write the rolling daily charts without highlight into `UNSHADED_SUBDIR`.
    pub unshaded_copy: bool,
}

impl RenderConfig {
    pub fn from_labels(
        output_dir: impl Into<PathBuf>,
        highlight_start: &str,
        highlight_end: &str,
        week_start: &str,
        week_end: &str,
    ) -> Result<Self> {
        let start = parse_date(highlight_start)?;
        let end = parse_date(highlight_end)?;
        if start > end {
            return Err(TrendError::InvalidDate(format!(
                "highlight start ({start}) is after highlight end ({end})"
            )));
        }

        let week_start = parse_week_label(week_start)?;
        let week_end = parse_week_label(week_end)?;
        if week_start > week_end {
            return Err(TrendError::InvalidWeek(format!(
                "highlight week start ({week_start}) is after highlight week end ({week_end})"
            )));
        }

        Ok(Self {
            output_dir: output_dir.into(),
            highlight: DateSpan::new(start, end),
            week_highlight: WeekSpan {
                start: week_start,
                end: week_end,
            },
            show_highlight: true,
            unshaded_copy: true,
        })
    }

    pub fn with_highlight(mut self, show: bool) -> Self {
        self.show_highlight = show;
        self
    }

    pub fn with_unshaded_copy(mut self, enabled: bool) -> Self {
        self.unshaded_copy = enabled;
        self
    }

    pub fn unshaded_dir(&self) -> PathBuf {
        self.output_dir.join(UNSHADED_SUBDIR)
    }
}
