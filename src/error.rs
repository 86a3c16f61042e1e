use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrendError>;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("Failed to load {}: {reason}", path.display())]
    DataLoad { path: PathBuf, reason: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid week: {0}")]
    InvalidWeek(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrendError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TrendError::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Load failures are recovered per country; everything else is fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TrendError::DataLoad { .. })
    }
}
