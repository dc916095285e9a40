use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcnetError {
    #[error("No SRS report found within 12 hours of {}", time.to_rfc3339())]
    ReportNotFound { time: DateTime<Utc> },

    #[error("Error downloading SRS report {locator}: {reason}")]
    ReportDownload { locator: String, reason: String },

    #[error("SRS report {locator} has no content")]
    ReportMissing { locator: String },

    #[error("Malformed SRS report at line {line}: {reason}")]
    ReportParse { line: usize, reason: String },

    #[error("Archive error: {0}")]
    ArchiveError(String),
}

impl ArcnetError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::ReportParse {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArcnetError>;
