// src/report/error.rs

use std::{fmt, io};

/// Failures that abort report generation. Missing pictures and incomplete
/// marks never surface here.
#[derive(Debug)]
pub enum ReportError {
    // The data source failed; no retry is attempted.
    Query(sqlx::Error),

    // The output sink refused a write.
    Sink(io::Error),

    // The PDF backend failed for a reason other than the sink.
    Render(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Query(e) => write!(f, "report query failed: {}", e),
            ReportError::Sink(e) => write!(f, "report output failed: {}", e),
            ReportError::Render(msg) => write!(f, "report rendering failed: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Query(e) => Some(e),
            ReportError::Sink(e) => Some(e),
            ReportError::Render(_) => None,
        }
    }
}

impl From<sqlx::Error> for ReportError {
    fn from(err: sqlx::Error) -> Self {
        ReportError::Query(err)
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        ReportError::Sink(err)
    }
}
