// Wed Jan 14 2026 - Alex

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Line {line}: invalid score {token:?}")]
    InvalidScore { line: usize, token: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("No sources given")]
    NoSources,
    #[error("Ingestion cancelled with {pending} source(s) still running")]
    Cancelled { pending: usize },
    #[error("Ingestion timed out after {0:?}")]
    TimedOut(Duration),
}
