// Tue Jan 15 2026 - Alex

pub mod config;
pub mod ingest;
pub mod output;
pub mod registry;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use ingest::{CancelToken, IngestCoordinator, IngestError, IngestReport};
pub use output::Report;
pub use registry::{Registry, Student, SubmissionError};
