// Wed Jan 15 2026 - Alex

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spss")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(
    about = "Project submit server: merges submission files into a student registry",
    long_about = None
)]
pub struct Args {
    /// Submission files, one worker per file
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Students allowed to submit, one identifier per line
    #[arg(short, long)]
    pub roster: PathBuf,

    /// Number of tests in the project
    #[arg(short, long)]
    pub tests: Option<i64>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Give up waiting for workers after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub no_progress: bool,

    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if self.sources.is_empty() {
            return Err("At least one submission file is required".to_string());
        }
        if !self.roster.exists() {
            return Err(format!("Roster file does not exist: {:?}", self.roster));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        Ok(())
    }
}
