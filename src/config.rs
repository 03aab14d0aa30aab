// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub test_count: i64,
    pub log_level: String,
    pub show_progress: bool,
    pub timeout_seconds: Option<u64>,
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_count: 1,
            log_level: "info".to_string(),
            show_progress: true,
            timeout_seconds: None,
            poll_interval_ms: 25,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn with_test_count(mut self, test_count: i64) -> Self {
        self.test_count = test_count;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }
        if self.timeout_seconds == Some(0) {
            return Err("timeout_seconds must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}
