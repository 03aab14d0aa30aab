// Wed Jan 14 2026 - Alex

use crate::ingest::parser::parse_line;
use crate::ingest::source::SubmissionSource;
use crate::registry::Registry;
use serde::Serialize;
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    pub lines: usize,
    pub accepted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SourceStatus {
    Completed(LineStats),
    /// The source could not be opened; nothing was read from it.
    Unreadable(String),
    /// Reading stopped part way. Lines before the failure stay merged.
    Interrupted { stats: LineStats, reason: String },
    /// The worker died without reporting.
    Aborted,
}

impl SourceStatus {
    pub fn stats(&self) -> LineStats {
        match self {
            SourceStatus::Completed(stats) => *stats,
            SourceStatus::Interrupted { stats, .. } => *stats,
            SourceStatus::Unreadable(_) | SourceStatus::Aborted => LineStats::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SourceStatus::Completed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub worker_id: usize,
    pub source: String,
    pub status: SourceStatus,
}

/// Reads one source and merges each of its lines into the shared registry.
pub struct IngestWorker {
    id: usize,
    source: Arc<dyn SubmissionSource>,
    registry: Arc<Registry>,
}

impl IngestWorker {
    pub fn new(id: usize, source: Arc<dyn SubmissionSource>, registry: Arc<Registry>) -> Self {
        Self {
            id,
            source,
            registry,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Runs the worker on its own thread and sends its outcome on `sender`
    /// when done. The thread is not tied to the receiver's lifetime.
    pub fn start(self, sender: Sender<SourceOutcome>) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(format!("ingest-{}", self.id))
            .spawn(move || {
                let outcome = self.run();
                let _ = sender.send(outcome);
            })
    }

    pub fn run(&self) -> SourceOutcome {
        let name = self.source.name();
        log::info!("[worker {}] start {}", self.id, name);

        let status = match self.source.open() {
            Ok(reader) => self.process(reader),
            Err(e) => {
                log::warn!("[worker {}] cannot open {}: {}", self.id, name, e);
                SourceStatus::Unreadable(e.to_string())
            }
        };

        log::info!("[worker {}] end {} ({:?})", self.id, name, status.stats());

        SourceOutcome {
            worker_id: self.id,
            source: name,
            status,
        }
    }

    fn process(&self, reader: Box<dyn BufRead + Send>) -> SourceStatus {
        let mut stats = LineStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return self.interrupted(stats, e.to_string()),
            };

            let parsed = match parse_line(&line, index + 1) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => continue,
                Err(e) => return self.interrupted(stats, e.to_string()),
            };

            stats.lines += 1;
            if self.registry.merge(&parsed.identifier, &parsed.scores) {
                stats.accepted += 1;
            } else {
                stats.skipped += 1;
            }
        }

        SourceStatus::Completed(stats)
    }

    fn interrupted(&self, stats: LineStats, reason: String) -> SourceStatus {
        log::warn!(
            "[worker {}] stopped reading {}: {}",
            self.id,
            self.source.name(),
            reason
        );
        SourceStatus::Interrupted { stats, reason }
    }
}
