// Wed Jan 14 2026 - Alex

use crate::ingest::cancel::CancelToken;
use crate::ingest::error::IngestError;
use crate::ingest::source::SubmissionSource;
use crate::ingest::worker::{IngestWorker, SourceOutcome, SourceStatus};
use crate::registry::Registry;
use crate::utils::logging::ScopedTimer;
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub outcomes: Vec<SourceOutcome>,
}

impl IngestReport {
    pub fn accepted(&self) -> usize {
        self.outcomes.iter().map(|o| o.status.stats().accepted).sum()
    }

    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_complete())
    }
}

/// Fans out one worker thread per source and waits for all of them.
pub struct IngestCoordinator {
    registry: Arc<Registry>,
    cancel: CancelToken,
    poll_interval: Duration,
    timeout: Option<Duration>,
    on_source_done: Option<Box<dyn Fn(&SourceOutcome) + Send>>,
}

impl IngestCoordinator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            cancel: CancelToken::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            on_source_done: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn on_source_done<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SourceOutcome) + Send + 'static,
    {
        self.on_source_done = Some(Box::new(callback));
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn ingest_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<IngestReport, IngestError> {
        let sources = paths
            .iter()
            .map(|p| Arc::new(p.as_ref().to_path_buf()) as Arc<dyn SubmissionSource>)
            .collect::<Vec<_>>();
        self.ingest(sources)
    }

    /// Starts every worker, then blocks until each has reported. Cancellation
    /// or the timeout ends the wait early with an error; workers still
    /// running are left to finish on their own.
    pub fn ingest(
        &self,
        sources: Vec<Arc<dyn SubmissionSource>>,
    ) -> Result<IngestReport, IngestError> {
        if sources.is_empty() {
            return Err(IngestError::NoSources);
        }

        let _timer = ScopedTimer::new("ingest");
        let started = Instant::now();
        let names: Vec<String> = sources.iter().map(|s| s.name()).collect();
        let (sender, receiver) = mpsc::channel();

        let mut spawned = Vec::with_capacity(sources.len());
        for (id, source) in sources.into_iter().enumerate() {
            let worker = IngestWorker::new(id, source, self.registry.clone());
            log::debug!("Spawning worker {} for {}", worker.id(), names[id]);
            match worker.start(sender.clone()) {
                Ok(_) => spawned.push(id),
                Err(e) => log::error!("Failed to spawn worker for {}: {}", names[id], e),
            }
        }
        drop(sender);

        let mut reported: Vec<Option<SourceOutcome>> = vec![None; names.len()];
        let mut pending = spawned.len();

        while pending > 0 {
            if self.cancel.is_cancelled() {
                log::warn!("Ingestion cancelled, {} source(s) pending", pending);
                return Err(IngestError::Cancelled { pending });
            }
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    log::warn!("Ingestion timed out, {} source(s) pending", pending);
                    return Err(IngestError::TimedOut(timeout));
                }
            }

            match receiver.recv_timeout(self.poll_interval) {
                Ok(outcome) => {
                    if let Some(callback) = &self.on_source_done {
                        callback(&outcome);
                    }
                    let id = outcome.worker_id;
                    reported[id] = Some(outcome);
                    pending -= 1;
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let outcomes = reported
            .into_iter()
            .zip(names)
            .enumerate()
            .map(|(id, (outcome, source))| {
                outcome.unwrap_or_else(|| {
                    log::warn!("Worker for {} exited without reporting", source);
                    SourceOutcome {
                        worker_id: id,
                        source,
                        status: SourceStatus::Aborted,
                    }
                })
            })
            .collect();

        Ok(IngestReport { outcomes })
    }
}

impl Registry {
    /// Reads every path concurrently into this registry. Returns `false` if
    /// `paths` is empty or the wait for workers did not complete.
    pub fn ingest_all<P: AsRef<Path>>(self: &Arc<Self>, paths: &[P]) -> bool {
        IngestCoordinator::new(self.clone()).ingest_paths(paths).is_ok()
    }
}
