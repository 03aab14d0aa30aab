// Wed Jan 15 2026 - Alex

use super::args::Args;
use crate::config::Config;
use crate::ingest::{IngestCoordinator, IngestReport, SourceStatus};
use crate::output::Report;
use crate::registry::Registry;
use crate::ui::{print_info, print_success, print_warning};
use crate::utils::logging::LoggingUtils;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::sync::Arc;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.resolve_config(&args)?;
        LoggingUtils::init_logger(LoggingUtils::level_from_str(&config.log_level));
        log::debug!("Resolved config: {:?}", config);

        let registry = Registry::shared(config.test_count);
        let added = load_roster(&registry, &args.roster)?;
        if !args.quiet {
            print_info(&format!(
                "{} students registered, {} tests per submission",
                added,
                registry.test_count()
            ));
        }

        let ingest = self.ingest(&registry, &config, &args)?;
        let report = Report::from_registry(&registry);

        if !args.quiet {
            for failed in ingest.failed_sources() {
                print_warning(&format!("{}: {}", failed.source, describe(&failed.status)));
            }
            println!();
            print!("{}", report.render_text());
        }

        if let Some(path) = &args.json_output {
            report
                .write_json(path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                print_success(&format!("Report saved to: {}", path.display()));
            }
        }

        Ok(())
    }

    fn resolve_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::new(),
        };

        if let Some(tests) = args.tests {
            config = config.with_test_count(tests);
        }
        if let Some(level) = &args.log_level {
            config = config.with_log_level(level.clone());
        }
        if args.timeout.is_some() {
            config = config.with_timeout_seconds(args.timeout);
        }
        if args.no_progress || args.quiet {
            config = config.with_progress(false);
        }

        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    fn ingest(
        &self,
        registry: &Arc<Registry>,
        config: &Config,
        args: &Args,
    ) -> anyhow::Result<IngestReport> {
        let progress = if config.show_progress {
            let pb = ProgressBar::new(args.sources.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(PROGRESS_TEMPLATE)?
                    .progress_chars("#>-"),
            );
            pb.set_message("Reading submissions...");
            Some(pb)
        } else {
            None
        };

        let mut coordinator = IngestCoordinator::new(registry.clone())
            .with_poll_interval(config.poll_interval())
            .with_timeout(config.timeout());
        if let Some(pb) = progress.clone() {
            coordinator = coordinator.on_source_done(move |outcome| {
                pb.inc(1);
                pb.set_message(outcome.source.clone());
            });
        }

        let result = coordinator.ingest_paths(&args.sources);

        if let Some(pb) = &progress {
            match &result {
                Ok(_) => pb.finish_with_message("Complete!"),
                Err(_) => pb.abandon_with_message("Incomplete"),
            }
        }

        result.context("Ingestion did not finish")
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers every identifier in the roster file. Blank lines are ignored;
/// rejected identifiers are logged and skipped.
pub fn load_roster(registry: &Registry, path: &Path) -> anyhow::Result<usize> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;

    let mut added = 0;
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match registry.try_add_student(line) {
            Ok(()) => added += 1,
            Err(e) => log::warn!("Roster entry skipped: {}", e),
        }
    }
    Ok(added)
}

fn describe(status: &SourceStatus) -> String {
    match status {
        SourceStatus::Completed(stats) => format!("{} lines", stats.lines),
        SourceStatus::Unreadable(reason) => format!("unreadable ({})", reason),
        SourceStatus::Interrupted { stats, reason } => {
            format!("stopped after {} lines ({})", stats.lines, reason)
        }
        SourceStatus::Aborted => "worker aborted".to_string(),
    }
}
