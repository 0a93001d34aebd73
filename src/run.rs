use crate::{aggregator, locator, reader, report, settings::Settings};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Outcome of one end-to-end run. The first two variants end the run without
/// a new report and without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No candidate log file in the directory.
    NoLogFound,
    /// The report for the latest log already exists and rewriting is off.
    AlreadyExists(PathBuf),
    /// A report was rendered and written.
    Written(PathBuf),
}

/// One full pipeline pass: locate the latest log, aggregate it, render and
/// write the report. Threshold and I/O failures propagate to the caller.
pub fn run(settings: &Settings) -> Result<RunOutcome> {
    info!(
        "searching for the latest log file in {}",
        settings.log_dir.display()
    );
    let Some(logfile) = locator::find_latest(&settings.log_dir)
        .with_context(|| format!("Failed to scan log directory {}", settings.log_dir.display()))?
    else {
        info!("no log file found");
        return Ok(RunOutcome::NoLogFound);
    };
    info!(
        "latest log file is {} ({})",
        logfile.path.display(),
        logfile.date
    );

    let report_path = report::report_path(&settings.report_dir, logfile.date);
    if !settings.rewrite_report && report_path.is_file() {
        info!("report {} already exists", report_path.display());
        return Ok(RunOutcome::AlreadyExists(report_path));
    }

    let rows = reader::open_rows(&logfile)
        .with_context(|| format!("Failed to open log file {}", logfile.path.display()))?;
    let entries = aggregator::aggregate(rows, settings.error_limit_percentage)
        .context("Aggregation failed")?;
    info!("aggregated {} urls", entries.len());

    let rendered = report::render(&settings.report_template, &entries, settings.report_size)?;
    report::write_report(&report_path, &rendered)?;
    info!("report written to {}", report_path.display());

    Ok(RunOutcome::Written(report_path))
}
