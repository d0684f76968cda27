use std::path::{Path, PathBuf};

use libris_import::{ImportProgress, LogProgress};
use libris_lib::{BackgroundTask, CatalogError};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::spinner::{SpinnerProgress, new_spinner};

use super::open_catalog;

/// Import a CSV file, saving every valid row unless `dry_run` is set.
pub(crate) fn run_import(
    db: Option<PathBuf>,
    file: &Path,
    dry_run: bool,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let catalog = open_catalog(db)?;

    // Verbose runs log progress lines; a spinner would fight with them
    let pb = new_spinner(quiet || verbose, format!("Reading {}", file.display()));
    let progress: Box<dyn ImportProgress + Send> = if verbose {
        Box::new(LogProgress)
    } else {
        Box::new(SpinnerProgress::new(pb.clone()))
    };

    let worker = catalog.clone();
    let path = file.to_path_buf();
    let task = BackgroundTask::spawn(move |cancel| {
        let outcome = worker.import_file(&path, cancel, progress.as_ref())?;
        let report = if dry_run {
            None
        } else {
            Some(worker.save_all(&outcome.drafts, cancel, progress.as_ref()))
        };
        Ok::<_, CatalogError>((outcome, report))
    });

    let result = task.join();
    pb.finish_and_clear();
    let (outcome, report) = result.map_err(|e| CliError::runtime(e.to_string()))??;

    log::info!(
        "{} {}",
        "Import:".if_supports_color(Stdout, |t| t.bold()),
        file.display(),
    );
    log::info!(
        "  Accepted: {}",
        outcome
            .success_count()
            .if_supports_color(Stdout, |t| t.green()),
    );
    log::info!(
        "  Rejected: {}",
        outcome
            .failure_count()
            .if_supports_color(Stdout, |t| t.red()),
    );
    for error in &outcome.errors {
        log::info!("    {}", error);
    }
    if let Some(read_error) = &outcome.read_error {
        log::error!("Reading stopped early: {}", read_error);
    }

    match report {
        Some(report) => {
            crate::log_blank();
            log::info!(
                "Saved {} book(s): {} new, {} updated",
                report.saved(),
                report.inserted,
                report.updated,
            );
            if !report.failures.is_empty() {
                log::warn!("{} book(s) could not be saved:", report.failures.len());
                for failure in &report.failures {
                    log::warn!("  {}", failure);
                }
            }
        }
        None => {
            log::info!(
                "{}",
                "Dry run: nothing was saved".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    Ok(())
}
