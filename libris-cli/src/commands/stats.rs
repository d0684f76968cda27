use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_catalog;

pub(crate) fn run_stats(db: Option<PathBuf>) -> Result<(), CliError> {
    let catalog = open_catalog(db)?;
    let stats = catalog.stats()?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!("  Books:          {:>8}", stats.books);
    log::info!("  Authors:        {:>8}", stats.authors);
    log::info!("  Publishers:     {:>8}", stats.publishers);
    log::info!("  Without ISBN:   {:>8}", stats.books_without_isbn);
    Ok(())
}
