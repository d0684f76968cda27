use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{log_book, open_catalog};

pub(crate) fn run_lookup(db: Option<PathBuf>, isbn: &str, save: bool) -> Result<(), CliError> {
    let catalog = open_catalog(db)?;
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    log::debug!("Looking up {} at {}", isbn, catalog.settings().lookup_url());
    let draft = rt.block_on(catalog.lookup(isbn))?;

    log::info!(
        "{}",
        draft.title.if_supports_color(Stdout, |t| t.bold()),
    );
    if let Some(isbn) = draft.isbn {
        log::info!("  ISBN:      {}", isbn);
    }
    log::info!(
        "  Publisher: {}",
        draft.publisher.as_deref().unwrap_or("(unknown)")
    );
    log::info!(
        "  Published: {}",
        draft
            .published_on
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "(unknown)".to_string())
    );
    log::info!("  Authors:   {}", draft.authors.join("; "));

    if save {
        let (book, _) = catalog.save_draft(&draft)?;
        crate::log_blank();
        log::info!("Saved:");
        log_book(&book);
    }
    Ok(())
}
