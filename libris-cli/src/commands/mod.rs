pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod delete;
pub(crate) mod import;
pub(crate) mod lookup;
pub(crate) mod search;
pub(crate) mod stats;

use std::path::PathBuf;

use libris_catalog::types::Book;
use libris_lib::{Catalog, Settings};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Load settings and open the catalog at the resolved database path.
pub(crate) fn open_catalog(db_override: Option<PathBuf>) -> Result<Catalog, CliError> {
    let settings = load_settings()?;
    let path = settings.database_path(db_override);
    Ok(Catalog::open(&path, settings)?)
}

pub(crate) fn load_settings() -> Result<Settings, CliError> {
    Settings::load().map_err(|e| CliError::config(e.to_string()))
}

/// Log one book as a single summary line.
pub(crate) fn log_book(book: &Book) {
    let id = book.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
    let isbn = book
        .isbn
        .map(|isbn| isbn.to_string())
        .unwrap_or_else(|| "no ISBN".into());
    let authors: Vec<&str> = book.authors.iter().map(|a| a.name.as_str()).collect();

    log::info!(
        "  {:>5}  {}  {}",
        id.if_supports_color(Stdout, |t| t.dimmed()),
        book.title.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", isbn).if_supports_color(Stdout, |t| t.cyan()),
    );
    let mut details = Vec::new();
    if !authors.is_empty() {
        details.push(authors.join("; "));
    }
    if let Some(publisher) = &book.publisher {
        details.push(publisher.name.clone());
    }
    if let Some(date) = book.published_on {
        details.push(date.format("%d/%m/%Y").to_string());
    }
    if !details.is_empty() {
        log::info!("         {}", details.join(" | "));
    }
}

/// Print books as pretty JSON on stdout.
pub(crate) fn print_json(books: &[Book]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(books)
        .map_err(|e| CliError::runtime(format!("Failed to serialize results: {}", e)))?;
    println!("{}", json);
    Ok(())
}
