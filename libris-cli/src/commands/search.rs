use std::path::PathBuf;

use libris_lib::CancelToken;

use crate::CliError;

use super::{log_book, open_catalog, print_json};

pub(crate) fn run_search(db: Option<PathBuf>, term: &str, json: bool) -> Result<(), CliError> {
    let catalog = open_catalog(db)?;
    let books = catalog.search(term, &CancelToken::new())?;

    if json {
        return print_json(&books);
    }
    if books.is_empty() {
        log::info!("No books match '{}'", term);
        return Ok(());
    }
    log::info!("{} book(s) match '{}':", books.len(), term);
    for book in &books {
        log_book(book);
    }
    Ok(())
}

pub(crate) fn run_list(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let catalog = open_catalog(db)?;
    let books = catalog.list_books()?;

    if json {
        return print_json(&books);
    }
    if books.is_empty() {
        log::info!("The catalog is empty. Run 'libris import <file>' to add books.");
        return Ok(());
    }
    for book in &books {
        log_book(book);
    }
    crate::log_blank();
    log::info!("{} book(s)", books.len());
    Ok(())
}
