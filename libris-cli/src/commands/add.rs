use std::path::PathBuf;

use chrono::NaiveDate;
use libris_catalog::types::BookDraft;
use libris_import::SaveKind;

use crate::CliError;
use crate::cli_types::BookArgs;

use super::{log_book, open_catalog};

pub(crate) fn run_add(db: Option<PathBuf>, args: BookArgs) -> Result<(), CliError> {
    let draft = draft_from_args(args)?;
    let catalog = open_catalog(db)?;
    let (book, kind) = catalog.save_draft(&draft)?;

    match kind {
        SaveKind::Inserted => log::info!("Added:"),
        SaveKind::Updated => log::info!("Updated existing book with the same ISBN:"),
    }
    log_book(&book);
    Ok(())
}

fn draft_from_args(args: BookArgs) -> Result<BookDraft, CliError> {
    let published_on = match args.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => Some(
            NaiveDate::parse_from_str(date, "%d/%m/%Y")
                .map_err(|_| CliError::input(format!("date '{}' is not dd/MM/yyyy", date)))?,
        ),
        _ => None,
    };

    let authors: Vec<String> = args
        .authors
        .iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();
    if authors.is_empty() {
        return Err(CliError::input("at least one author must be provided"));
    }

    Ok(BookDraft {
        id: None,
        isbn: args.isbn,
        title: args.title.trim().to_string(),
        publisher: args
            .publisher
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        published_on,
        authors,
    })
}
