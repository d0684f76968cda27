//! Insert-or-overwrite persistence of validated drafts.
//!
//! A draft whose ISBN already exists in the catalog overwrites that book;
//! otherwise a new book is inserted. Every save is its own unit of work:
//! a failure on one draft never undoes the drafts saved before it.

use libris_catalog::types::{Author, Book, BookDraft};
use libris_db::Gateway;
use libris_db::operations::OperationError;
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::progress::ImportProgress;
use crate::reconcile::EntityReconciler;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Book title cannot be empty")]
    EmptyTitle,
}

/// Whether a save created a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Inserted,
    Updated,
}

/// Result of saving a batch of drafts.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub inserted: usize,
    pub updated: usize,
    /// One message per draft that could not be saved, in input order.
    pub failures: Vec<String>,
    pub cancelled: bool,
}

impl ImportReport {
    pub fn saved(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Persist one draft, resolving its publisher and authors first.
///
/// Existing similar-book links on an overwritten row are kept, since drafts
/// never carry them.
pub fn save_draft(gateway: &Gateway, draft: &BookDraft) -> Result<(Book, SaveKind), SaveError> {
    if draft.title.trim().is_empty() {
        return Err(SaveError::EmptyTitle);
    }

    let mut id = draft.id;
    if let Some(isbn) = draft.isbn
        && let Some(existing) = gateway.book_id_by_isbn(isbn)?
    {
        id = Some(existing);
    }

    let existing: Option<Book> = match id {
        Some(id) => gateway.find_by_id(id)?,
        None => None,
    };

    let reconciler = EntityReconciler::new(gateway.clone());
    let publisher = match &draft.publisher {
        Some(name) => Some(reconciler.resolve_publisher(name)?),
        None => None,
    };
    let authors = draft
        .authors
        .iter()
        .map(|name| reconciler.resolve_author(name))
        .collect::<Result<Vec<Author>, _>>()?;

    let book = Book {
        id,
        title: draft.title.clone(),
        isbn: draft.isbn,
        published_on: draft.published_on,
        publisher,
        authors,
        similar_ids: existing
            .as_ref()
            .map(|b| b.similar_ids.clone())
            .unwrap_or_default(),
    };
    let saved = gateway.save(&book)?;

    let kind = if existing.is_some() {
        SaveKind::Updated
    } else {
        SaveKind::Inserted
    };
    log::debug!("{:?} book '{}' (id {:?})", kind, saved.title, saved.id);
    Ok((saved, kind))
}

/// Save every draft independently, collecting failures instead of stopping.
pub fn save_all(
    gateway: &Gateway,
    drafts: &[BookDraft],
    cancel: &CancelToken,
    progress: &dyn ImportProgress,
) -> ImportReport {
    let mut report = ImportReport::default();
    let total = drafts.len();

    for (i, draft) in drafts.iter().enumerate() {
        if cancel.is_cancelled() {
            log::info!("Save cancelled after {} of {} drafts", i, total);
            report.cancelled = true;
            break;
        }

        match save_draft(gateway, draft) {
            Ok((_, SaveKind::Inserted)) => report.inserted += 1,
            Ok((_, SaveKind::Updated)) => report.updated += 1,
            Err(e) => {
                let message = format!("{}: {}", draft_label(draft), e);
                log::warn!("Failed to save {}", message);
                report.failures.push(message);
            }
        }
        progress.on_saved(i + 1, total, &draft.title);
    }

    progress.on_complete(&format!(
        "Saved {} book(s): {} new, {} updated, {} failed",
        report.saved(),
        report.inserted,
        report.updated,
        report.failures.len()
    ));
    report
}

fn draft_label(draft: &BookDraft) -> String {
    match draft.isbn {
        Some(isbn) => format!("ISBN {}", isbn),
        None => format!("'{}'", draft.title),
    }
}
