//! Book deletion that also removes authors and publishers left unreferenced.

use libris_catalog::types::{Author, Book, Publisher};
use libris_db::{Gateway, OperationError};

/// What a deletion removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub book_id: i64,
    pub removed_publisher: Option<i64>,
    pub removed_authors: Vec<i64>,
}

#[derive(Clone)]
pub struct ReferentialCleanup {
    gateway: Gateway,
}

impl ReferentialCleanup {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Delete a book, then its publisher and each of its authors if no
    /// remaining book references them.
    ///
    /// The book must carry the persisted ids of its relations, as returned
    /// by `find_by_id`. Every step commits on its own.
    pub fn delete_book(&self, book: &Book) -> Result<CleanupReport, OperationError> {
        self.gateway.delete(book)?;
        let mut report = CleanupReport {
            book_id: book.id.unwrap_or_default(),
            ..Default::default()
        };

        if let Some(publisher_id) = book.publisher_id()
            && !self.gateway.publisher_in_use(publisher_id)?
            && self.gateway.delete_by_id::<Publisher>(publisher_id)?
        {
            log::debug!("Removed orphaned publisher {}", publisher_id);
            report.removed_publisher = Some(publisher_id);
        }

        for author_id in book.author_ids() {
            if !self.gateway.author_in_use(author_id)?
                && self.gateway.delete_by_id::<Author>(author_id)?
            {
                log::debug!("Removed orphaned author {}", author_id);
                report.removed_authors.push(author_id);
            }
        }

        Ok(report)
    }
}
