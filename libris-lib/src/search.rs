//! Multi-criteria book search.
//!
//! A term is tried as a surrogate id, as an ISBN, and as free text; every
//! hit is merged by book id so a book matched several ways appears once.

use std::collections::HashMap;

use libris_catalog::types::Book;
use libris_db::{Gateway, OperationError};
use libris_import::CancelToken;

/// ISBN-10 and ISBN-13 digit counts.
const ISBN_LENGTHS: [usize; 2] = [10, 13];

#[derive(Clone)]
pub struct CatalogSearchEngine {
    gateway: Gateway,
}

impl CatalogSearchEngine {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Search by id, ISBN and free text, returning each matching book once,
    /// ordered by id.
    ///
    /// Cancellation is checked between the three stages; a cancelled search
    /// returns what it has found so far.
    pub fn search(&self, term: &str, cancel: &CancelToken) -> Result<Vec<Book>, OperationError> {
        let mut found: HashMap<i64, Book> = HashMap::new();

        if let Some(id) = as_book_id(term)
            && let Some(book) = self.gateway.find_by_id::<Book>(id)?
        {
            collect(&mut found, book);
        }

        if cancel.is_cancelled() {
            return Ok(into_sorted(found));
        }
        if let Some(isbn) = as_isbn(term)
            && let Some(book) = self.gateway.find_book_by_isbn(isbn)?
        {
            collect(&mut found, book);
        }

        if cancel.is_cancelled() {
            return Ok(into_sorted(found));
        }
        for book in self.gateway.search_books(term)? {
            collect(&mut found, book);
        }

        log::debug!("Search '{}' matched {} book(s)", term, found.len());
        Ok(into_sorted(found))
    }
}

/// A term made only of ASCII digits, read as a surrogate id.
fn as_book_id(term: &str) -> Option<i64> {
    if term.is_empty() || !term.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    term.parse().ok()
}

/// The term's digits, if there are exactly as many as an ISBN has.
///
/// Separators are ignored, so `978-85-359-0277-6` matches.
fn as_isbn(term: &str) -> Option<i64> {
    let digits: String = term.chars().filter(|c| c.is_ascii_digit()).collect();
    if !ISBN_LENGTHS.contains(&digits.len()) {
        return None;
    }
    digits.parse().ok()
}

fn collect(found: &mut HashMap<i64, Book>, book: Book) {
    if let Some(id) = book.id {
        found.entry(id).or_insert(book);
    }
}

fn into_sorted(found: HashMap<i64, Book>) -> Vec<Book> {
    let mut books: Vec<Book> = found.into_values().collect();
    books.sort_by_key(|b| b.id);
    books
}
