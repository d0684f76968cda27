//! Explicit parameterized read queries for the catalog database.
//!
//! Provides lookup by ISBN and name, free-text search, reference checks used
//! by orphan cleanup, and catalog statistics.

use libris_catalog::types::*;
use rusqlite::{Connection, params};

use crate::operations::OperationError;
use crate::repository::{Entity, find_by_id};
use crate::schema::UNICODE_LOWER_FN;

// ── Book Lookups ────────────────────────────────────────────────────────────

/// Find the id of the book carrying an ISBN.
pub fn book_id_by_isbn(conn: &Connection, isbn: i64) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM books WHERE isbn = ?1",
        params![isbn],
        |row| row.get::<_, i64>(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a fully hydrated book by ISBN.
pub fn find_book_by_isbn(conn: &Connection, isbn: i64) -> Result<Option<Book>, OperationError> {
    match book_id_by_isbn(conn, isbn)? {
        Some(id) => find_by_id::<Book>(conn, id),
        None => Ok(None),
    }
}

/// Ids of books whose title, publisher name, or any author name contains
/// `term` (case-insensitive). A blank term matches nothing.
pub fn search_book_ids(conn: &Connection, term: &str) -> Result<Vec<i64>, OperationError> {
    if term.trim().is_empty() {
        return Ok(Vec::new());
    }

    let pattern = like_pattern(term);
    let sql = format!(
        "SELECT DISTINCT b.id
         FROM books b
         LEFT JOIN publishers p ON p.id = b.publisher_id
         LEFT JOIN book_authors ba ON ba.book_id = b.id
         LEFT JOIN authors a ON a.id = ba.author_id
         WHERE {f}(b.title) LIKE ?1 ESCAPE '\\'
            OR {f}(p.name) LIKE ?1 ESCAPE '\\'
            OR {f}(a.name) LIKE ?1 ESCAPE '\\'
         ORDER BY b.id",
        f = UNICODE_LOWER_FN
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![pattern], |row| row.get::<_, i64>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Hydrated books matching [`search_book_ids`].
pub fn search_books(conn: &Connection, term: &str) -> Result<Vec<Book>, OperationError> {
    let mut books = Vec::new();
    for id in search_book_ids(conn, term)? {
        if let Some(book) = find_by_id::<Book>(conn, id)? {
            books.push(book);
        }
    }
    Ok(books)
}

/// Build a `%term%` LIKE pattern, lowercased, with wildcards escaped.
fn like_pattern(term: &str) -> String {
    let lowered = term.to_lowercase();
    let mut pattern = String::with_capacity(lowered.len() + 2);
    pattern.push('%');
    for c in lowered.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ── Reference Checks ────────────────────────────────────────────────────────

/// Whether any book still references the publisher.
pub fn publisher_in_use(conn: &Connection, publisher_id: i64) -> Result<bool, OperationError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM books WHERE publisher_id = ?1",
        params![publisher_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Whether any book still references the author.
pub fn author_in_use(conn: &Connection, author_id: i64) -> Result<bool, OperationError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM book_authors WHERE author_id = ?1",
        params![author_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

// ── Name Lookups ────────────────────────────────────────────────────────────

/// Find an author by exact name. The oldest row wins if duplicates exist.
pub fn find_author_by_name(conn: &Connection, name: &str) -> Result<Option<Author>, OperationError> {
    find_named::<Author>(conn, name)
}

/// Find a publisher by exact name. The oldest row wins if duplicates exist.
pub fn find_publisher_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<Publisher>, OperationError> {
    find_named::<Publisher>(conn, name)
}

fn find_named<T: Entity>(conn: &Connection, name: &str) -> Result<Option<T>, OperationError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE name = ?1 ORDER BY id LIMIT 1",
        T::COLUMNS,
        T::TABLE
    );
    let result = conn.query_row(&sql, params![name], T::from_row);
    match result {
        Ok(entity) => Ok(Some(entity)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let books: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0))?;
    let authors: i64 = conn.query_row("SELECT COUNT(*) FROM authors", [], |r| r.get(0))?;
    let publishers: i64 = conn.query_row("SELECT COUNT(*) FROM publishers", [], |r| r.get(0))?;
    let without_isbn: i64 = conn.query_row(
        "SELECT COUNT(*) FROM books WHERE isbn IS NULL",
        [],
        |r| r.get(0),
    )?;

    Ok(CatalogStats {
        books,
        authors,
        publishers,
        books_without_isbn: without_isbn,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub books: i64,
    pub authors: i64,
    pub publishers: i64,
    pub books_without_isbn: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn like_pattern_lowercases_unicode() {
        assert_eq!(like_pattern("AÇÃO"), "%ação%");
    }
}
