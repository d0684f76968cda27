//! Row mapping and write operations for each catalog entity type.

use libris_catalog::types::*;
use rusqlite::{Connection, Row, params};
use thiserror::Error;

use crate::repository::Entity;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Cannot reference an unsaved {entity_type}")]
    Unsaved { entity_type: &'static str },
    #[error("Database handle is unavailable: a previous operation panicked")]
    Poisoned,
}

// ── Author ──────────────────────────────────────────────────────────────────

impl Entity for Author {
    const KIND: &'static str = "author";
    const TABLE: &'static str = "authors";
    const COLUMNS: &'static str = "id, name";
    const ORDER_BY: &'static str = "name, id";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Author {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn write(&self, conn: &Connection) -> Result<i64, OperationError> {
        conn.execute(
            "INSERT INTO authors (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![self.id, self.name],
        )?;
        Ok(self.id.unwrap_or_else(|| conn.last_insert_rowid()))
    }
}

// ── Publisher ───────────────────────────────────────────────────────────────

impl Entity for Publisher {
    const KIND: &'static str = "publisher";
    const TABLE: &'static str = "publishers";
    const COLUMNS: &'static str = "id, name";
    const ORDER_BY: &'static str = "name, id";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Publisher {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn write(&self, conn: &Connection) -> Result<i64, OperationError> {
        conn.execute(
            "INSERT INTO publishers (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![self.id, self.name],
        )?;
        Ok(self.id.unwrap_or_else(|| conn.last_insert_rowid()))
    }
}

// ── Book ────────────────────────────────────────────────────────────────────

impl Entity for Book {
    const KIND: &'static str = "book";
    const TABLE: &'static str = "books";
    const COLUMNS: &'static str = "id, title, isbn, published_on, publisher_id,
        (SELECT p.name FROM publishers p WHERE p.id = books.publisher_id)";
    const ORDER_BY: &'static str = "title, id";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let publisher_id: Option<i64> = row.get(4)?;
        let publisher_name: Option<String> = row.get(5)?;
        let publisher = match (publisher_id, publisher_name) {
            (Some(id), Some(name)) => Some(Publisher { id: Some(id), name }),
            _ => None,
        };
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            isbn: row.get(2)?,
            published_on: row.get(3)?,
            publisher,
            authors: Vec::new(),
            similar_ids: Vec::new(),
        })
    }

    fn hydrate(&mut self, conn: &Connection) -> Result<(), OperationError> {
        let Some(id) = self.id else {
            return Ok(());
        };
        self.authors = authors_for_book(conn, id)?;
        self.similar_ids = similar_for_book(conn, id)?;
        Ok(())
    }

    /// Writes the book row, then replaces its author and similar-book links.
    ///
    /// The publisher and every author must already be persisted.
    fn write(&self, conn: &Connection) -> Result<i64, OperationError> {
        let publisher_id = match &self.publisher {
            Some(p) => Some(p.id.ok_or(OperationError::Unsaved {
                entity_type: Publisher::KIND,
            })?),
            None => None,
        };

        conn.execute(
            "INSERT INTO books (id, title, isbn, published_on, publisher_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 isbn = excluded.isbn,
                 published_on = excluded.published_on,
                 publisher_id = excluded.publisher_id,
                 updated_at = datetime('now')",
            params![
                self.id,
                self.title,
                self.isbn,
                self.published_on,
                publisher_id,
            ],
        )?;
        let id = self.id.unwrap_or_else(|| conn.last_insert_rowid());

        // Clear and re-insert links
        conn.execute("DELETE FROM book_authors WHERE book_id = ?1", params![id])?;
        for author in &self.authors {
            let author_id = author.id.ok_or(OperationError::Unsaved {
                entity_type: Author::KIND,
            })?;
            conn.execute(
                "INSERT OR IGNORE INTO book_authors (book_id, author_id) VALUES (?1, ?2)",
                params![id, author_id],
            )?;
        }

        conn.execute("DELETE FROM book_similar WHERE book_id = ?1", params![id])?;
        for similar_id in &self.similar_ids {
            conn.execute(
                "INSERT OR IGNORE INTO book_similar (book_id, similar_id) VALUES (?1, ?2)",
                params![id, similar_id],
            )?;
        }

        Ok(id)
    }
}

/// Authors linked to a book, in the order they were attached.
pub fn authors_for_book(conn: &Connection, book_id: i64) -> Result<Vec<Author>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name
         FROM book_authors ba JOIN authors a ON a.id = ba.author_id
         WHERE ba.book_id = ?1
         ORDER BY ba.rowid",
    )?;
    let rows = stmt.query_map(params![book_id], Author::from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn similar_for_book(conn: &Connection, book_id: i64) -> Result<Vec<i64>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT similar_id FROM book_similar WHERE book_id = ?1 ORDER BY similar_id",
    )?;
    let rows = stmt.query_map(params![book_id], |row| row.get::<_, i64>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
