//! Shared handle to the catalog database.
//!
//! A [`Gateway`] is constructed once by the process entry point and cloned
//! into every component that needs storage. Each call locks the connection
//! for its own duration only, and write calls run in their own transaction.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use libris_catalog::types::{Author, Book, Publisher};
use rusqlite::Connection;

use crate::operations::OperationError;
use crate::queries::{self, CatalogStats};
use crate::repository::{self, Entity};
use crate::schema::{self, SchemaError};

#[derive(Clone)]
pub struct Gateway {
    conn: Arc<Mutex<Connection>>,
}

impl Gateway {
    /// Wrap an already configured connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open or create a catalog database file.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        schema::open_database(path).map(Self::new)
    }

    /// In-memory catalog with the full schema.
    pub fn open_memory() -> Result<Self, SchemaError> {
        schema::open_memory().map(Self::new)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, OperationError> {
        self.conn.lock().map_err(|_| OperationError::Poisoned)
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<R>(
        &self,
        f: impl FnOnce(&Connection) -> Result<R, OperationError>,
    ) -> Result<R, OperationError> {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Run `f` as one unit of work: committed if it returns `Ok`, rolled back
    /// otherwise.
    pub fn transaction<R>(
        &self,
        f: impl FnOnce(&Connection) -> Result<R, OperationError>,
    ) -> Result<R, OperationError> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    // ── Generic repository ──────────────────────────────────────────────────

    pub fn save<T: Entity>(&self, entity: &T) -> Result<T, OperationError> {
        self.with_conn(|conn| repository::save(conn, entity))
    }

    pub fn find_by_id<T: Entity>(&self, id: i64) -> Result<Option<T>, OperationError> {
        self.with_conn(|conn| repository::find_by_id(conn, id))
    }

    pub fn find_all<T: Entity>(&self) -> Result<Vec<T>, OperationError> {
        self.with_conn(|conn| repository::find_all(conn))
    }

    pub fn delete<T: Entity>(&self, entity: &T) -> Result<(), OperationError> {
        self.with_conn(|conn| repository::delete(conn, entity))
    }

    pub fn delete_by_id<T: Entity>(&self, id: i64) -> Result<bool, OperationError> {
        self.with_conn(|conn| repository::delete_by_id::<T>(conn, id))
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn book_id_by_isbn(&self, isbn: i64) -> Result<Option<i64>, OperationError> {
        self.with_conn(|conn| queries::book_id_by_isbn(conn, isbn))
    }

    pub fn find_book_by_isbn(&self, isbn: i64) -> Result<Option<Book>, OperationError> {
        self.with_conn(|conn| queries::find_book_by_isbn(conn, isbn))
    }

    pub fn search_books(&self, term: &str) -> Result<Vec<Book>, OperationError> {
        self.with_conn(|conn| queries::search_books(conn, term))
    }

    pub fn publisher_in_use(&self, publisher_id: i64) -> Result<bool, OperationError> {
        self.with_conn(|conn| queries::publisher_in_use(conn, publisher_id))
    }

    pub fn author_in_use(&self, author_id: i64) -> Result<bool, OperationError> {
        self.with_conn(|conn| queries::author_in_use(conn, author_id))
    }

    pub fn find_author_by_name(&self, name: &str) -> Result<Option<Author>, OperationError> {
        self.with_conn(|conn| queries::find_author_by_name(conn, name))
    }

    pub fn find_publisher_by_name(&self, name: &str) -> Result<Option<Publisher>, OperationError> {
        self.with_conn(|conn| queries::find_publisher_by_name(conn, name))
    }

    pub fn catalog_stats(&self) -> Result<CatalogStats, OperationError> {
        self.with_conn(queries::catalog_stats)
    }
}
