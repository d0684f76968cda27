//! SQLite persistence gateway for the book catalog.
//!
//! Provides schema creation, a generic entity repository, explicit
//! parameterized queries, and the [`Gateway`] handle that the engine
//! components receive at construction.

pub mod gateway;
pub mod operations;
pub mod queries;
pub mod repository;
pub mod schema;

pub use gateway::Gateway;
pub use operations::OperationError;
pub use queries::{
    CatalogStats, author_in_use, book_id_by_isbn, catalog_stats, find_author_by_name,
    find_book_by_isbn, find_publisher_by_name, publisher_in_use, search_book_ids, search_books,
};
pub use repository::{Entity, delete, delete_by_id, find_all, find_by_id, save};
pub use schema::{SchemaError, open_database, open_memory};
