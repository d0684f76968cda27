use std::path::PathBuf;

use libris_db::{OperationError, SchemaError};
use libris_import::{ImportError, SaveError};
use libris_lookup::LookupError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Errors surfaced by the [`Catalog`](crate::Catalog) facade.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog database: {0}")]
    Schema(#[from] SchemaError),

    #[error("Database error: {0}")]
    Db(#[from] OperationError),

    #[error("Failed to save book: {0}")]
    Save(#[from] SaveError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Cannot create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No book with id {0}")]
    BookNotFound(i64),
}
