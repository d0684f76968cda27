//! Facade over the catalog engine.
//!
//! A [`Catalog`] owns the database [`Gateway`] and the loaded [`Settings`],
//! and hands both to the components behind each operation. It is cheap to
//! clone, so a clone can be moved into a background task.

use std::path::Path;

use libris_catalog::types::{Book, BookDraft, ImportOutcome};
use libris_db::{CatalogStats, Gateway};
use libris_import::{CancelToken, ImportProgress, ImportReport, SaveKind};
use libris_lookup::OpenLibraryClient;

use crate::cleanup::{CleanupReport, ReferentialCleanup};
use crate::error::CatalogError;
use crate::search::CatalogSearchEngine;
use crate::settings::Settings;

#[derive(Clone)]
pub struct Catalog {
    gateway: Gateway,
    settings: Settings,
}

impl Catalog {
    /// Open (or create) the catalog database at `path`.
    pub fn open(path: &Path, settings: Settings) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| CatalogError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        log::debug!("Opening catalog at {}", path.display());
        Ok(Self::with_gateway(Gateway::open(path)?, settings))
    }

    /// In-memory catalog with default settings.
    pub fn open_memory() -> Result<Self, CatalogError> {
        Ok(Self::with_gateway(Gateway::open_memory()?, Settings::default()))
    }

    pub fn with_gateway(gateway: Gateway, settings: Settings) -> Self {
        Self { gateway, settings }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Import ──────────────────────────────────────────────────────────────

    /// Parse a CSV file into drafts and per-line errors. Nothing is saved.
    pub fn import_file(
        &self,
        path: &Path,
        cancel: &CancelToken,
        progress: &dyn ImportProgress,
    ) -> Result<ImportOutcome, CatalogError> {
        Ok(libris_import::import_file(path, cancel, progress)?)
    }

    /// Save parsed drafts, each in its own unit of work.
    pub fn save_all(
        &self,
        drafts: &[BookDraft],
        cancel: &CancelToken,
        progress: &dyn ImportProgress,
    ) -> ImportReport {
        libris_import::save_all(&self.gateway, drafts, cancel, progress)
    }

    /// Insert or overwrite one book.
    pub fn save_draft(&self, draft: &BookDraft) -> Result<(Book, SaveKind), CatalogError> {
        Ok(libris_import::save_draft(&self.gateway, draft)?)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn search(&self, term: &str, cancel: &CancelToken) -> Result<Vec<Book>, CatalogError> {
        let engine = CatalogSearchEngine::new(self.gateway.clone());
        Ok(engine.search(term, cancel)?)
    }

    pub fn find_book(&self, id: i64) -> Result<Option<Book>, CatalogError> {
        Ok(self.gateway.find_by_id::<Book>(id)?)
    }

    /// Every book with its relations, ordered by title.
    pub fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.gateway.find_all::<Book>()?)
    }

    pub fn stats(&self) -> Result<CatalogStats, CatalogError> {
        Ok(self.gateway.catalog_stats()?)
    }

    // ── Mutation ────────────────────────────────────────────────────────────

    /// Delete a book by id, removing any author or publisher it orphans.
    pub fn delete_book(&self, id: i64) -> Result<CleanupReport, CatalogError> {
        let book = self
            .find_book(id)?
            .ok_or(CatalogError::BookNotFound(id))?;
        let cleanup = ReferentialCleanup::new(self.gateway.clone());
        Ok(cleanup.delete_book(&book)?)
    }

    // ── Remote Lookup ───────────────────────────────────────────────────────

    /// Fetch book metadata by ISBN from the configured lookup service.
    pub async fn lookup(&self, isbn: &str) -> Result<BookDraft, CatalogError> {
        let client = OpenLibraryClient::with_config(
            &self.settings.lookup_url(),
            self.settings.lookup_timeout(),
        )?;
        Ok(libris_lookup::lookup_book(&client, isbn).await?)
    }
}
