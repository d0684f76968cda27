//! Data model types for the book catalog.
//!
//! These types represent the persistent catalog schema: books, authors,
//! publishers, plus the not-yet-persisted drafts produced by imports and
//! remote lookups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Author ──────────────────────────────────────────────────────────────────

/// A book author. Identity is assigned by the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<i64>,
    pub name: String,
}

impl Author {
    /// An author that has not been persisted yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

// ── Publisher ───────────────────────────────────────────────────────────────

/// A publishing house. Same reconciliation contract as [`Author`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: Option<i64>,
    pub name: String,
}

impl Publisher {
    /// A publisher that has not been persisted yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

// ── Book ────────────────────────────────────────────────────────────────────

/// A catalogued book with its related entities resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<i64>,
    pub title: String,
    /// Unique across the catalog when present.
    pub isbn: Option<i64>,
    pub published_on: Option<NaiveDate>,
    pub publisher: Option<Publisher>,
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Ids of books marked as similar to this one. Stored, never reconciled.
    #[serde(default)]
    pub similar_ids: Vec<i64>,
}

impl Book {
    /// Ids of all persisted authors on this book.
    pub fn author_ids(&self) -> Vec<i64> {
        self.authors.iter().filter_map(|a| a.id).collect()
    }

    /// Id of the persisted publisher, if any.
    pub fn publisher_id(&self) -> Option<i64> {
        self.publisher.as_ref().and_then(|p| p.id)
    }
}

// ── Drafts ──────────────────────────────────────────────────────────────────

/// A validated, not-yet-persisted candidate book.
///
/// Related entities are carried by name; the import layer resolves them to
/// identities before saving.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookDraft {
    /// Forces an overwrite of an existing row when set.
    pub id: Option<i64>,
    pub isbn: Option<i64>,
    pub title: String,
    pub publisher: Option<String>,
    pub published_on: Option<NaiveDate>,
    #[serde(default)]
    pub authors: Vec<String>,
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            isbn: book.isbn,
            title: book.title.clone(),
            publisher: book.publisher.as_ref().map(|p| p.name.clone()),
            published_on: book.published_on,
            authors: book.authors.iter().map(|a| a.name.clone()).collect(),
        }
    }
}

// ── Import Outcome ──────────────────────────────────────────────────────────

/// Combined result of a CSV import: parsed drafts plus per-line errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Successfully parsed drafts, in source order.
    pub drafts: Vec<BookDraft>,
    /// One `"Line <n>: <message>"` entry per rejected line, in source order.
    pub errors: Vec<String>,
    /// Set when reading the source failed part-way through.
    pub read_error: Option<String>,
    /// Set when the import stopped early because it was cancelled.
    pub cancelled: bool,
}

impl ImportOutcome {
    pub fn success_count(&self) -> usize {
        self.drafts.len()
    }

    pub fn failure_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.read_error.is_none() && !self.cancelled
    }
}
