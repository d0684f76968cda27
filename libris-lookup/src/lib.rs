//! Remote book metadata lookup.
//!
//! Fetches edition and author records from the Open Library API and
//! assembles them into a [`BookDraft`](libris_catalog::BookDraft) ready to be
//! saved. The HTTP layer sits behind [`MetadataSource`] so assembly can run
//! against any source.

pub mod client;
pub mod error;
pub mod lookup;
pub mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, OpenLibraryClient};
pub use error::LookupError;
pub use lookup::{MetadataSource, lookup_book, normalize_isbn};
pub use types::{AuthorResponse, BookResponse, KeyRef, parse_publish_date};
