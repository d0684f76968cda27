//! Bulk import of book records into the catalog database.
//!
//! This crate owns the CSV ingestion loop, find-or-create reconciliation of
//! authors and publishers, and the insert-or-overwrite save path that turns
//! validated drafts into persisted books.

pub mod cancel;
pub mod csv_import;
pub mod progress;
pub mod reconcile;
pub mod upsert;

pub use cancel::CancelToken;
pub use csv_import::{ImportError, import_file, import_reader, is_header_line};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use reconcile::EntityReconciler;
pub use upsert::{ImportReport, SaveError, SaveKind, save_all, save_draft};
