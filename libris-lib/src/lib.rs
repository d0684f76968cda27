//! Catalog engine shared by every frontend.
//!
//! Ties the storage, import, and lookup crates together: multi-criteria
//! search, orphan-aware deletion, cancellable background tasks, persisted
//! settings, and the [`Catalog`] facade the CLI drives.

pub mod catalog;
pub mod cleanup;
pub mod error;
pub mod search;
pub mod settings;
pub mod task;

pub use catalog::Catalog;
pub use cleanup::{CleanupReport, ReferentialCleanup};
pub use error::CatalogError;
pub use libris_import::CancelToken;
pub use search::CatalogSearchEngine;
pub use settings::{Settings, SettingsError, default_database_path, settings_path};
pub use task::{BackgroundTask, TaskError, TaskHandle, TaskSlot};
