use std::path::PathBuf;

use crate::CliError;

use super::open_catalog;

pub(crate) fn run_delete(db: Option<PathBuf>, id: i64) -> Result<(), CliError> {
    let catalog = open_catalog(db)?;
    let report = catalog.delete_book(id)?;

    log::info!("Deleted book {}", report.book_id);
    if let Some(publisher) = report.removed_publisher {
        log::info!("  Removed unused publisher {}", publisher);
    }
    for author in &report.removed_authors {
        log::info!("  Removed unused author {}", author);
    }
    Ok(())
}
