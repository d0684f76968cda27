//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called after each non-blank line is processed during CSV import.
    fn on_line(&self, line_number: usize, accepted: bool);

    /// Called after each draft is saved (or fails to save).
    fn on_saved(&self, current: usize, total: usize, title: &str);

    /// Called when the import or save pass is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_line(&self, _line_number: usize, _accepted: bool) {}
    fn on_saved(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_line(&self, line_number: usize, _accepted: bool) {
        if line_number.is_multiple_of(500) {
            log::info!("  Read {} lines", line_number);
        }
    }

    fn on_saved(&self, current: usize, total: usize, title: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, title);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
