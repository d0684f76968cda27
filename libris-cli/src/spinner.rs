//! Spinner shown while a background import runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use libris_import::ImportProgress;

/// Create a ticking spinner. Hidden when `quiet` is set.
pub(crate) fn new_spinner(quiet: bool, msg: impl Into<String>) -> ProgressBar {
    let pb = if quiet {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Forwards import progress to a spinner's message line.
pub(crate) struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    pub(crate) fn new(pb: ProgressBar) -> Self {
        Self { pb }
    }
}

impl ImportProgress for SpinnerProgress {
    fn on_line(&self, line_number: usize, _accepted: bool) {
        self.pb.set_message(format!("Reading line {}", line_number));
    }

    fn on_saved(&self, current: usize, total: usize, title: &str) {
        self.pb
            .set_message(format!("Saving [{}/{}] {}", current, total, title));
    }

    fn on_complete(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }
}
