use std::path::PathBuf;

use libris_lib::settings_path;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::load_settings;

/// Show the resolved settings and the file they were read from.
pub(crate) fn run_config_show(db_override: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings_path();
    let settings = load_settings()?;

    log::info!(
        "{}",
        "libris Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();
    log::info!("  Database:      {}", settings.database_path(db_override).display());
    log::info!("  Lookup URL:    {}", settings.lookup_url());
    log::info!("  Lookup timeout: {}s", settings.lookup_timeout().as_secs());

    let raw = settings.to_toml_string();
    if !raw.trim().is_empty() {
        crate::log_blank();
        for line in raw.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings_path().display());
    Ok(())
}
