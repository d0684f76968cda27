//! libris CLI
//!
//! Command-line interface for cataloging books: bulk CSV import, search,
//! editing, deletion, and Open Library lookup.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Import { file, dry_run } => {
            commands::import::run_import(cli.db, &file, dry_run, cli.quiet, cli.verbose)
        }
        Commands::Search { term, json } => commands::search::run_search(cli.db, &term, json),
        Commands::Add { book } => commands::add::run_add(cli.db, book),
        Commands::Delete { id } => commands::delete::run_delete(cli.db, id),
        Commands::List { json } => commands::search::run_list(cli.db, json),
        Commands::Lookup { isbn, save } => commands::lookup::run_lookup(cli.db, &isbn, save),
        Commands::Stats => commands::stats::run_stats(cli.db),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(cli.db),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

/// Install the logger. Normal output goes through `log::info!` as plain
/// lines; `--verbose` adds timestamps and debug messages, `--quiet` keeps
/// only warnings and errors. `RUST_LOG` still applies on top.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }
    builder.target(env_logger::Target::Stdout).init();
}

/// Print an empty line through the logger so it respects `--quiet`.
pub(crate) fn log_blank() {
    log::info!("");
}
