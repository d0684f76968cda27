//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "libris")]
#[command(about = "Catalog books, authors and publishers", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database file (overrides LIBRIS_DB and settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fields of a book entered on the command line.
#[derive(Args, Clone)]
pub(crate) struct BookArgs {
    /// Book title
    #[arg(short, long)]
    pub title: String,

    /// ISBN (digits only); an existing book with this ISBN is overwritten
    #[arg(short, long)]
    pub isbn: Option<i64>,

    /// Publisher name
    #[arg(short, long)]
    pub publisher: Option<String>,

    /// Publication date (dd/MM/yyyy)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Author name (repeat for several authors)
    #[arg(short, long = "author", required = true)]
    pub authors: Vec<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import books from a CSV file
    Import {
        /// CSV file: ISBN, Title, Publisher, PublicationDate, Authors
        file: PathBuf,

        /// Parse and report without saving anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Search by id, ISBN, title, author or publisher
    Search {
        /// Search term
        term: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a book, or overwrite the book with the same ISBN
    Add {
        #[command(flatten)]
        book: BookArgs,
    },

    /// Delete a book and any author or publisher left unused
    Delete {
        /// Book id
        id: i64,
    },

    /// List every book in the catalog
    List {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up a book by ISBN on Open Library
    Lookup {
        /// ISBN to look up
        isbn: String,

        /// Save the result to the catalog
        #[arg(long)]
        save: bool,
    },

    /// Show catalog statistics
    Stats,

    /// Show or locate the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where each comes from
    Show,

    /// Print the settings file path
    Path,
}
