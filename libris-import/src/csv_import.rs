//! Line-by-line CSV ingestion.
//!
//! Each non-blank line is tokenized and validated independently. A bad row
//! becomes a `"Line <n>: <message>"` entry in the outcome and never stops the
//! batch; only an I/O failure or cancellation ends reading early.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use libris_catalog::ImportOutcome;
use libris_catalog::record::{parse_record, tokenize_line};
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Column names that mark the first line as a header row.
const HEADER_KEYWORDS: &[&str] = &[
    "isbn",
    "titulo",
    "title",
    "editora",
    "publisher",
    "data_publicacao",
    "publication_date",
    "autor",
    "autores",
    "author",
    "authors",
];

/// Whether a line looks like a header: at least one of its fields, trimmed
/// and lowercased, is a known column name.
///
/// Fields are compared whole so that data such as `Editora 1` is not
/// mistaken for the `editora` column.
pub fn is_header_line(line: &str) -> bool {
    tokenize_line(line).iter().any(|field| {
        let field = field.trim().to_lowercase();
        HEADER_KEYWORDS.contains(&field.as_str())
    })
}

/// Import every record from a buffered source.
///
/// Blank lines are skipped without being counted. The first non-blank line
/// is dropped if it looks like a header, but still counts toward line
/// numbering.
pub fn import_reader<R: BufRead>(
    mut reader: R,
    cancel: &CancelToken,
    progress: &dyn ImportProgress,
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();
    let mut line_number = 0usize;
    let mut buf = Vec::new();

    loop {
        if cancel.is_cancelled() {
            log::info!("Import cancelled after {} lines", line_number);
            outcome.cancelled = true;
            break;
        }

        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("Error reading import source after line {}: {}", line_number, e);
                outcome.read_error = Some(e.to_string());
                break;
            }
        }
        let line = decode_line(&buf);

        if line.trim().is_empty() {
            continue;
        }
        line_number += 1;

        if line_number == 1 && is_header_line(&line) {
            log::debug!("Skipping header: {}", line);
            continue;
        }

        match parse_record(&line) {
            Ok(draft) => {
                outcome.drafts.push(draft);
                progress.on_line(line_number, true);
            }
            Err(e) => {
                let message = format!("Line {}: {}", line_number, e);
                log::warn!("{}", message);
                outcome.errors.push(message);
                progress.on_line(line_number, false);
            }
        }
    }

    // A token cancelled after the last line still counts
    if !outcome.cancelled && cancel.is_cancelled() {
        outcome.cancelled = true;
    }

    progress.on_complete(&format!(
        "Parsed {} records ({} rejected)",
        outcome.success_count(),
        outcome.failure_count()
    ));
    outcome
}

/// Decode one raw line, dropping its terminator. Bytes that are not valid
/// UTF-8 (e.g. Latin-1 exports) become U+FFFD so the row is still processed.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Import every record from a file.
pub fn import_file(
    path: &Path,
    cancel: &CancelToken,
    progress: &dyn ImportProgress,
) -> Result<ImportOutcome, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Importing {}", path.display());
    Ok(import_reader(BufReader::new(file), cancel, progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_detection() {
        assert!(is_header_line("ISBN,Titulo,Editora,Data_Publicacao,Autor"));
        assert!(is_header_line("isbn,title,publisher,publication_date,authors"));
        assert!(is_header_line("\"ISBN\", \"Title\""));
        assert!(!is_header_line("1111111111111,Livro 1,Editora 1,15/08/2009,Autor 1"));
        assert!(!is_header_line("2222222222222,Editora 3,10/01/2017,autor 3;autor 4"));
    }

    #[test]
    fn decode_line_strips_terminators() {
        assert_eq!(decode_line(b"a,b\r\n"), "a,b");
        assert_eq!(decode_line(b"a,b\n"), "a,b");
        assert_eq!(decode_line(b"a,b"), "a,b");
        assert_eq!(decode_line(b"Jo\xe3o\n"), "Jo\u{FFFD}o");
    }
}
