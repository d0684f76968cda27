//! Tokenizing and validating a single CSV catalog record.
//!
//! A record line carries exactly five comma-separated fields:
//! ```text
//! ISBN, Title, Publisher, PublicationDate (dd/MM/yyyy), Authors (';'-separated)
//! ```
//! Fields may be wrapped in double quotes to embed commas, and `""` inside a
//! quoted field stands for one literal quote.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::BookDraft;

/// Number of fields every record must carry.
pub const FIELD_COUNT: usize = 5;

const AUTHOR_SEPARATOR: char = ';';
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Why a record was rejected. The `Display` text is the row message reported
/// to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Missing field(s): field(s) not found. Make sure to provide the fields: 'ISBN, Title, Publisher, PublicationDate, Authors'")]
    MissingFields { found: usize },

    #[error("Too many fields: found {found}. Make sure to provide only the fields: 'ISBN, Title, Publisher, PublicationDate, Authors'")]
    TooManyFields { found: usize },

    #[error("ISBN cannot be empty")]
    EmptyIsbn,

    #[error("ISBN '{0}' is not a valid number")]
    InvalidIsbn(String),

    #[error("Title not found")]
    MissingTitle,

    #[error("Publisher not found")]
    MissingPublisher,

    #[error("Publication date not provided")]
    MissingDate,

    #[error("Invalid date format: '{0}'. Use dd/MM/yyyy")]
    InvalidDate(String),

    #[error("At least one author must be provided")]
    NoAuthors,
}

/// Split a raw line into its comma-delimited fields.
///
/// Never fails: malformed quoting simply yields whatever field boundaries the
/// quote state machine produces, and the validator rejects the count.
///
/// # Examples
///
/// ```
/// use libris_catalog::record::tokenize_line;
///
/// let fields = tokenize_line(r#"1,"Book: A, Part 1",X"#);
/// assert_eq!(fields, vec!["1", "Book: A, Part 1", "X"]);
///
/// let fields = tokenize_line(r#""say ""hi""",b"#);
/// assert_eq!(fields, vec![r#"say "hi""#, "b"]);
/// ```
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped_quote = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if escaped_quote {
            current.push(c);
            escaped_quote = false;
            continue;
        }

        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    escaped_quote = true;
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Validate tokenized fields into a [`BookDraft`].
///
/// Rules run in field order and the first failure is returned on its own.
pub fn validate_fields<S: AsRef<str>>(fields: &[S]) -> Result<BookDraft, RecordError> {
    if fields.len() < FIELD_COUNT {
        return Err(RecordError::MissingFields {
            found: fields.len(),
        });
    }
    if fields.len() > FIELD_COUNT {
        return Err(RecordError::TooManyFields {
            found: fields.len(),
        });
    }

    let isbn = parse_isbn(fields[0].as_ref())?;
    let title = required_upper(fields[1].as_ref(), RecordError::MissingTitle)?;
    let publisher = required_upper(fields[2].as_ref(), RecordError::MissingPublisher)?;
    let published_on = parse_date(fields[3].as_ref())?;
    let authors = split_authors(fields[4].as_ref());

    if authors.is_empty() {
        return Err(RecordError::NoAuthors);
    }

    Ok(BookDraft {
        id: None,
        isbn: Some(isbn),
        title,
        publisher: Some(publisher),
        published_on: Some(published_on),
        authors,
    })
}

/// Tokenize and validate one raw line.
pub fn parse_record(line: &str) -> Result<BookDraft, RecordError> {
    validate_fields(&tokenize_line(line))
}

fn parse_isbn(raw: &str) -> Result<i64, RecordError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(RecordError::EmptyIsbn);
    }
    value
        .parse::<i64>()
        .map_err(|_| RecordError::InvalidIsbn(value.to_string()))
}

fn required_upper(raw: &str, missing: RecordError) -> Result<String, RecordError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(missing);
    }
    Ok(value.to_uppercase())
}

fn parse_date(raw: &str) -> Result<NaiveDate, RecordError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(RecordError::MissingDate);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RecordError::InvalidDate(raw.to_string()))
}

fn split_authors(raw: &str) -> Vec<String> {
    raw.split(AUTHOR_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_uppercase)
        .collect()
}
