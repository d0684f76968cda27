//! Book catalog data model types and CSV record parsing.
//!
//! This crate defines the catalog data model without any database
//! dependencies. Consumers can use these types directly for serialization,
//! display, or passing to `libris-db` for persistence.

pub mod record;
pub mod types;

pub use record::{RecordError, parse_record, tokenize_line, validate_fields};
pub use types::*;
