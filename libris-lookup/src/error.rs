/// Errors that can occur while looking up book metadata.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No book found for ISBN {isbn}")]
    NotFound { isbn: String },

    #[error("Lookup service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{0}' is not a valid ISBN")]
    InvalidIsbn(String),
}

impl LookupError {
    /// Whether the lookup reached the service and it had no such book.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}
