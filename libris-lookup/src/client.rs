use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::LookupError;
use crate::lookup::MetadataSource;
use crate::types::{AuthorResponse, BookResponse};

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Open Library JSON API.
pub struct OpenLibraryClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Client for the public service with the default timeout.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Client for a specific service root (e.g. a mirror) and request timeout.
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("libris/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON document. `Ok(None)` means the service answered 404.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, LookupError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let text = resp.text().await?;
        Ok(Some(serde_json::from_str(&text)?))
    }
}

impl MetadataSource for OpenLibraryClient {
    async fn fetch_book(&self, isbn: &str) -> Result<Option<BookResponse>, LookupError> {
        self.get_json(&format!("/isbn/{}.json", isbn)).await
    }

    async fn fetch_author(&self, id: &str) -> Result<Option<AuthorResponse>, LookupError> {
        self.get_json(&format!("/authors/{}.json", id)).await
    }
}
