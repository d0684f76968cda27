use chrono::NaiveDate;
use serde::Deserialize;

/// Edition record from `/isbn/{isbn}.json`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub authors: Vec<KeyRef>,
    #[serde(default)]
    pub publish_date: Option<String>,
}

impl BookResponse {
    /// The publication date, if present and in `Month d, yyyy` form.
    pub fn published_on(&self) -> Option<NaiveDate> {
        self.publish_date.as_deref().and_then(parse_publish_date)
    }
}

/// A reference to another Open Library record, e.g. `/authors/OL23919A`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyRef {
    pub key: String,
}

impl KeyRef {
    /// The record id: the last path segment of the key.
    pub fn id(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// Author record from `/authors/{id}.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub personal_name: Option<String>,
}

impl AuthorResponse {
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.personal_name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Parse an Open Library publish date such as `August 15, 2009`.
///
/// Anything else (`2009`, `Aug 2009`, free text) is dropped with a warning;
/// a blank value is dropped silently.
pub fn parse_publish_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%B %d, %Y") {
        Ok(date) => Some(date),
        Err(_) => {
            log::warn!("Ignoring unrecognised publish date '{}'", value);
            None
        }
    }
}
