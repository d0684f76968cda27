//! Assembly of a book draft from remote metadata.

use libris_catalog::BookDraft;

use crate::error::LookupError;
use crate::types::{AuthorResponse, BookResponse};

/// A remote source of edition and author records.
///
/// `Ok(None)` means the source was reached and has no such record.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    async fn fetch_book(&self, isbn: &str) -> Result<Option<BookResponse>, LookupError>;

    /// Fetch an author by record id (the last segment of its key).
    async fn fetch_author(&self, id: &str) -> Result<Option<AuthorResponse>, LookupError>;
}

/// Reduce a user-entered ISBN to its digits, e.g. `978-85-359-0277-6`.
pub fn normalize_isbn(isbn: &str) -> Result<(String, i64), LookupError> {
    let digits: String = isbn
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(LookupError::InvalidIsbn(isbn.to_string()));
    }
    let value = digits
        .parse::<i64>()
        .map_err(|_| LookupError::InvalidIsbn(isbn.to_string()))?;
    Ok((digits, value))
}

/// Look up a book by ISBN and assemble a draft from it.
///
/// The draft takes the first listed publisher and the display name of every
/// author that could be fetched; an author whose lookup fails is logged and
/// left out. Names are kept as the source spells them.
pub async fn lookup_book<S: MetadataSource>(
    source: &S,
    isbn: &str,
) -> Result<BookDraft, LookupError> {
    let (digits, value) = normalize_isbn(isbn)?;

    let book = source
        .fetch_book(&digits)
        .await?
        .ok_or_else(|| LookupError::NotFound {
            isbn: digits.clone(),
        })?;

    let mut authors = Vec::with_capacity(book.authors.len());
    for author_ref in &book.authors {
        match source.fetch_author(author_ref.id()).await {
            Ok(Some(author)) => match author.display_name() {
                Some(name) => authors.push(name.to_string()),
                None => log::warn!("Author {} has no name, skipping", author_ref.key),
            },
            Ok(None) => log::warn!("Author {} not found, skipping", author_ref.key),
            Err(e) => log::error!("Failed to fetch author {}: {}", author_ref.key, e),
        }
    }

    Ok(BookDraft {
        id: None,
        isbn: Some(value),
        title: book.title.clone().unwrap_or_default(),
        publisher: book.publishers.first().cloned(),
        published_on: book.published_on(),
        authors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_separators() {
        let (digits, value) = normalize_isbn(" 978-85-359-0277-6 ").unwrap();
        assert_eq!(digits, "9788535902776");
        assert_eq!(value, 9788535902776);
    }

    #[test]
    fn normalize_rejects_letters() {
        assert!(matches!(
            normalize_isbn("85-359-027X"),
            Err(LookupError::InvalidIsbn(_))
        ));
        assert!(normalize_isbn("").is_err());
    }
}
