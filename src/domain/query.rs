//! Book search criteria

use std::fmt;

use crate::domain::entities::BookId;

/// Optional-field book search.
///
/// Fields are tried in priority order: id, ISBN, author, title. Any subset
/// may be set; unset or blank fields are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub id: Option<BookId>,
    pub isbn: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
}

impl BookQuery {
    pub fn by_id(id: BookId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_isbn(isbn: impl Into<String>) -> Self {
        Self {
            isbn: Some(isbn.into()),
            ..Self::default()
        }
    }

    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// ISBN with surrounding whitespace removed, if non-blank.
    pub(crate) fn isbn_key(&self) -> Option<&str> {
        non_blank(self.isbn.as_deref())
    }

    pub(crate) fn author_key(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    pub(crate) fn title_key(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// True when no criterion could match anything.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.isbn_key().is_none()
            && self.author_key().is_none()
            && self.title_key().is_none()
    }
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

impl fmt::Display for BookQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id={id}"));
        }
        if let Some(isbn) = self.isbn_key() {
            parts.push(format!("isbn={isbn:?}"));
        }
        if let Some(author) = self.author_key() {
            parts.push(format!("author={author:?}"));
        }
        if let Some(title) = self.title_key() {
            parts.push(format!("title={title:?}"));
        }
        if parts.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{{{}}}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_blank_fields_when_checking_then_query_is_empty() {
        let query = BookQuery {
            isbn: Some("  ".into()),
            title: Some(String::new()),
            ..BookQuery::default()
        };
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "{}");
    }

    #[test]
    fn given_mixed_fields_when_displayed_then_lists_set_fields_in_priority_order() {
        let query = BookQuery {
            id: Some(BookId::new(42)),
            title: Some("dune".into()),
            ..BookQuery::default()
        };
        assert_eq!(query.to_string(), r#"{id=42, title="dune"}"#);
    }
}
