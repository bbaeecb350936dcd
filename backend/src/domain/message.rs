//! Guestbook message entity and its validation.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation errors raised when constructing a [`MessageId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("message id must not be empty")]
    Empty,
    /// Identifier has leading or trailing whitespace.
    #[error("message id must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// Opaque store-assigned message identifier.
///
/// The store assigns identifiers exactly once at insertion and never reuses
/// them; the domain treats them as opaque non-empty strings without
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Validate and construct a [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, MessageIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(MessageIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(MessageIdValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors raised when constructing a [`MessageDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageValidationError {
    /// Author is empty after trimming whitespace.
    #[error("author must not be empty")]
    EmptyAuthor,
    /// Content is empty after trimming whitespace.
    #[error("content must not be empty")]
    EmptyContent,
}

/// A validated, not-yet-persisted guestbook message.
///
/// ## Invariants
/// - `author` and `content` are trimmed of surrounding whitespace and
///   non-empty. Construction is the only way to obtain a draft, so no
///   unvalidated text ever reaches a repository.
///
/// # Examples
/// ```
/// use backend::domain::MessageDraft;
///
/// let draft = MessageDraft::new("  Jane  ", "Hi!").expect("valid draft");
/// assert_eq!(draft.author(), "Jane");
/// assert_eq!(draft.content(), "Hi!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    author: String,
    content: String,
}

impl MessageDraft {
    /// Trim both fields and construct a draft, rejecting empty results.
    pub fn new(
        author: impl AsRef<str>,
        content: impl AsRef<str>,
    ) -> Result<Self, MessageValidationError> {
        let author = author.as_ref().trim();
        if author.is_empty() {
            return Err(MessageValidationError::EmptyAuthor);
        }
        let content = content.as_ref().trim();
        if content.is_empty() {
            return Err(MessageValidationError::EmptyContent);
        }
        Ok(Self {
            author: author.to_owned(),
            content: content.to_owned(),
        })
    }

    /// Trimmed author name.
    #[must_use]
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Trimmed message body.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Consume the draft, yielding `(author, content)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.author, self.content)
    }
}

/// A persisted guestbook message.
///
/// Messages are immutable once created: the only lifecycle transitions are
/// insertion and deletion. `created_at` is the canonical sort key; content
/// may span multiple lines and is rendered verbatim by clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    author: String,
    content: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Assemble a message from already-validated parts.
    ///
    /// Adapters call this when rehydrating stored records; ordinary
    /// creation goes through [`MessageDraft`] and a repository.
    pub fn new(
        id: MessageId,
        author: impl Into<String>,
        content: impl Into<String>,
        is_admin: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            content: content.into(),
            is_admin,
            created_at,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Author name.
    #[must_use]
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Message body.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Whether the site owner wrote the message.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Creation timestamp; the canonical sort key.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn draft_rejects_blank_author(#[case] author: &str) {
        let err = MessageDraft::new(author, "Hi!").expect_err("blank author rejected");
        assert_eq!(err, MessageValidationError::EmptyAuthor);
    }

    #[rstest]
    #[case("")]
    #[case(" \n\t ")]
    fn draft_rejects_blank_content(#[case] content: &str) {
        let err = MessageDraft::new("Jane", content).expect_err("blank content rejected");
        assert_eq!(err, MessageValidationError::EmptyContent);
    }

    #[rstest]
    fn draft_trims_surrounding_whitespace_only() {
        let draft = MessageDraft::new(" Jane ", "  Hi!\nStill here  ").expect("valid draft");
        assert_eq!(draft.author(), "Jane");
        assert_eq!(draft.content(), "Hi!\nStill here");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn id_rejects_blank(#[case] value: &str) {
        let err = MessageId::new(value).expect_err("blank id rejected");
        assert_eq!(err, MessageIdValidationError::Empty);
    }

    #[rstest]
    #[case(" 68b2f7a1c9e4d3001f000001")]
    #[case("68b2f7a1c9e4d3001f000001 ")]
    fn id_rejects_whitespace_padding(#[case] value: &str) {
        let err = MessageId::new(value).expect_err("padded id rejected");
        assert_eq!(err, MessageIdValidationError::ContainsWhitespace);
    }

    #[rstest]
    fn id_accepts_clean_input() {
        let id = MessageId::new("68b2f7a1c9e4d3001f000001").expect("valid id");
        assert_eq!(id.as_str(), "68b2f7a1c9e4d3001f000001");
        assert_eq!(id.to_string(), "68b2f7a1c9e4d3001f000001");
    }
}
