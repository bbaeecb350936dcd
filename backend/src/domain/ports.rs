//! Domain ports for message persistence.
//!
//! Ports describe how the guestbook expects to interact with the backing
//! document store. Each trait exposes strongly typed errors so adapters map
//! their failures into predictable variants instead of returning opaque
//! ones.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::message::{Message, MessageDraft, MessageId};

/// Persistence errors raised by [`MessageRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePersistenceError {
    /// Store connection could not be established.
    #[error("message store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("message store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl MessagePersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Aggregate collection snapshot backing the diagnostic status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestbookStats {
    /// Total number of stored messages.
    pub total: u64,
    /// Creation time of the newest message, when any exist.
    pub last_signed_at: Option<DateTime<Utc>>,
}

/// Persistence port for guestbook messages.
///
/// Implementations route every operation through their connection handling
/// first, so a cold store surfaces as
/// [`MessagePersistenceError::Connection`] rather than a hung request.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Fetch all messages ordered by creation time, newest first.
    ///
    /// An empty collection yields an empty vector, not an error.
    async fn list_all(&self) -> Result<Vec<Message>, MessagePersistenceError>;

    /// Persist a validated draft and return the stored message, including
    /// its assigned identifier. Visitor-created messages never carry the
    /// admin flag.
    async fn insert(&self, draft: MessageDraft) -> Result<Message, MessagePersistenceError>;

    /// Remove the message with the given identifier and return it, or
    /// `None` when no such message exists. Callers decide whether absence
    /// is an error; it is never reported as success here.
    async fn delete_by_id(
        &self,
        id: &MessageId,
    ) -> Result<Option<Message>, MessagePersistenceError>;

    /// Report the aggregate snapshot used by the status probe.
    async fn stats(&self) -> Result<GuestbookStats, MessagePersistenceError>;
}

/// In-memory [`MessageRepository`] used by tests and fixtures.
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    entries: Mutex<Vec<Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn list_all(&self) -> Result<Vec<Message>, MessagePersistenceError> {
        let entries = self.entries.lock().await;
        let mut ordered: Vec<(usize, Message)> = entries.iter().cloned().enumerate().collect();
        // Newest first; later insertions win timestamp ties, matching a
        // store that sorts on insertion-ordered identifiers.
        ordered.sort_by(|(left_seq, left), (right_seq, right)| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then(right_seq.cmp(left_seq))
        });
        Ok(ordered.into_iter().map(|(_, message)| message).collect())
    }

    async fn insert(&self, draft: MessageDraft) -> Result<Message, MessagePersistenceError> {
        let (author, content) = draft.into_parts();
        let id = MessageId::new(Uuid::new_v4().simple().to_string())
            .map_err(|err| MessagePersistenceError::query(err.to_string()))?;
        let message = Message::new(id, author, content, false, Utc::now());
        self.entries.lock().await.push(message.clone());
        Ok(message)
    }

    async fn delete_by_id(
        &self,
        id: &MessageId,
    ) -> Result<Option<Message>, MessagePersistenceError> {
        let mut entries = self.entries.lock().await;
        let position = entries.iter().position(|entry| entry.id() == id);
        Ok(position.map(|index| entries.remove(index)))
    }

    async fn stats(&self) -> Result<GuestbookStats, MessagePersistenceError> {
        let entries = self.entries.lock().await;
        Ok(GuestbookStats {
            total: entries.len() as u64,
            last_signed_at: entries.iter().map(Message::created_at).max(),
        })
    }
}
