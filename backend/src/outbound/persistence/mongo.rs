//! MongoDB-backed message repository.
//!
//! Every operation acquires the cached connection first, so a cold or
//! unreachable store surfaces as a connection failure instead of a hung
//! request. Stored field names stay camelCase to match the collection this
//! service inherited from its predecessor.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    GuestbookStats, Message, MessageDraft, MessageId, MessagePersistenceError, MessageRepository,
};

use super::connection::{ConnectError, ConnectionCache, MongoConnector};

/// Collection holding guestbook messages.
const COLLECTION: &str = "guestbook";

/// BSON document shape for a stored message.
#[derive(Debug, Serialize, Deserialize)]
struct MessageRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    author: String,
    content: String,
    #[serde(rename = "isAdmin")]
    is_admin: bool,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
}

impl TryFrom<MessageRecord> for Message {
    type Error = MessagePersistenceError;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or_else(|| {
            MessagePersistenceError::query("stored message is missing its identifier")
        })?;
        let id = MessageId::new(id.to_hex())
            .map_err(|err| MessagePersistenceError::query(err.to_string()))?;
        let created_at = from_bson_datetime(record.created_at)?;
        Ok(Message::new(
            id,
            record.author,
            record.content,
            record.is_admin,
            created_at,
        ))
    }
}

fn from_bson_datetime(value: bson::DateTime) -> Result<DateTime<Utc>, MessagePersistenceError> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| MessagePersistenceError::query("stored timestamp is out of range"))
}

fn query_error(err: mongodb::error::Error) -> MessagePersistenceError {
    MessagePersistenceError::query(err.to_string())
}

impl From<ConnectError> for MessagePersistenceError {
    fn from(err: ConnectError) -> Self {
        MessagePersistenceError::connection(err.to_string())
    }
}

/// [`MessageRepository`] adapter over a cached MongoDB connection.
pub struct MongoMessageRepository {
    connection: ConnectionCache<MongoConnector>,
}

impl MongoMessageRepository {
    /// Build a repository over the given connection cache.
    pub fn new(connection: ConnectionCache<MongoConnector>) -> Self {
        Self { connection }
    }

    async fn collection(&self) -> Result<Collection<MessageRecord>, MessagePersistenceError> {
        let database = self.connection.acquire().await?;
        Ok(database.collection(COLLECTION))
    }
}

#[async_trait]
impl MessageRepository for MongoMessageRepository {
    async fn list_all(&self) -> Result<Vec<Message>, MessagePersistenceError> {
        let collection = self.collection().await?;
        let mut cursor = collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(query_error)?;

        let mut messages = Vec::new();
        while let Some(record) = cursor.try_next().await.map_err(query_error)? {
            messages.push(Message::try_from(record)?);
        }
        Ok(messages)
    }

    async fn insert(&self, draft: MessageDraft) -> Result<Message, MessagePersistenceError> {
        let collection = self.collection().await?;
        let (author, content) = draft.into_parts();
        let record = MessageRecord {
            id: None,
            author,
            content,
            is_admin: false,
            created_at: bson::DateTime::now(),
        };

        let inserted = collection.insert_one(&record).await.map_err(query_error)?;
        let id = inserted.inserted_id.as_object_id().ok_or_else(|| {
            MessagePersistenceError::query("store assigned a non-ObjectId identifier")
        })?;

        Message::try_from(MessageRecord {
            id: Some(id),
            ..record
        })
    }

    async fn delete_by_id(
        &self,
        id: &MessageId,
    ) -> Result<Option<Message>, MessagePersistenceError> {
        // An id the store could never have issued names no record.
        let Ok(object_id) = ObjectId::parse_str(id.as_str()) else {
            return Ok(None);
        };

        let collection = self.collection().await?;
        collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await
            .map_err(query_error)?
            .map(Message::try_from)
            .transpose()
    }

    async fn stats(&self) -> Result<GuestbookStats, MessagePersistenceError> {
        let collection = self.collection().await?;
        let total = collection
            .count_documents(doc! {})
            .await
            .map_err(query_error)?;
        let newest = collection
            .find_one(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(query_error)?;
        let last_signed_at = newest
            .map(|record| from_bson_datetime(record.created_at))
            .transpose()?;
        Ok(GuestbookStats {
            total,
            last_signed_at,
        })
    }
}
