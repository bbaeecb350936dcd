//! Guestbook use-cases: list, sign, delete, and the status snapshot.

use std::sync::Arc;

use tracing::{error, warn};

use super::admin::AdminKey;
use super::error::Error;
use super::message::{Message, MessageDraft, MessageId};
use super::ports::{GuestbookStats, MessagePersistenceError, MessageRepository};

/// Orchestrates guestbook operations over the repository port.
///
/// The service owns the policy decisions: the admin gate guards deletion,
/// persistence failures are logged with their cause and surfaced to clients
/// as redacted internal errors, and a missing delete target is `NotFound`,
/// never a silent success.
pub struct GuestbookService {
    messages: Arc<dyn MessageRepository>,
    admin_key: AdminKey,
}

impl GuestbookService {
    /// Build a service over the given repository and configured admin
    /// secret.
    pub fn new(messages: Arc<dyn MessageRepository>, admin_key: AdminKey) -> Self {
        Self {
            messages,
            admin_key,
        }
    }

    /// All messages, newest first.
    pub async fn list(&self) -> Result<Vec<Message>, Error> {
        self.messages
            .list_all()
            .await
            .map_err(|err| storage_error("listing guestbook messages failed", &err))
    }

    /// Persist a validated draft and return the stored message.
    pub async fn sign(&self, draft: MessageDraft) -> Result<Message, Error> {
        self.messages
            .insert(draft)
            .await
            .map_err(|err| storage_error("persisting a guestbook message failed", &err))
    }

    /// Delete the message with the given id and return it.
    ///
    /// The admin gate is checked first: a missing or mismatched key leaves
    /// the record untouched regardless of id validity.
    pub async fn delete(&self, id: &str, candidate_key: Option<&str>) -> Result<Message, Error> {
        let authorised = candidate_key.is_some_and(|candidate| self.admin_key.matches(candidate));
        if !authorised {
            warn!("guestbook delete rejected: admin key missing or mismatched");
            return Err(Error::unauthorized("admin key is missing or invalid"));
        }

        // Identifiers the store could never have issued name no record;
        // they fall out as not-found rather than a malformed request.
        let Ok(id) = MessageId::new(id) else {
            return Err(not_found_error());
        };

        match self.messages.delete_by_id(&id).await {
            Ok(Some(message)) => Ok(message),
            Ok(None) => Err(not_found_error()),
            Err(err) => Err(storage_error("deleting a guestbook message failed", &err)),
        }
    }

    /// Read-only diagnostic snapshot of the collection.
    pub async fn status(&self) -> Result<GuestbookStats, Error> {
        self.messages
            .stats()
            .await
            .map_err(|err| storage_error("reading guestbook stats failed", &err))
    }
}

fn not_found_error() -> Error {
    Error::not_found("no guestbook message with the given id")
}

fn storage_error(context: &'static str, err: &MessagePersistenceError) -> Error {
    // The cause stays in the server log; clients only ever see the
    // redacted payload.
    error!(error = %err, "{context}");
    Error::internal("Internal server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::InMemoryMessageRepository;
    use async_trait::async_trait;

    const SECRET: &str = "open-sesame";

    fn service_over(repository: Arc<dyn MessageRepository>) -> GuestbookService {
        let admin_key = AdminKey::new(SECRET).expect("valid admin key");
        GuestbookService::new(repository, admin_key)
    }

    fn draft(content: &str) -> MessageDraft {
        MessageDraft::new("Jane", content).expect("valid draft")
    }

    struct UnreachableStore;

    #[async_trait]
    impl MessageRepository for UnreachableStore {
        async fn list_all(&self) -> Result<Vec<Message>, MessagePersistenceError> {
            Err(MessagePersistenceError::connection("connection refused"))
        }

        async fn insert(&self, _draft: MessageDraft) -> Result<Message, MessagePersistenceError> {
            Err(MessagePersistenceError::connection("connection refused"))
        }

        async fn delete_by_id(
            &self,
            _id: &MessageId,
        ) -> Result<Option<Message>, MessagePersistenceError> {
            Err(MessagePersistenceError::connection("connection refused"))
        }

        async fn stats(&self) -> Result<GuestbookStats, MessagePersistenceError> {
            Err(MessagePersistenceError::connection("connection refused"))
        }
    }

    #[tokio::test]
    async fn delete_with_wrong_key_leaves_the_record_intact() {
        let repository = Arc::new(InMemoryMessageRepository::default());
        let service = service_over(repository.clone());
        let stored = service.sign(draft("Hi!")).await.expect("sign");

        let err = service
            .delete(stored.id().as_str(), Some("wrong"))
            .await
            .expect_err("wrong key rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(service.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_without_key_is_unauthorised_even_for_bogus_ids() {
        let service = service_over(Arc::new(InMemoryMessageRepository::default()));
        let err = service
            .delete("does-not-exist", None)
            .await
            .expect_err("missing key rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn delete_with_correct_key_removes_the_record_once() {
        let service = service_over(Arc::new(InMemoryMessageRepository::default()));
        let stored = service.sign(draft("Hi!")).await.expect("sign");

        let deleted = service
            .delete(stored.id().as_str(), Some(SECRET))
            .await
            .expect("delete succeeds");
        assert_eq!(deleted.id(), stored.id());
        assert!(service.list().await.expect("list").is_empty());

        let err = service
            .delete(stored.id().as_str(), Some(SECRET))
            .await
            .expect_err("second delete fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_of_an_unissuable_id_is_not_found() {
        let service = service_over(Arc::new(InMemoryMessageRepository::default()));
        let err = service
            .delete("   ", Some(SECRET))
            .await
            .expect_err("blank id cannot name a record");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn storage_failures_surface_as_redacted_internal_errors() {
        let service = service_over(Arc::new(UnreachableStore));

        let err = service.list().await.expect_err("list fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Internal server error");

        let err = service.sign(draft("Hi!")).await.expect_err("sign fails");
        assert_eq!(err.code(), ErrorCode::InternalError);

        let err = service.status().await.expect_err("status fails");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
