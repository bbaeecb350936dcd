//! Domain primitives and use-cases.
//!
//! Purpose: define the strongly typed guestbook entities, the persistence
//! port they travel through, and the service orchestrating the list, sign,
//! and delete operations. Everything here is transport agnostic; inbound
//! adapters map [`Error`] to HTTP responses and outbound adapters map store
//! failures into [`MessagePersistenceError`].

pub mod admin;
pub mod error;
pub mod guestbook;
pub mod message;
pub mod ports;

pub use self::admin::{AdminKey, AdminKeyValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::guestbook::GuestbookService;
pub use self::message::{
    Message, MessageDraft, MessageId, MessageIdValidationError, MessageValidationError,
};
pub use self::ports::{
    GuestbookStats, InMemoryMessageRepository, MessagePersistenceError, MessageRepository,
};

/// Convenient result alias for operations surfacing [`Error`].
pub type ApiResult<T> = Result<T, Error>;
