//! Persistence adapters for the document store.

mod connection;
mod mongo;

pub use connection::{
    Connect, ConnectError, ConnectionCache, DEFAULT_STORE_URI, MongoConnector, StoreConfig,
};
pub use mongo::MongoMessageRepository;
