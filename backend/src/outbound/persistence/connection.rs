//! Single-flight cached connection to the document store.
//!
//! Handlers may be invoked before any connection exists, and several may
//! arrive at once. The cache holds at most one handle per process and
//! coalesces concurrent first-time connection attempts into one shared
//! attempt, so every waiter observes the same outcome. A failed attempt
//! clears the slot and a later call retries once the store becomes
//! reachable; a successful handle is reused until process exit.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

/// Documented local fallback when no store URI is configured.
pub const DEFAULT_STORE_URI: &str = "mongodb://localhost:27017/portfolio";

/// Database used when neither the URI nor the configuration names one.
const DEFAULT_DATABASE: &str = "portfolio";

/// Bound on server selection so operations against an unreachable store
/// fail fast instead of queueing until the driver gives up.
const SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while establishing a store connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The URI or driver options are invalid.
    #[error("failed to build document store client: {message}")]
    Build {
        /// Driver-supplied failure description.
        message: String,
    },
    /// The store did not answer the connect-time ping.
    #[error("document store is unreachable: {message}")]
    Unreachable {
        /// Driver-supplied failure description.
        message: String,
    },
}

impl ConnectError {
    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create an unreachable error with the given message.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Connection strategy the cache delegates to.
///
/// The seam exists so the single-flight behaviour is testable with a stub
/// connector; [`MongoConnector`] is the production implementation.
#[async_trait]
pub trait Connect: Send + Sync + 'static {
    /// Handle produced by a successful attempt. Cloning must be cheap;
    /// every caller of [`ConnectionCache::acquire`] receives a clone.
    type Handle: Clone + Send + Sync + 'static;

    /// Establish a connection, verifying the store is actually reachable.
    async fn connect(&self) -> Result<Self::Handle, ConnectError>;
}

type Attempt<H> = Shared<BoxFuture<'static, Result<H, ConnectError>>>;

enum Slot<H> {
    Idle,
    Connecting { generation: u64, attempt: Attempt<H> },
    Ready(H),
}

struct CacheState<H> {
    slot: Slot<H>,
    generation: u64,
}

/// Lazily-initialised, process-wide store handle with single-flight
/// connection attempts.
pub struct ConnectionCache<C: Connect> {
    connector: Arc<C>,
    state: Mutex<CacheState<C::Handle>>,
}

impl<C: Connect> ConnectionCache<C> {
    /// Build an empty cache over the given connector. No connection is
    /// attempted until the first [`acquire`](Self::acquire).
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            state: Mutex::new(CacheState {
                slot: Slot::Idle,
                generation: 0,
            }),
        }
    }

    /// Return the shared handle, connecting on first use.
    ///
    /// Concurrent callers arriving before the first connection completes
    /// await the same attempt; at most one handshake is ever in flight. On
    /// failure the slot is cleared so a subsequent call may retry, and the
    /// error propagates to every waiter of that attempt.
    pub async fn acquire(&self) -> Result<C::Handle, ConnectError> {
        let (attempt, generation) = {
            let mut state = self.state.lock().await;
            if let Slot::Ready(handle) = &state.slot {
                return Ok(handle.clone());
            }

            let (attempt, generation) = match &state.slot {
                Slot::Connecting {
                    generation,
                    attempt,
                } => (attempt.clone(), *generation),
                _ => {
                    let generation = state.generation.wrapping_add(1);
                    let connector = Arc::clone(&self.connector);
                    let attempt: Attempt<C::Handle> =
                        async move { connector.connect().await }.boxed().shared();
                    (attempt, generation)
                }
            };

            // Register a fresh attempt; an existing one is re-awaited as is.
            if !matches!(state.slot, Slot::Connecting { .. }) {
                state.generation = generation;
                state.slot = Slot::Connecting {
                    generation,
                    attempt: attempt.clone(),
                };
            }

            (attempt, generation)
        };

        let outcome = attempt.await;

        let mut state = self.state.lock().await;
        // Only the attempt we awaited may settle the slot; a newer attempt
        // started after a failure must not be clobbered.
        let settles = matches!(
            &state.slot,
            Slot::Connecting { generation: current, .. } if *current == generation
        );
        if settles {
            state.slot = match &outcome {
                Ok(handle) => Slot::Ready(handle.clone()),
                Err(_) => Slot::Idle,
            };
        }

        outcome
    }
}

/// Configuration for the document store connection.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: Option<String>,
}

impl StoreConfig {
    /// Create a new configuration with the given connection URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: None,
        }
    }

    /// Name the database explicitly instead of deriving it from the URI.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Get the connection URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the explicit database name, if any.
    #[must_use]
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }
}

/// Production [`Connect`] implementation over the MongoDB driver.
pub struct MongoConnector {
    config: StoreConfig,
}

impl MongoConnector {
    /// Build a connector for the given store configuration.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    fn database_for(&self, client: &Client) -> Database {
        match self.config.database() {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        }
    }
}

#[async_trait]
impl Connect for MongoConnector {
    type Handle = Database;

    async fn connect(&self) -> Result<Database, ConnectError> {
        let mut options = ClientOptions::parse(self.config.uri())
            .await
            .map_err(|err| ConnectError::build(err.to_string()))?;
        options.server_selection_timeout = Some(SELECTION_TIMEOUT);

        let client =
            Client::with_options(options).map_err(|err| ConnectError::build(err.to_string()))?;
        let database = self.database_for(&client);

        // The driver connects lazily; ping so a dead store fails the
        // attempt here instead of failing the first real query.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| ConnectError::unreachable(err.to_string()))?;

        info!(database = %database.name(), "document store connected");
        Ok(database)
    }
}
