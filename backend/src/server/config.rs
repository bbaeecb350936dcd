//! Server configuration loaded from the environment.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use tracing::warn;

use backend::domain::{AdminKey, AdminKeyValidationError};
use backend::outbound::persistence::{DEFAULT_STORE_URI, StoreConfig};

/// Failures raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `ADMIN_KEY` is unset; the service refuses to boot without a secret.
    #[error("ADMIN_KEY must be set: {0}")]
    MissingAdminKey(env::VarError),
    /// `ADMIN_KEY` is present but blank.
    #[error("ADMIN_KEY is invalid: {0}")]
    InvalidAdminKey(AdminKeyValidationError),
    /// `BIND_ADDR` does not parse as a socket address.
    #[error("BIND_ADDR is invalid: {0}")]
    InvalidBindAddr(std::net::AddrParseError),
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreConfig,
    pub(crate) admin_key: AdminKey,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// `MONGODB_URI` falls back to the documented local default with a
    /// logged warning; a deployment pointing at a remote store will see
    /// the warning long before it sees silently missing data. The admin
    /// secret has no sensible default, so its absence is fatal. An
    /// optional `GUESTBOOK_DB` overrides the database named in the URI.
    pub fn from_env() -> Result<Self, ConfigError> {
        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| {
            warn!(default = DEFAULT_STORE_URI, "MONGODB_URI not set, using local default");
            DEFAULT_STORE_URI.to_owned()
        });
        let mut store = StoreConfig::new(uri);
        if let Ok(database) = env::var("GUESTBOOK_DB") {
            store = store.with_database(database);
        }

        let admin_key = env::var("ADMIN_KEY")
            .map_err(ConfigError::MissingAdminKey)
            .and_then(|secret| AdminKey::new(secret).map_err(ConfigError::InvalidAdminKey))?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
            .parse()
            .map_err(ConfigError::InvalidBindAddr)?;

        Ok(Self {
            bind_addr,
            store,
            admin_key,
        })
    }
}
