//! Guestbook backend entry-point: wires the REST endpoints, health probes,
//! and OpenAPI docs over a MongoDB-backed message repository.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::GuestbookService;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{ConnectionCache, MongoConnector, MongoMessageRepository};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    // The cache holds the process-wide store handle; the first request
    // triggers the connection and later ones reuse it.
    let connection = ConnectionCache::new(MongoConnector::new(config.store.clone()));
    let repository = Arc::new(MongoMessageRepository::new(connection));
    let guestbook = Arc::new(GuestbookService::new(repository, config.admin_key.clone()));

    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(HttpState::new(guestbook));

    let server = server::create_server(health_state, http_state, &config)?;
    server.await
}
