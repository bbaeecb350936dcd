//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on the domain service and remain testable without I/O.

use std::sync::Arc;

use crate::domain::GuestbookService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Guestbook use-cases shared across workers.
    pub guestbook: Arc<GuestbookService>,
}

impl HttpState {
    /// Construct state over the given service.
    #[must_use]
    pub fn new(guestbook: Arc<GuestbookService>) -> Self {
        Self { guestbook }
    }
}
