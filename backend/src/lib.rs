//! Guestbook backend library modules.
//!
//! The crate is split along the hexagon: `domain` holds the entities,
//! ports, and use-cases; `inbound` and `outbound` hold the HTTP and
//! document-store adapters; `middleware` carries the request-correlation
//! layer shared by both.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-correlation middleware and its task-local identifier.
pub use middleware::trace::{Trace, TraceId};
