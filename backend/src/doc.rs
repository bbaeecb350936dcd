//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API. It registers:
//!
//! - **Paths**: the guestbook endpoints and health probes
//! - **Schemas**: handler DTOs plus the domain error wrappers from
//!   `inbound::http::schemas` (domain types stay free of utoipa concerns)
//! - **Security**: the `adminKey` query-parameter scheme guarding deletion
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::guestbook::{MessageResponse, SignRequest, StatusResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the admin key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AdminKey",
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::with_description(
                "adminKey",
                "Shared admin secret authorising guestbook deletion.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Guestbook backend API",
        description = "HTTP interface for the guestbook message board and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::guestbook::list_messages,
        crate::inbound::http::guestbook::sign_guestbook,
        crate::inbound::http::guestbook::delete_message,
        crate::inbound::http::guestbook::guestbook_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MessageResponse,
        SignRequest,
        StatusResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "guestbook", description = "Operations on guestbook messages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
