//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI
//! documentation using utoipa's external schema registration. Response
//! DTOs live in the handler modules and derive their schemas directly.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The supplied admin key is missing or does not match.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested message does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and
/// human-readable message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Something went wrong")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_registers_under_the_domain_name() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(
            schema_json.contains("message"),
            "schema should contain message field"
        );
    }

    #[test]
    fn error_code_schema_variants_match_the_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "unauthorized", "not_found", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }
}
