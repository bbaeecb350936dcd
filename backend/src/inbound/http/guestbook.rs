//! Guestbook API handlers.
//!
//! ```text
//! GET    /api/guestbook
//! POST   /api/guestbook {"author":"Jane","content":"Hi!"}
//! DELETE /api/guestbook?id=<id>&adminKey=<key>
//! GET    /api/guestbook/status
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Message, MessageDraft, MessageValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_text};

/// Request payload for signing the guestbook.
///
/// Example JSON:
/// `{"author":"Jane","content":"Hi!"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    /// Name the message is signed with.
    pub author: Option<String>,
    /// Message body, rendered verbatim by clients.
    pub content: Option<String>,
}

/// Response payload for a stored message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// Store-assigned identifier.
    pub id: String,
    /// Trimmed author name.
    pub author: String,
    /// Trimmed message body.
    pub content: String,
    /// Whether the site owner wrote the message.
    pub is_admin: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(value: Message) -> Self {
        Self {
            id: value.id().to_string(),
            author: value.author().to_owned(),
            content: value.content().to_owned(),
            is_admin: value.is_admin(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

/// Query parameters for deleting a message.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    /// Identifier of the message to delete.
    pub id: Option<String>,
    /// Shared admin secret authorising the deletion.
    pub admin_key: Option<String>,
}

/// Diagnostic snapshot returned by the status probe.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Whether the document store answered.
    pub connected: bool,
    /// Total stored messages, when the store is reachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// RFC 3339 timestamp of the newest message, when any exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_signed_at: Option<String>,
}

/// List guestbook messages, newest first.
#[utoipa::path(
    get,
    path = "/api/guestbook",
    responses(
        (status = 200, description = "Messages, newest first", body = [MessageResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "listGuestbook",
    security([])
)]
#[get("/guestbook")]
pub async fn list_messages(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MessageResponse>>> {
    let messages = state.guestbook.list().await?;
    Ok(web::Json(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

/// Sign the guestbook.
///
/// Presence is checked at this boundary; trimming and emptiness are
/// re-validated by the draft constructor, so whitespace-only fields also
/// fail with a 400.
#[utoipa::path(
    post,
    path = "/api/guestbook",
    request_body = SignRequest,
    responses(
        (status = 201, description = "Created message", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "signGuestbook",
    security([])
)]
#[post("/guestbook")]
pub async fn sign_guestbook(
    state: web::Data<HttpState>,
    payload: web::Json<SignRequest>,
) -> ApiResult<HttpResponse> {
    let SignRequest { author, content } = payload.into_inner();
    let author = require_text(author, FieldName::new("author"))?;
    let content = require_text(content, FieldName::new("content"))?;
    let draft = MessageDraft::new(author, content).map_err(map_draft_error)?;

    let created = state.guestbook.sign(draft).await?;
    Ok(HttpResponse::Created().json(MessageResponse::from(created)))
}

fn map_draft_error(err: MessageValidationError) -> Error {
    match err {
        MessageValidationError::EmptyAuthor => Error::invalid_request("author must not be empty")
            .with_details(json!({ "field": "author", "code": "empty_field" })),
        MessageValidationError::EmptyContent => Error::invalid_request("content must not be empty")
            .with_details(json!({ "field": "content", "code": "empty_field" })),
    }
}

/// Delete a message. Requires the shared admin key.
///
/// Check order: a missing id is a 400, a bad key is a 401 regardless of id
/// validity, and only then is the record looked up.
#[utoipa::path(
    delete,
    path = "/api/guestbook",
    params(DeleteParams),
    responses(
        (status = 200, description = "Deleted message", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["guestbook"],
    operation_id = "deleteGuestbookMessage",
    security(("AdminKey" = []))
)]
#[delete("/guestbook")]
pub async fn delete_message(
    state: web::Data<HttpState>,
    params: web::Query<DeleteParams>,
) -> ApiResult<web::Json<MessageResponse>> {
    let DeleteParams { id, admin_key } = params.into_inner();
    let id = require_text(id, FieldName::new("id"))?;
    let deleted = state.guestbook.delete(&id, admin_key.as_deref()).await?;
    Ok(web::Json(MessageResponse::from(deleted)))
}

/// Read-only diagnostic: store reachability and aggregate count.
#[utoipa::path(
    get,
    path = "/api/guestbook/status",
    responses(
        (status = 200, description = "Store reachable", body = StatusResponse),
        (status = 503, description = "Store unreachable", body = StatusResponse)
    ),
    tags = ["guestbook"],
    operation_id = "guestbookStatus",
    security([])
)]
#[get("/guestbook/status")]
pub async fn guestbook_status(state: web::Data<HttpState>) -> HttpResponse {
    match state.guestbook.status().await {
        Ok(stats) => HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(StatusResponse {
                connected: true,
                total: Some(stats.total),
                last_signed_at: stats.last_signed_at.map(|at| at.to_rfc3339()),
            }),
        // The cause is already logged by the service; the probe reports
        // reachability rather than failing the request.
        Err(_) => HttpResponse::ServiceUnavailable()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(StatusResponse {
                connected: false,
                total: None,
                last_signed_at: None,
            }),
    }
}
