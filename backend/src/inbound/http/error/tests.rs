//! Tests for the HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::json;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no key"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_codes_match_error_codes(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("db exploded at 10.0.0.2").with_details(json!({ "secret": "x" }));
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    let payload: Error = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none(), "details must not leak");
}

#[actix_web::test]
async fn non_internal_errors_keep_message_and_details() {
    let error = Error::invalid_request("author must not be empty")
        .with_details(json!({ "field": "author" }));
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    let payload: Error = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(payload.message(), "author must not be empty");
    assert!(payload.details().is_some());
}

#[actix_web::test]
async fn trace_id_is_echoed_in_header_and_payload() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    let response = error.error_response();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("header is ascii")
        .to_owned();
    assert_eq!(header, trace_id.to_string());

    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    let payload: Error = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(payload.trace_id(), Some(header.as_str()));
}
