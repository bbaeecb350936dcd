//! Tests for the error payload.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::middleware::trace::TraceId;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no key"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn display_uses_the_message() {
    let error = Error::not_found("no guestbook message with the given id");
    assert_eq!(error.to_string(), "no guestbook message with the given id");
}

#[rstest]
fn details_attach_and_read_back() {
    let error = Error::invalid_request("bad").with_details(json!({ "field": "author" }));
    let details = error
        .details()
        .and_then(|value| value.as_object())
        .expect("details object");
    assert_eq!(details.get("field").and_then(|v| v.as_str()), Some("author"));
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let expected = trace_id.to_string();
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(expected.as_str()));
}

#[rstest]
fn new_leaves_trace_id_unset_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_absent_fields() {
    let value = serde_json::to_value(Error::unauthorized("admin key is missing or invalid"))
        .expect("error serialises");
    assert_eq!(value.get("code").and_then(|v| v.as_str()), Some("unauthorized"));
    assert_eq!(
        value.get("message").and_then(|v| v.as_str()),
        Some("admin key is missing or invalid")
    );
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());

    let tagged = serde_json::to_value(Error::internal("boom").with_trace_id("abc"))
        .expect("error serialises");
    assert_eq!(tagged.get("traceId").and_then(|v| v.as_str()), Some("abc"));
}
