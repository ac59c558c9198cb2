//! Tests for the domain error envelope.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_message(#[case] message: &str) {
    let err = Error::try_new(ErrorCode::InvalidRequest, message).expect_err("blank message");
    assert_eq!(err, ErrorValidationError::EmptyMessage);
}

#[rstest]
fn try_with_trace_id_rejects_blank_identifier() {
    let err = Error::not_found("missing")
        .try_with_trace_id("  ")
        .expect_err("blank trace id");
    assert_eq!(err, ErrorValidationError::EmptyTraceId);
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn helpers_set_expected_code(#[case] error: Error, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let payload = json!({"code": "invalid_request", "message": "bad"});

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_absent_fields(expected_trace_id: String) {
    let error = Error::conflict("email already registered")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "email"}));

    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "email already registered",
            "traceId": expected_trace_id,
            "details": {"field": "email"},
        })
    );

    let bare = serde_json::to_value(Error::forbidden("nope")).expect("serialise");
    assert!(bare.get("traceId").is_none());
    assert!(bare.get("details").is_none());
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({"code": "not_found", "message": " "});
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
