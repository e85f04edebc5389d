//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case::not_found(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case::validation(ErrorCode::ValidationFailure, StatusCode::BAD_REQUEST)]
#[case::rate_limited(ErrorCode::RateLimited, StatusCode::TOO_MANY_REQUESTS)]
#[case::unavailable(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
#[case::upstream(ErrorCode::UpstreamError, StatusCode::BAD_GATEWAY)]
#[case::conflict(ErrorCode::DeletionConflict, StatusCode::INTERNAL_SERVER_ERROR)]
#[case::unexpected(ErrorCode::Unexpected, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    let error = Error::new(code, "message");
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn body_of(response: HttpResponse) -> Error {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn unexpected_errors_are_sanitised(expected_trace_id: String) {
    let error = Error::unexpected("db password is hunter2")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header is set")
        .to_str()
        .expect("trace id is ascii")
        .to_owned();
    assert_eq!(header, expected_trace_id);

    let body = body_of(response).await;
    assert_eq!(body.code(), ErrorCode::Unexpected);
    assert_eq!(body.message(), "An unexpected error occurred");
    assert!(body.details().is_none());
    assert_eq!(body.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_field_details() {
    let error = Error::validation_failure("age: must be between 16 and 75")
        .with_details(json!({"fields": [{"field": "age", "message": "must be between 16 and 75"}]}));

    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert!(response.headers().get(RETRY_AFTER).is_none());

    let body = body_of(response).await;
    assert_eq!(body.message(), "age: must be between 16 and 75");
    assert_eq!(
        body.details(),
        Some(&json!({"fields": [{"field": "age", "message": "must be between 16 and 75"}]}))
    );
}

#[rstest]
#[case::unavailable_with_hint(
    Error::service_unavailable("exhausted").with_retry_after(Duration::from_secs(5)),
    "5"
)]
#[case::unavailable_rounds_up(
    Error::service_unavailable("exhausted").with_retry_after(Duration::from_millis(1_500)),
    "2"
)]
#[case::rate_limited_without_hint(Error::rate_limited("slow down"), "5")]
#[actix_web::test]
async fn retryable_errors_carry_retry_after(#[case] error: Error, #[case] expected: &str) {
    let response = ResponseError::error_response(&error);
    let header = response
        .headers()
        .get(RETRY_AFTER)
        .expect("retry-after header")
        .to_str()
        .expect("retry-after is ascii")
        .to_owned();
    assert_eq!(header, expected);

    let body = body_of(response).await;
    assert!(body.is_retryable());
    assert!(body.retry_after().is_some());
}

#[rstest]
#[actix_web::test]
async fn upstream_errors_expose_upstream_status() {
    let error = Error::upstream("employee directory failed with status 500")
        .with_upstream_status(500);

    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(response.headers().get(RETRY_AFTER).is_none());

    let body = body_of(response).await;
    assert_eq!(body.upstream_status(), Some(500));
    assert!(!body.is_retryable());
}

#[test]
fn from_actix_error_is_sanitised_unexpected_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::Unexpected);
    assert_eq!(err.message(), "An unexpected error occurred");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
