//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

struct Rendered {
    status: StatusCode,
    trace_header: Option<String>,
    payload: Error,
}

async fn render(error: &Error) -> Rendered {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    Rendered {
        status,
        trace_header,
        payload,
    }
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error: Error) {
    let rendered = render(&internal_error).await;

    assert_eq!(rendered.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(rendered.trace_header.as_deref(), Some(TRACE_ID));
    assert_eq!(rendered.payload.code(), ErrorCode::InternalError);
    assert_eq!(rendered.payload.message(), "Internal server error");
    assert_eq!(rendered.payload.trace_id(), Some(TRACE_ID));
    assert!(rendered.payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_details_without_trace_header() {
    let error =
        Error::invalid_request("user not found").with_details(json!({"missing": ["userId"]}));

    let rendered = render(&error).await;

    assert_eq!(rendered.status, StatusCode::BAD_REQUEST);
    assert!(rendered.trace_header.is_none());
    assert_eq!(rendered.payload.message(), "user not found");
    assert_eq!(
        rendered.payload.details(),
        Some(&json!({"missing": ["userId"]}))
    );
}

#[test]
fn path_errors_become_json_not_found() {
    let req = actix_web::test::TestRequest::get()
        .uri("/api/posts/abc")
        .to_http_request();
    let parse_err = "abc".parse::<i32>().expect_err("not a number");
    let path_err = PathError::Deserialize(<serde::de::value::Error as serde::de::Error>::custom(parse_err));

    let err = path_error_handler(path_err, &req);

    assert_eq!(err.as_response_error().status_code(), StatusCode::NOT_FOUND);
}
