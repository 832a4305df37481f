//! `AppError` to HTTP envelope mapping, exercised without a server.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use clientpulse_api::error::AppError;
use clientpulse_core::error::CoreError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn every_core_code_has_one_status() {
    let cases = [
        (CoreError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        (CoreError::UserNotFound, StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        (CoreError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
        (CoreError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
        (CoreError::validation("x"), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        (CoreError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
        (CoreError::InvalidTarget("x".into()), StatusCode::BAD_REQUEST, "INVALID_TARGET"),
        (CoreError::BadState("x".into()), StatusCode::CONFLICT, "BAD_STATE"),
    ];

    for (err, status, code) in cases {
        let (actual_status, json) = error_to_response(AppError::Core(err)).await;
        assert_eq!(actual_status, status, "{code}");
        assert_eq!(json["error"]["code"], code);
    }
}

#[tokio::test]
async fn not_found_keeps_message() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::NotFound("Project not found.".into()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["message"], "Project not found.");
    assert!(json["error"].get("details").is_none());
}

#[tokio::test]
async fn validation_error_carries_field_details() {
    let err = CoreError::field_error("email", "A user identifier (id or email) is required.");
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"]["details"]["field_errors"]["email"][0],
        "A user identifier (id or email) is required."
    );
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::InternalError("connection string leaked".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL");
    assert_ne!(json["error"]["message"], "connection string leaked");

    let (_, json) =
        error_to_response(AppError::Core(CoreError::Internal("secret detail".into()))).await;
    assert_eq!(json["error"]["code"], "INTERNAL");
    assert_ne!(json["error"]["message"], "secret detail");
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid JSON".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["message"], "invalid JSON");
}

#[test]
fn code_matches_core_variant() {
    let err: AppError = CoreError::BadState("archived".into()).into();
    assert_eq!(err.code(), "BAD_STATE");
    assert_matches!(err, AppError::Core(CoreError::BadState(_)));
    assert_eq!(AppError::Database(sqlx::Error::PoolTimedOut).code(), "INTERNAL");
}
