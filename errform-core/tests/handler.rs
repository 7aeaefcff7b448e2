use axum::http::StatusCode;
use errform_core::{
    ApiError, ApiErrorKind, DomainError, DomainErrorKind, ErrorHandler, FormatterConfig,
    TranslationTable, Unstructured, ValidationMessage,
};
use http_body_util::BodyExt;
use serde_json::json;

async fn parts(resp: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn handle_translates_validation_errors() {
    let handler = ErrorHandler::default();
    let err = DomainError::Validation(ValidationMessage::Dict(vec![(
        "age".into(),
        vec!["Must be at least 18.".into()],
    )]));
    let (status, body) = parts(handler.handle(err).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": [{ "message": "Must be at least 18.", "code": "invalid", "field": "age" }] })
    );
}

#[tokio::test]
async fn handle_translates_permission_errors() {
    let handler = ErrorHandler::default();
    let (status, body) = parts(
        handler
            .handle(DomainError::Permission("read-only account".into()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({ "errors": [{ "message": "read-only account", "code": "permission_denied" }] })
    );
}

#[test]
fn handle_passes_through_unrecognized_errors() {
    let handler = ErrorHandler::default();
    let io_err = std::io::Error::new(std::io::ErrorKind::Other, "db down");
    let err = handler.handle(DomainError::other(io_err)).unwrap_err();
    assert_eq!(err.to_string(), "db down");
}

#[tokio::test]
async fn handle_or_server_error_falls_back() {
    let handler = ErrorHandler::default();
    let io_err = std::io::Error::new(std::io::ErrorKind::Other, "db down");
    let (status, body) = parts(handler.handle_or_server_error(DomainError::other(io_err))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "errors": [{ "message": "A server error occurred.", "code": "error" }] })
    );
}

#[tokio::test]
async fn custom_table_and_sentinel() {
    let handler = ErrorHandler::new(FormatterConfig::default().with_non_field_key("non_field_errors"))
        .with_table(TranslationTable::empty().with(DomainErrorKind::Other, ApiErrorKind::Server));
    assert_eq!(handler.table().get(DomainErrorKind::Value), None);

    let io_err = std::io::Error::new(std::io::ErrorKind::Other, "db down");
    let (status, _) = parts(handler.handle(DomainError::other(io_err)).unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, body) = parts(handler.respond(&ApiError::invalid("mismatch"))).await;
    assert_eq!(body, json!({ "errors": [{ "message": "mismatch", "code": "invalid" }] }));
}

#[test]
fn format_unstructured_uses_configured_default_code() {
    let handler = ErrorHandler::new(FormatterConfig::default().with_default_code("server_error"));
    let body = handler.format(&Unstructured("boom"));
    assert_eq!(
        serde_json::to_value(body).unwrap(),
        json!({ "errors": [{ "message": "boom", "code": "server_error" }] })
    );
}
