use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::formatter::ErrorsFormatter;
use crate::tree::ErrorNode;

/// An error that may expose a structured detail tree.
///
/// Errors without one are formatted from their `Display` output.
pub trait ErrorDetails: fmt::Display {
    fn full_details(&self) -> Option<Cow<'_, ErrorNode>> {
        None
    }
}

/// Wraps any displayable error as one without structured detail.
#[derive(Debug)]
pub struct Unstructured<E>(pub E);

impl<E: fmt::Display> fmt::Display for Unstructured<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<E: fmt::Display> ErrorDetails for Unstructured<E> {}

/// API-level errors. Each variant maps to an HTTP status and a default code.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Validation(ErrorNode),
    ParseError(String),
    AuthenticationFailed(String),
    NotAuthenticated(String),
    PermissionDenied(String),
    NotFound(String),
    MethodNotAllowed(String),
    Throttled(String),
    Server(String),
    Custom {
        status: StatusCode,
        detail: ErrorNode,
    },
}

impl ApiError {
    /// Validation failure with a single global message.
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation(ErrorNode::list([ErrorNode::leaf(message, "invalid")]))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::ParseError(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed(_) | ApiError::NotAuthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Throttled(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Custom { status, .. } => *status,
        }
    }

    pub fn default_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "invalid",
            ApiError::ParseError(_) => "parse_error",
            ApiError::AuthenticationFailed(_) => "authentication_failed",
            ApiError::NotAuthenticated(_) => "not_authenticated",
            ApiError::PermissionDenied(_) => "permission_denied",
            ApiError::NotFound(_) => "not_found",
            ApiError::MethodNotAllowed(_) => "method_not_allowed",
            ApiError::Throttled(_) => "throttled",
            ApiError::Server(_) | ApiError::Custom { .. } => "error",
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            ApiError::ParseError(msg)
            | ApiError::AuthenticationFailed(msg)
            | ApiError::NotAuthenticated(msg)
            | ApiError::PermissionDenied(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::Throttled(msg)
            | ApiError::Server(msg) => Some(msg),
            ApiError::Validation(_) | ApiError::Custom { .. } => None,
        }
    }

    /// Render with a specific formatter.
    pub fn into_response_with(self, formatter: &ErrorsFormatter) -> Response {
        let body = formatter.format(&self);
        (self.status(), Json(body)).into_response()
    }
}

impl ErrorDetails for ApiError {
    fn full_details(&self) -> Option<Cow<'_, ErrorNode>> {
        match self {
            ApiError::Validation(node) | ApiError::Custom { detail: node, .. } => {
                Some(Cow::Borrowed(node))
            }
            other => other
                .message()
                .map(|msg| Cow::Owned(ErrorNode::leaf(msg, other.default_code()))),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(&ErrorsFormatter::default())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(node) => {
                write!(f, "Validation Error: {} errors", node.leaf_count())
            }
            ApiError::ParseError(msg) => write!(f, "Parse Error: {msg}"),
            ApiError::AuthenticationFailed(msg) => write!(f, "Authentication Failed: {msg}"),
            ApiError::NotAuthenticated(msg) => write!(f, "Not Authenticated: {msg}"),
            ApiError::PermissionDenied(msg) => write!(f, "Permission Denied: {msg}"),
            ApiError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            ApiError::MethodNotAllowed(msg) => write!(f, "Method Not Allowed: {msg}"),
            ApiError::Throttled(msg) => write!(f, "Throttled: {msg}"),
            ApiError::Server(msg) => write!(f, "Server Error: {msg}"),
            ApiError::Custom { status, detail } => {
                write!(f, "Custom Error ({status}): {}", detail.to_json())
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => ApiError::PermissionDenied(err.to_string()),
            std::io::ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            _ => ApiError::Server(err.to_string()),
        }
    }
}

/// Generate `From<E> for ApiError` implementations that map error types to
/// a message-carrying `ApiError` variant.
///
/// # Example
///
/// ```ignore
/// errform_core::map_error! {
///     RepositoryError => Server,
///     QuotaExceeded => Throttled,
/// }
/// ```
#[macro_export]
macro_rules! map_error {
    ( $( $err_ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$err_ty> for $crate::ApiError {
                fn from(err: $err_ty) -> Self {
                    $crate::ApiError::$variant(err.to_string())
                }
            }
        )*
    };
}
