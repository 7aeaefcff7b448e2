//! Normalization of domain errors onto [`ApiError`].
//!
//! Which domain errors are recognized, and what they become, is decided by a
//! [`TranslationTable`] the caller owns. Errors the table does not know are
//! handed back untouched.

use std::collections::HashMap;
use std::fmt;

use crate::error::ApiError;
use crate::tree::{ErrorDetail, ErrorNode, ErrorTreeBuilder, DEFAULT_LEAF_CODE};

/// Message payload of a domain validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMessage {
    Message(String),
    Messages(Vec<String>),
    /// Messages keyed by field, in field order.
    Dict(Vec<(String, Vec<String>)>),
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMessage::Message(msg) => f.write_str(msg),
            ValidationMessage::Messages(msgs) => f.write_str(&msgs.join(", ")),
            ValidationMessage::Dict(fields) => {
                for (i, (field, msgs)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{field}: {}", msgs.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Errors raised by application code, before they reach the HTTP layer.
#[derive(Debug)]
pub enum DomainError {
    /// A value was rejected.
    Value(String),
    /// Model-level validation failed.
    Validation(ValidationMessage),
    /// The caller may not perform the operation.
    Permission(String),
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl DomainError {
    pub fn kind(&self) -> DomainErrorKind {
        match self {
            DomainError::Value(_) => DomainErrorKind::Value,
            DomainError::Validation(_) => DomainErrorKind::Validation,
            DomainError::Permission(_) => DomainErrorKind::Permission,
            DomainError::Other(_) => DomainErrorKind::Other,
        }
    }

    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DomainError::Other(Box::new(err))
    }

    /// The message carried by this error.
    pub fn message(&self) -> ErrorMessage {
        match self {
            DomainError::Validation(ValidationMessage::Dict(fields)) => {
                ErrorMessage::Fields(fields.clone())
            }
            DomainError::Validation(msg) => ErrorMessage::Text(msg.to_string()),
            DomainError::Value(msg) | DomainError::Permission(msg) => {
                ErrorMessage::Text(msg.clone())
            }
            DomainError::Other(err) => ErrorMessage::Text(err.to_string()),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Value(msg) => write!(f, "invalid value: {msg}"),
            DomainError::Validation(msg) => write!(f, "validation failed: {msg}"),
            DomainError::Permission(msg) => write!(f, "permission denied: {msg}"),
            DomainError::Other(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DomainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DomainError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::num::ParseIntError> for DomainError {
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::Value(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for DomainError {
    fn from(err: std::num::ParseFloatError) -> Self {
        DomainError::Value(err.to_string())
    }
}

/// Message extracted from a domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    Text(String),
    Fields(Vec<(String, Vec<String>)>),
}

impl ErrorMessage {
    /// Detail tree for a validation error: one leaf per message.
    pub fn into_node(self, non_field_key: &str) -> ErrorNode {
        match self {
            ErrorMessage::Text(text) => {
                ErrorNode::list([ErrorNode::leaf(text, DEFAULT_LEAF_CODE)])
            }
            ErrorMessage::Fields(fields) => {
                let mut builder = ErrorTreeBuilder::new(non_field_key);
                for (field, messages) in fields {
                    let path = if field == non_field_key { "" } else { field.as_str() };
                    for message in messages {
                        builder.push(path, ErrorDetail::new(message, DEFAULT_LEAF_CODE));
                    }
                }
                builder.build()
            }
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ErrorMessage::Text(text) => text,
            ErrorMessage::Fields(fields) => ValidationMessage::Dict(fields).to_string(),
        }
    }
}

/// Classification of [`DomainError`] used as the table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    Value,
    Validation,
    Permission,
    Other,
}

/// Target of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Validation,
    ParseError,
    AuthenticationFailed,
    NotAuthenticated,
    PermissionDenied,
    NotFound,
    MethodNotAllowed,
    Throttled,
    Server,
}

impl ApiErrorKind {
    pub fn build(self, message: ErrorMessage, non_field_key: &str) -> ApiError {
        if self == ApiErrorKind::Validation {
            return ApiError::Validation(message.into_node(non_field_key));
        }
        let text = message.into_text();
        match self {
            ApiErrorKind::Validation | ApiErrorKind::ParseError => ApiError::ParseError(text),
            ApiErrorKind::AuthenticationFailed => ApiError::AuthenticationFailed(text),
            ApiErrorKind::NotAuthenticated => ApiError::NotAuthenticated(text),
            ApiErrorKind::PermissionDenied => ApiError::PermissionDenied(text),
            ApiErrorKind::NotFound => ApiError::NotFound(text),
            ApiErrorKind::MethodNotAllowed => ApiError::MethodNotAllowed(text),
            ApiErrorKind::Throttled => ApiError::Throttled(text),
            ApiErrorKind::Server => ApiError::Server(text),
        }
    }
}

/// Maps domain error kinds to API error kinds.
///
/// The default table recognizes value, validation and permission errors;
/// [`DomainError::Other`] is left alone unless explicitly registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    entries: HashMap<DomainErrorKind, ApiErrorKind>,
}

impl Default for TranslationTable {
    fn default() -> Self {
        Self::empty()
            .with(DomainErrorKind::Value, ApiErrorKind::Validation)
            .with(DomainErrorKind::Validation, ApiErrorKind::Validation)
            .with(DomainErrorKind::Permission, ApiErrorKind::PermissionDenied)
    }
}

impl TranslationTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with(mut self, from: DomainErrorKind, to: ApiErrorKind) -> Self {
        self.entries.insert(from, to);
        self
    }

    pub fn without(mut self, from: DomainErrorKind) -> Self {
        self.entries.remove(&from);
        self
    }

    pub fn get(&self, kind: DomainErrorKind) -> Option<ApiErrorKind> {
        self.entries.get(&kind).copied()
    }

    /// Translate `err`, or give it back when its kind is not registered.
    pub fn translate(&self, err: DomainError, non_field_key: &str) -> Result<ApiError, DomainError> {
        match self.get(err.kind()) {
            Some(target) => Ok(target.build(err.message(), non_field_key)),
            None => Err(err),
        }
    }
}
