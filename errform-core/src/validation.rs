use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::formatter::FormatterConfig;
use crate::tree::{ErrorDetail, ErrorNode, ErrorTreeBuilder};

/// Code attached to every garde failure.
pub const VALIDATION_CODE: &str = "validation";

// ── Report conversion ──────────────────────────────────────

/// Convert a garde report into an error tree.
///
/// garde paths render as `address.city` or `items[0].name`; each dot starts a
/// nesting level. Errors on the value itself go under the non-field key.
pub fn report_to_node(report: &garde::Report, config: &FormatterConfig) -> ErrorNode {
    let mut builder = ErrorTreeBuilder::new(config.non_field_key.clone());
    for (path, error) in report.iter() {
        builder.push(
            &path.to_string(),
            ErrorDetail::new(error.message(), VALIDATION_CODE),
        );
    }
    builder.build()
}

/// Run garde validation, mapping failures to [`ApiError::Validation`].
///
/// Root-level errors are filed under the default non-field key; use
/// [`validate_with`] when rendering through a differently configured
/// formatter.
pub fn validate<T>(value: &T) -> Result<(), ApiError>
where
    T: garde::Validate,
    T::Context: Default,
{
    validate_with(value, &FormatterConfig::default())
}

/// Like [`validate`], filing root-level errors under `config.non_field_key`.
pub fn validate_with<T>(value: &T, config: &FormatterConfig) -> Result<(), ApiError>
where
    T: garde::Validate,
    T::Context: Default,
{
    value.validate().map_err(|report| {
        let node = report_to_node(&report, config);
        tracing::debug!(errors = node.leaf_count(), "request validation failed");
        ApiError::Validation(node)
    })
}

// ── Extractor ──────────────────────────────────────────────

/// JSON body extractor that also runs garde validation.
///
/// Malformed bodies are rejected with [`ApiError::ParseError`], invalid ones
/// with [`ApiError::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + garde::Validate + Send,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::ParseError(rejection.body_text()))?;
        validate(&value)?;
        Ok(ValidatedJson(value))
    }
}

// Re-export garde::Validate for convenience.
pub use garde::Validate;
