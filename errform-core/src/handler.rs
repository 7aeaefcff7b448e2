use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ApiError, ErrorDetails};
use crate::formatter::{ErrorsBody, ErrorsFormatter, FormatterConfig};
use crate::translate::{DomainError, TranslationTable};

/// Turns errors into `{ "errors": [...] }` responses.
///
/// Holds its formatter configuration and translation table explicitly, so
/// several handlers with different settings can coexist in one process.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler {
    formatter: ErrorsFormatter,
    table: TranslationTable,
}

impl ErrorHandler {
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            formatter: ErrorsFormatter::new(config),
            table: TranslationTable::default(),
        }
    }

    pub fn with_table(mut self, table: TranslationTable) -> Self {
        self.table = table;
        self
    }

    pub fn formatter(&self) -> &ErrorsFormatter {
        &self.formatter
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn format<E: ErrorDetails + ?Sized>(&self, err: &E) -> ErrorsBody {
        self.formatter.format(err)
    }

    pub fn respond(&self, err: &ApiError) -> Response {
        let status = err.status();
        let body = self.formatter.format(err);
        tracing::debug!(
            status = status.as_u16(),
            errors = body.errors.len(),
            "formatted error response"
        );
        (status, Json(body)).into_response()
    }

    /// Run garde validation, filing root-level errors under this handler's
    /// non-field key.
    pub fn validate<T>(&self, value: &T) -> Result<(), ApiError>
    where
        T: garde::Validate,
        T::Context: Default,
    {
        crate::validation::validate_with(value, self.formatter.config())
    }

    /// Translate a domain error and render it.
    ///
    /// Errors the table does not recognize are returned unchanged for the
    /// caller's own fallback handling.
    pub fn handle(&self, err: DomainError) -> Result<Response, DomainError> {
        let non_field_key = &self.formatter.config().non_field_key;
        match self.table.translate(err, non_field_key) {
            Ok(api) => Ok(self.respond(&api)),
            Err(err) => {
                tracing::warn!(error = %err, "unhandled domain error");
                Err(err)
            }
        }
    }

    /// Like [`handle`](Self::handle), but renders unrecognized errors as a
    /// generic server error.
    pub fn handle_or_server_error(&self, err: DomainError) -> Response {
        self.handle(err).unwrap_or_else(|_| {
            self.respond(&ApiError::Server("A server error occurred.".into()))
        })
    }
}
