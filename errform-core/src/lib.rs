//! Formats validation and API errors into a single nested-error JSON shape:
//!
//! ```json
//! { "errors": [ { "message": "This field is required.", "code": "required", "field": "address.city" } ] }
//! ```

pub mod config;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod layers;
pub mod prelude;
pub mod translate;
pub mod tree;
pub mod validation;

pub use config::{ConfigError, ConfigValue, ErrformConfig, FromConfigValue};
pub use error::{ApiError, ErrorDetails, Unstructured};
pub use formatter::{
    ErrorsBody, ErrorsFormatter, FlatError, FormatterConfig, DEFAULT_ERROR_CODE,
    NON_FIELD_ERRORS_KEY,
};
pub use handler::ErrorHandler;
pub use layers::{catch_panic_layer, init_tracing};
pub use translate::{
    ApiErrorKind, DomainError, DomainErrorKind, ErrorMessage, TranslationTable, ValidationMessage,
};
pub use tree::{ErrorDetail, ErrorNode, ErrorTreeBuilder, DEFAULT_LEAF_CODE};
pub use validation::{report_to_node, validate, validate_with, ValidatedJson};

pub use garde;
