//! Everything a service needs with a single `use`.
//!
//! ```ignore
//! use errform_core::prelude::*;
//!
//! async fn create(ValidatedJson(body): ValidatedJson<NewUser>) -> Result<Json<User>, ApiError> {
//!     // ...
//! }
//! ```

pub use crate::error::{ApiError, ErrorDetails, Unstructured};
pub use crate::formatter::{ErrorsBody, ErrorsFormatter, FlatError, FormatterConfig};
pub use crate::handler::ErrorHandler;
pub use crate::translate::{DomainError, TranslationTable, ValidationMessage};
pub use crate::tree::{ErrorDetail, ErrorNode};
pub use crate::validation::{ValidatedJson, Validate};
