//! errform — consistent `{ "errors": [...] }` responses for axum services.
//!
//! This facade crate re-exports `errform-core` through a single dependency.
//! Import everything you need with:
//!
//! ```ignore
//! use errform::prelude::*;
//! ```

pub extern crate errform_core;

// Re-export everything from errform-core at the top level for convenience.
pub use errform_core::*;

/// Unified prelude — import everything with `use errform::prelude::*`.
pub mod prelude {
    pub use errform_core::prelude::*;
}
