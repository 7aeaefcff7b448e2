use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ErrformConfig};
use crate::error::ErrorDetails;
use crate::tree::{ErrorDetail, ErrorNode, DEFAULT_LEAF_CODE};

/// Default non-field key.
pub const NON_FIELD_ERRORS_KEY: &str = "__all__";

/// Default code for errors that carry no structured detail.
pub const DEFAULT_ERROR_CODE: &str = "error";

/// One entry of the `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatError {
    pub message: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl FlatError {
    fn stamped(detail: &ErrorDetail, field: Option<&str>) -> Self {
        FlatError {
            message: detail.message.clone(),
            code: detail.code.clone(),
            field: field.filter(|f| !f.is_empty()).map(str::to_owned),
        }
    }
}

/// Response body: `{ "errors": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsBody {
    pub errors: Vec<FlatError>,
}

/// Knobs for [`ErrorsFormatter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Key grouping errors that belong to no field.
    pub non_field_key: String,
    /// Code used when an error has no structured detail.
    pub default_code: String,
    /// Code given to decoded leaves that have none.
    pub leaf_code: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            non_field_key: NON_FIELD_ERRORS_KEY.to_string(),
            default_code: DEFAULT_ERROR_CODE.to_string(),
            leaf_code: DEFAULT_LEAF_CODE.to_string(),
        }
    }
}

impl FormatterConfig {
    /// Read the `errors.*` section, keeping defaults for absent keys.
    ///
    /// | Key                   | Default   |
    /// |-----------------------|-----------|
    /// | `errors.sentinel`     | `__all__` |
    /// | `errors.default.code` | `error`   |
    /// | `errors.leaf.code`    | `invalid` |
    pub fn from_config(config: &ErrformConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            non_field_key: config
                .get::<Option<String>>("errors.sentinel")
                .or_else(absent)?
                .unwrap_or(defaults.non_field_key),
            default_code: config
                .get::<Option<String>>("errors.default.code")
                .or_else(absent)?
                .unwrap_or(defaults.default_code),
            leaf_code: config
                .get::<Option<String>>("errors.leaf.code")
                .or_else(absent)?
                .unwrap_or(defaults.leaf_code),
        })
    }

    pub fn with_non_field_key(mut self, key: impl Into<String>) -> Self {
        self.non_field_key = key.into();
        self
    }

    pub fn with_default_code(mut self, code: impl Into<String>) -> Self {
        self.default_code = code.into();
        self
    }

    pub fn with_leaf_code(mut self, code: impl Into<String>) -> Self {
        self.leaf_code = code.into();
        self
    }
}

fn absent<T>(err: ConfigError) -> Result<Option<T>, ConfigError> {
    match err {
        ConfigError::NotFound(_) => Ok(None),
        other => Err(other),
    }
}

/// Flattens nested error trees into `{message, code, field}` records.
///
/// Traversal is depth-first in key order, so the output order is a pure
/// function of the input. Field paths are the dot-joined keys leading to each
/// leaf; the non-field key never appears in a path.
#[derive(Debug, Clone, Default)]
pub struct ErrorsFormatter {
    config: FormatterConfig,
}

impl ErrorsFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Format any error: structured details are flattened, anything else is
    /// reduced to its string form.
    pub fn format<E: ErrorDetails + ?Sized>(&self, error: &E) -> ErrorsBody {
        match error.full_details() {
            Some(details) => self.format_details(&details),
            None => self.format_message(error.to_string()),
        }
    }

    /// Format a raw "full details" JSON payload.
    pub fn format_json(&self, details: &serde_json::Value) -> ErrorsBody {
        let node = ErrorNode::from_json_with(details, &self.config.leaf_code);
        self.format_details(&node)
    }

    pub fn format_details(&self, details: &ErrorNode) -> ErrorsBody {
        ErrorsBody {
            errors: self.flatten(details),
        }
    }

    /// A single record with the default code and no field.
    pub fn format_message(&self, message: impl Into<String>) -> ErrorsBody {
        ErrorsBody {
            errors: vec![FlatError {
                message: message.into(),
                code: self.config.default_code.clone(),
                field: None,
            }],
        }
    }

    pub fn flatten(&self, node: &ErrorNode) -> Vec<FlatError> {
        let mut out = Vec::with_capacity(node.leaf_count());
        match node {
            // A bare list at the root is a list of global errors.
            ErrorNode::List(items) => self.walk_list(items, None, true, &mut out),
            other => self.walk(other, None, &mut out),
        }
        out
    }

    fn walk(&self, node: &ErrorNode, path: Option<&str>, out: &mut Vec<FlatError>) {
        match node {
            ErrorNode::Leaf(detail) => out.push(FlatError::stamped(detail, path)),
            ErrorNode::List(items) => self.walk_list(items, path, false, out),
            ErrorNode::Fields(entries) => {
                for (key, value) in entries {
                    let non_field = *key == self.config.non_field_key;
                    let joined;
                    let branch = if non_field {
                        path
                    } else {
                        joined = join_path(path, key);
                        Some(joined.as_str())
                    };
                    match value {
                        ErrorNode::List(items) => self.walk_list(items, branch, non_field, out),
                        other => self.walk(other, branch, out),
                    }
                }
            }
        }
    }

    fn walk_list(
        &self,
        items: &[ErrorNode],
        path: Option<&str>,
        non_field: bool,
        out: &mut Vec<FlatError>,
    ) {
        for item in items {
            match item.unwrap_single() {
                ErrorNode::Leaf(detail) => {
                    let field = if non_field { None } else { path };
                    out.push(FlatError::stamped(detail, field));
                }
                ErrorNode::List(inner) => self.walk_list(inner, path, non_field, out),
                fields => self.walk(fields, path, out),
            }
        }
    }
}

fn join_path(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{key}"),
        _ => key.to_string(),
    }
}
