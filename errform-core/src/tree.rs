use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Code given to leaves decoded without an explicit `code`.
pub const DEFAULT_LEAF_CODE: &str = "invalid";

/// Terminal error record: a message and a machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// A nested error structure, as attached to a validation failure.
///
/// - `Leaf`: a single `{message, code}` record.
/// - `Fields`: errors keyed by field name. Order is significant and
///   duplicate keys are allowed; they are visited in order.
/// - `List`: several errors attached to the same field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    Leaf(ErrorDetail),
    Fields(Vec<(String, ErrorNode)>),
    List(Vec<ErrorNode>),
}

impl ErrorNode {
    pub fn leaf(message: impl Into<String>, code: impl Into<String>) -> Self {
        ErrorNode::Leaf(ErrorDetail::new(message, code))
    }

    pub fn fields<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ErrorNode)>,
    {
        ErrorNode::Fields(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(items: impl IntoIterator<Item = ErrorNode>) -> Self {
        ErrorNode::List(items.into_iter().collect())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ErrorNode::Leaf(_))
    }

    /// A one-element list stands for its sole member.
    pub fn unwrap_single(&self) -> &ErrorNode {
        match self {
            ErrorNode::List(items) if items.len() == 1 => &items[0],
            other => other,
        }
    }

    /// Number of leaves reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            ErrorNode::Leaf(_) => 1,
            ErrorNode::Fields(entries) => entries.iter().map(|(_, v)| v.leaf_count()).sum(),
            ErrorNode::List(items) => items.iter().map(ErrorNode::leaf_count).sum(),
        }
    }

    /// Decode the "full details" JSON shape, using [`DEFAULT_LEAF_CODE`] for
    /// leaves without a code.
    pub fn from_json(value: &Value) -> Self {
        Self::from_json_with(value, DEFAULT_LEAF_CODE)
    }

    /// Decode the "full details" JSON shape.
    ///
    /// An object is a leaf only when its `message` is a string; an object
    /// whose `message` holds anything else is a mapping that happens to have
    /// a field called `message`.
    pub fn from_json_with(value: &Value, leaf_code: &str) -> Self {
        match value {
            Value::Object(map) => match map.get("message") {
                Some(Value::String(message)) => {
                    let code = match map.get("code") {
                        Some(Value::String(code)) => code.clone(),
                        _ => leaf_code.to_string(),
                    };
                    ErrorNode::leaf(message.clone(), code)
                }
                _ => ErrorNode::Fields(
                    map.iter()
                        .map(|(k, v)| (k.clone(), Self::from_json_with(v, leaf_code)))
                        .collect(),
                ),
            },
            Value::Array(items) => ErrorNode::List(
                items
                    .iter()
                    .map(|v| Self::from_json_with(v, leaf_code))
                    .collect(),
            ),
            Value::String(s) => ErrorNode::leaf(s.clone(), leaf_code),
            other => ErrorNode::leaf(other.to_string(), leaf_code),
        }
    }

    /// Render back into the "full details" JSON shape.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<ErrorDetail> for ErrorNode {
    fn from(detail: ErrorDetail) -> Self {
        ErrorNode::Leaf(detail)
    }
}

impl Serialize for ErrorNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorNode::Leaf(detail) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("message", &detail.message)?;
                map.serialize_entry("code", &detail.code)?;
                map.end()
            }
            ErrorNode::Fields(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            ErrorNode::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

// ── Builder ────────────────────────────────────────────────

/// Builds a `Fields` tree from dot-separated paths.
///
/// Errors pushed at the same path accumulate into one list. An empty path
/// files the error under the non-field key.
#[derive(Debug, Clone)]
pub struct ErrorTreeBuilder {
    non_field_key: String,
    entries: Vec<(String, ErrorNode)>,
}

impl ErrorTreeBuilder {
    pub fn new(non_field_key: impl Into<String>) -> Self {
        Self {
            non_field_key: non_field_key.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, path: &str, detail: ErrorDetail) -> &mut Self {
        let segments: Vec<&str> = if path.is_empty() {
            vec![self.non_field_key.as_str()]
        } else {
            path.split('.').collect()
        };
        insert_at(&mut self.entries, &segments, detail);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> ErrorNode {
        ErrorNode::Fields(self.entries)
    }
}

fn insert_at(entries: &mut Vec<(String, ErrorNode)>, segments: &[&str], detail: ErrorDetail) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    // A key may hold both its own errors (a list) and nested fields; those
    // live in separate entries under the same key.
    let wants_list = rest.is_empty();
    let slot = entries.iter().position(|(key, node)| {
        key == *head
            && match node {
                ErrorNode::List(_) => wants_list,
                ErrorNode::Fields(_) => !wants_list,
                ErrorNode::Leaf(_) => false,
            }
    });
    let index = match slot {
        Some(i) => i,
        None => {
            let node = if wants_list {
                ErrorNode::List(Vec::new())
            } else {
                ErrorNode::Fields(Vec::new())
            };
            entries.push((head.to_string(), node));
            entries.len() - 1
        }
    };

    match &mut entries[index].1 {
        ErrorNode::List(items) => items.push(ErrorNode::Leaf(detail)),
        ErrorNode::Fields(inner) => insert_at(inner, rest, detail),
        ErrorNode::Leaf(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_field_with_nested_value_is_not_a_leaf() {
        let node = ErrorNode::from_json(&json!({
            "message": { "message": "too long", "code": "max_length" }
        }));
        assert_eq!(
            node,
            ErrorNode::fields([("message", ErrorNode::leaf("too long", "max_length"))])
        );
    }

    #[test]
    fn builder_groups_same_path() {
        let mut builder = ErrorTreeBuilder::new("__all__");
        builder
            .push("name", ErrorDetail::new("a", "x"))
            .push("name", ErrorDetail::new("b", "y"));
        assert_eq!(builder.build().leaf_count(), 2);
    }
}
