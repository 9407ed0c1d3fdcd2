//! Render context merging.
//!
//! Every render call builds a fresh context from three layers, lowest
//! precedence first:
//!
//! 1. the configured default context
//! 2. the per-reply locals supplied by the host
//! 3. the data passed to the render call
//!
//! The merge is shallow: a key present in a higher layer replaces the lower
//! value outright, nested objects included. Any layer may be absent.

use serde_json::{Map, Value};

use crate::core::{ViewError, ViewResult};

/// Merged key/value data handed to a render function. Built per call and
/// dropped when the call completes.
pub type MergedContext = Map<String, Value>;

/// Shallow-merge the three context layers.
///
/// # Examples
///
/// ```rust
/// use folio::context::merge;
/// use serde_json::json;
///
/// let defaults = json!({ "a": 1, "b": 1 });
/// let locals = json!({ "b": 2 });
/// let data = json!({ "a": 3 });
///
/// let merged = merge(
///     defaults.as_object(),
///     locals.as_object(),
///     data.as_object(),
/// );
/// assert_eq!(serde_json::Value::Object(merged), json!({ "a": 3, "b": 2 }));
/// ```
#[must_use]
pub fn merge(
    default_context: Option<&Map<String, Value>>,
    locals: Option<&Map<String, Value>>,
    data: Option<&Map<String, Value>>,
) -> MergedContext {
    let capacity = [default_context, locals, data].iter().flatten().map(|m| m.len()).sum();
    let mut merged = Map::with_capacity(capacity);

    for layer in [default_context, locals, data].into_iter().flatten() {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Interpret caller-supplied render data as a context layer.
///
/// `null` counts as absent; any other non-object value is rejected because it
/// has no keys to merge.
pub fn data_layer<'a>(page: &str, data: &'a Value) -> ViewResult<Option<&'a Map<String, Value>>> {
    match data {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(ViewError::InvalidContext {
            page: page.to_string(),
            found: value_type_name(other),
        }),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
