use crate::error::PointerError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Turns document text into the tree model.
///
/// Text that starts with `{` or `[` (after leading whitespace) is
/// treated as a structured JSON document and parsed; anything else is
/// wrapped as an opaque string scalar. A structured-looking document
/// that fails to parse is a `Conversion` error.
pub fn parse_document(raw: &str) -> Result<Value, PointerError> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        Ok(serde_json::from_str(raw)?)
    } else {
        Ok(Value::String(raw.to_owned()))
    }
}

/// Converts an arbitrary serializable value into the tree model.
pub fn to_tree<V>(value: V) -> Result<Value, PointerError>
where
    V: Serialize,
{
    Ok(serde_json::to_value(value)?)
}

/// Converts a resolved tree node into the caller's requested type.
///
/// A shape mismatch is a `Conversion` error, kept distinct from the
/// resolution errors raised while locating the node.
pub fn from_tree<T>(node: &Value) -> Result<T, PointerError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(node.clone())?)
}

/// Renders a tree back to document text. Used when the original input
/// was textual, so the caller gets the same representation back.
pub fn serialize_document(node: &Value) -> Result<String, PointerError> {
    Ok(serde_json::to_string(node)?)
}
