pub mod document;
pub mod error;
pub mod navigator;
pub mod pointer;

pub use crate::error::PointerError;
pub use crate::pointer::JsonPointer;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

const PATH_SEPARATOR: &'static str = "/";
const TILDE: &'static str = "~";
const ENCODED_SLASH: &'static str = "~1";
const ENCODED_TILDE: &'static str = "~0";
const PERCENT: &'static str = "%";
const ENCODED_PERCENT: &'static str = "%25";
const APPEND_TOKEN: &'static str = "-";

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

/// Resolves a JSON pointer against a document and returns a reference
/// to the addressed node.
///
/// # Parameters
/// - `source`: The document tree
/// - `pointer`: The JSON pointer path, see: https://tools.ietf.org/html/rfc6901
///
/// # Returns
/// A reference into the document, or a `PointerError` if the pointer is
/// malformed or the path does not exist. The empty pointer resolves to
/// the document itself. Resolution never mutates the document.
///
/// # Examples
/// ```rust
/// use serde_json::json;
///
/// let doc = json!({ "foo": 1, "bar": { "baz": 2 } });
/// let node = jsonpointer::get_value(&doc, "/bar/baz").unwrap();
/// assert_eq!(node, &json!(2));
/// ```
pub fn get_value<'a>(source: &'a Value, pointer: &str) -> Result<&'a Value, PointerError> {
    let ptr = JsonPointer::parse(pointer)?;
    navigator::resolve(source, ptr.tokens())
}

/// Gets the value at the JSON pointer path, converted to the requested
/// type.
///
/// # Parameters
/// - `source`: The document tree
/// - `pointer`: The JSON pointer path, see: https://tools.ietf.org/html/rfc6901
///
/// # Returns
/// The converted value, or a `PointerError` if the pointer is
/// malformed, the path does not exist, or the resolved node cannot be
/// converted to `T`. Resolution and conversion failures stay
/// distinguishable through the error variant.
///
/// # Examples
/// ```rust
/// use serde_json::json;
///
/// let doc = json!({ "foo": 1, "qux": [3, 4, 5] });
/// let second: i64 = jsonpointer::get(&doc, "/qux/1").unwrap();
/// assert_eq!(second, 4);
/// ```
pub fn get<T>(source: &Value, pointer: &str) -> Result<T, PointerError>
where
    T: DeserializeOwned,
{
    let node = get_value(source, pointer)?;
    document::from_tree(node)
}

/// Tries to get the value at the JSON pointer path.
///
/// # Parameters
/// - `source`: The document tree
/// - `pointer`: The JSON pointer path, see: https://tools.ietf.org/html/rfc6901
///
/// # Returns
/// `Ok(Some(value))` when the path resolves and converts, `Ok(None)`
/// when it does not. A malformed pointer is a caller programming error
/// rather than a data-shape mismatch, so `Syntax` errors still
/// propagate as `Err`.
///
/// # Examples
/// ```rust
/// use serde_json::json;
///
/// let doc = json!({ "foo": 1 });
/// let found: Option<i64> = jsonpointer::try_get(&doc, "/foo").unwrap();
/// assert_eq!(found, Some(1));
/// let missing: Option<i64> = jsonpointer::try_get(&doc, "/quo").unwrap();
/// assert_eq!(missing, None);
/// ```
pub fn try_get<T>(source: &Value, pointer: &str) -> Result<Option<T>, PointerError>
where
    T: DeserializeOwned,
{
    let ptr = JsonPointer::parse(pointer)?;
    let resolved = navigator::resolve(source, ptr.tokens())
        .and_then(|node| document::from_tree(node));
    match resolved {
        Ok(value) => Ok(Some(value)),
        Err(_) => Ok(None),
    }
}

/// Sets the value at the JSON pointer path, creating missing
/// intermediate nodes.
///
/// # Parameters
/// - `source`: The document tree, mutated in place
/// - `pointer`: The JSON pointer path, see: https://tools.ietf.org/html/rfc6901
/// - `value`: The value to place at the path
///
/// # Returns
/// `Ok(())` once the targeted slot has been replaced, or a
/// `PointerError` if the pointer is malformed, the path cannot be
/// created, or the value cannot enter the tree model.
///
/// # Behavior
/// Missing intermediate object keys are created as empty objects, and
/// the array token `-` appends a new element. Replacement is in place:
/// ancestor nodes keep their identity, only the targeted slot changes.
/// The value is converted before traversal starts, so a conversion
/// failure leaves the document untouched. An empty pointer replaces the
/// whole document.
///
/// # Examples
/// ```rust
/// use serde_json::json;
///
/// let mut doc = json!({ "qux": [3, 4, 5] });
/// jsonpointer::set(&mut doc, "/qux/-", 6).unwrap();
/// assert_eq!(doc["qux"], json!([3, 4, 5, 6]));
/// ```
pub fn set<V>(source: &mut Value, pointer: &str, value: V) -> Result<(), PointerError>
where
    V: Serialize,
{
    let ptr = JsonPointer::parse(pointer)?;
    let tree = document::to_tree(value)?;
    let slot = navigator::resolve_mut(source, ptr.tokens())?;
    *slot = tree;
    Ok(())
}

/// Gets the value at the JSON pointer path from a textual document.
///
/// Text that looks like an object or array literal is parsed as a
/// structured document; anything else is treated as an opaque string
/// scalar.
///
/// # Examples
/// ```rust
/// let doc = r#"{ "books": [{ "author": "F. Scott Fitzgerald" },
///                          { "author": "John Steinbeck" }] }"#;
/// let author: String = jsonpointer::get_str(doc, "/books/1/author").unwrap();
/// assert_eq!(author, "John Steinbeck");
/// ```
pub fn get_str<T>(source: &str, pointer: &str) -> Result<T, PointerError>
where
    T: DeserializeOwned,
{
    let doc = document::parse_document(source)?;
    get(&doc, pointer)
}

/// Tries to get the value at the JSON pointer path from a textual
/// document. Same contract as [`try_get`]: only `Syntax` errors
/// propagate, everything else reports absence.
pub fn try_get_str<T>(source: &str, pointer: &str) -> Result<Option<T>, PointerError>
where
    T: DeserializeOwned,
{
    let ptr = JsonPointer::parse(pointer)?;
    let doc = match document::parse_document(source) {
        Ok(doc) => doc,
        Err(_) => return Ok(None),
    };
    let resolved = navigator::resolve(&doc, ptr.tokens())
        .and_then(|node| document::from_tree(node));
    match resolved {
        Ok(value) => Ok(Some(value)),
        Err(_) => Ok(None),
    }
}

/// Sets the value at the JSON pointer path in a textual document and
/// returns the updated document as text.
///
/// # Examples
/// ```rust
/// let out = jsonpointer::set_str(r#"{"foo":1}"#, "/foo", 6).unwrap();
/// let foo: i64 = jsonpointer::get_str(&out, "/foo").unwrap();
/// assert_eq!(foo, 6);
/// ```
pub fn set_str<V>(source: &str, pointer: &str, value: V) -> Result<String, PointerError>
where
    V: Serialize,
{
    let mut doc = document::parse_document(source)?;
    set(&mut doc, pointer, value)?;
    document::serialize_document(&doc)
}

/// Sets the value at the JSON pointer path in a typed document and
/// returns the updated document in the same type.
///
/// The source round-trips through the tree model, so `T` must survive
/// serialization and deserialization of its own shape.
pub fn set_typed<T, V>(source: T, pointer: &str, value: V) -> Result<T, PointerError>
where
    T: Serialize + DeserializeOwned,
    V: Serialize,
{
    let mut doc = document::to_tree(source)?;
    set(&mut doc, pointer, value)?;
    document::from_tree(&doc)
}
