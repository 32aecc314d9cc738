use crate::error::PointerError;
use crate::{APPEND_TOKEN, json_type};
use serde_json::{Map, Value};

type ResolveResult<'a> = Result<&'a Value, PointerError>;
type ResolveMutResult<'a> = Result<&'a mut Value, PointerError>;

/// Resolves a token sequence against a document for reading.
///
/// Walks the tree one token at a time, keeping a cursor on the current
/// node. An empty token sequence resolves to the root. The read path
/// never mutates the document: the append token `-` is rejected here as
/// an invalid index, and only the write path
/// ([`resolve_mut`]) honors it.
///
/// Token rules per step:
/// - Object: the token is looked up as a literal member key (the empty
///   token addresses a member literally named `""`).
/// - Array: the token must be a non-negative base-10 integer within
///   bounds. An empty token passes through the array unchanged, a
///   root-adjacent quirk kept for pointers like `//0`.
/// - Scalar with tokens remaining: dereference failure.
pub fn resolve<'a>(root: &'a Value, tokens: &[String]) -> ResolveResult<'a> {
    let mut current = root;
    for token in tokens {
        if token.is_empty() && current.is_array() {
            continue;
        }
        current = match current {
            Value::Object(map) => match map.get(token.as_str()) {
                Some(child) => child,
                None => return Err(PointerError::missing_key(token.as_str())),
            },
            Value::Array(items) => {
                let index = parse_index(token)?;
                match items.get(index) {
                    Some(child) => child,
                    None => return Err(PointerError::index_out_of_bounds(index, items.len())),
                }
            }
            other => return Err(PointerError::unindexable(token.as_str(), json_type(other))),
        };
    }
    Ok(current)
}

/// Resolves a token sequence against a document for writing, creating
/// missing nodes along the way.
///
/// Same stepping rules as [`resolve`], with two write-path additions:
/// - Object: a missing key is autocreated and descended into.
/// - Array: the token `-` appends a new element and the cursor moves to
///   it. Numeric indexes stay strict; there is no implicit growth
///   except via `-`.
///
/// Created placeholders follow the position in the pointer: an
/// intermediate position becomes an empty object so deeper tokens can
/// keep descending, the final position becomes null and is expected to
/// be overwritten by the caller. Descending into an existing scalar
/// still fails; create mode never rewrites a scalar into a container.
///
/// The returned handle aliases the slot inside the document, so
/// replacing its contents preserves the identity of every ancestor.
pub fn resolve_mut<'a>(root: &'a mut Value, tokens: &[String]) -> ResolveMutResult<'a> {
    let token_count = tokens.len();
    let mut current = root;
    for (depth, token) in tokens.iter().enumerate() {
        let final_token = depth + 1 == token_count;
        if token.is_empty() && current.is_array() {
            continue;
        }
        current = match current {
            Value::Object(map) => {
                if !map.contains_key(token.as_str()) {
                    log::debug!("Autocreating missing key '{}'", token);
                }
                map.entry(token.clone())
                    .or_insert_with(|| placeholder(final_token))
            }
            Value::Array(items) => {
                if token == APPEND_TOKEN {
                    log::debug!("Appending array element at index {}", items.len());
                    items.push(placeholder(final_token));
                    let end = items.len() - 1;
                    &mut items[end]
                } else {
                    let index = parse_index(token)?;
                    let len = items.len();
                    match items.get_mut(index) {
                        Some(child) => child,
                        None => return Err(PointerError::index_out_of_bounds(index, len)),
                    }
                }
            }
            other => return Err(PointerError::unindexable(token.as_str(), json_type(other))),
        };
    }
    Ok(current)
}

/// Parses an array-index token. Digits only: `+3`, `-5`, and
/// whitespace are rejected, matching the invariant that valid index
/// tokens are the decimal string forms of `0..len-1`.
fn parse_index(token: &str) -> Result<usize, PointerError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PointerError::invalid_index(token));
    }
    token
        .parse::<usize>()
        .map_err(|_| PointerError::invalid_index(token))
}

fn placeholder(final_token: bool) -> Value {
    if final_token {
        Value::Null
    } else {
        Value::Object(Map::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::PointerError;
    use crate::navigator::{resolve, resolve_mut};
    use serde_json::{Value, json};

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Value {
        json!({
            "foo": 1,
            "bar": { "baz": 2 },
            "qux": [3, 4, 5]
        })
    }

    #[test]
    fn test_resolve_with_no_tokens_returns_root() {
        let doc = sample();
        let resolved = resolve(&doc, &[]).unwrap();
        assert_eq!(resolved, &doc);
    }

    #[test]
    fn test_resolve_nested_object_and_array() {
        let doc = sample();
        assert_eq!(resolve(&doc, &tokens(&["foo"])).unwrap(), &json!(1));
        assert_eq!(resolve(&doc, &tokens(&["bar", "baz"])).unwrap(), &json!(2));
        assert_eq!(resolve(&doc, &tokens(&["qux", "1"])).unwrap(), &json!(4));
    }

    #[test]
    fn test_resolve_missing_key() {
        let doc = sample();
        match resolve(&doc, &tokens(&["quo"])) {
            Err(PointerError::MissingKey(key)) => assert_eq!(key, "quo"),
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_index_out_of_bounds() {
        let doc = sample();
        match resolve(&doc, &tokens(&["qux", "10"])) {
            Err(PointerError::IndexOutOfBounds { index, len }) => {
                assert_eq!(index, 10);
                assert_eq!(len, 3);
            }
            other => panic!("Expected IndexOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_non_numeric_index() {
        let doc = sample();
        for bad in ["first", "+1", " 1", "1 ", "-5"] {
            let result = resolve(&doc, &tokens(&["qux", bad]));
            assert!(
                matches!(result, Err(PointerError::InvalidIndex(_))),
                "token {:?} should be an invalid index",
                bad
            );
        }
    }

    #[test]
    fn test_resolve_accepts_leading_zero_index() {
        let doc = sample();
        assert_eq!(resolve(&doc, &tokens(&["qux", "02"])).unwrap(), &json!(5));
    }

    #[test]
    fn test_resolve_rejects_append_token_on_read() {
        let doc = sample();
        let result = resolve(&doc, &tokens(&["qux", "-"]));
        assert!(matches!(result, Err(PointerError::InvalidIndex(_))));
        // The read path must leave the array untouched.
        assert_eq!(doc["qux"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_resolve_cannot_descend_into_scalar() {
        let doc = sample();
        match resolve(&doc, &tokens(&["foo", "deeper"])) {
            Err(PointerError::Unindexable { token, found }) => {
                assert_eq!(token, "deeper");
                assert_eq!(found, "number");
            }
            other => panic!("Expected Unindexable, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_empty_token_is_object_key_lookup() {
        let doc = json!({ "": 0, "foo": 1 });
        assert_eq!(resolve(&doc, &tokens(&[""])).unwrap(), &json!(0));
    }

    #[test]
    fn test_resolve_empty_token_passes_through_array() {
        let doc = json!([3, 4, 5]);
        assert_eq!(resolve(&doc, &tokens(&["", "1"])).unwrap(), &json!(4));
    }

    #[test]
    fn test_resolve_mut_existing_slot() {
        let mut doc = sample();
        let slot = resolve_mut(&mut doc, &tokens(&["bar", "baz"])).unwrap();
        *slot = json!(20);
        assert_eq!(doc["bar"]["baz"], json!(20));
    }

    #[test]
    fn test_resolve_mut_autocreates_missing_leaf_as_null() {
        let mut doc = json!({});
        let slot = resolve_mut(&mut doc, &tokens(&["a"])).unwrap();
        assert_eq!(slot, &Value::Null);
        *slot = json!(1);
        assert_eq!(doc, json!({ "a": 1 }));
    }

    #[test]
    fn test_resolve_mut_autocreates_intermediates_as_objects() {
        let mut doc = json!({});
        let slot = resolve_mut(&mut doc, &tokens(&["a", "b", "c"])).unwrap();
        *slot = json!(true);
        assert_eq!(doc, json!({ "a": { "b": { "c": true } } }));
        assert!(doc["a"].is_object());
        assert!(doc["a"]["b"].is_object());
    }

    #[test]
    fn test_resolve_mut_append_grows_array_by_one() {
        let mut doc = sample();
        let slot = resolve_mut(&mut doc, &tokens(&["qux", "-"])).unwrap();
        *slot = json!(6);
        assert_eq!(doc["qux"], json!([3, 4, 5, 6]));
    }

    #[test]
    fn test_resolve_mut_intermediate_append_creates_object_element() {
        let mut doc = json!({ "arr": [] });
        let slot = resolve_mut(&mut doc, &tokens(&["arr", "-", "name"])).unwrap();
        *slot = json!("first");
        assert_eq!(doc, json!({ "arr": [{ "name": "first" }] }));
    }

    #[test]
    fn test_resolve_mut_does_not_grow_array_for_numeric_index() {
        let mut doc = sample();
        let result = resolve_mut(&mut doc, &tokens(&["qux", "3"]));
        assert!(matches!(
            result,
            Err(PointerError::IndexOutOfBounds { index: 3, len: 3 })
        ));
        assert_eq!(doc["qux"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_resolve_mut_cannot_rewrite_existing_scalar() {
        let mut doc = sample();
        let result = resolve_mut(&mut doc, &tokens(&["foo", "deeper"]));
        assert!(matches!(result, Err(PointerError::Unindexable { .. })));
        // The existing scalar survives the failed traversal.
        assert_eq!(doc["foo"], json!(1));
    }

    #[test]
    fn test_resolve_mut_with_no_tokens_returns_root_slot() {
        let mut doc = sample();
        let slot = resolve_mut(&mut doc, &[]).unwrap();
        *slot = json!("replaced");
        assert_eq!(doc, json!("replaced"));
    }
}
