use std::fmt::{Display, Formatter};

/// Error types that can occur while parsing a JSON pointer or resolving
/// it against a document.
///
/// The variants fall into three categories: malformed pointer text
/// (`Syntax`), a path that does not lead to a node (`MissingKey`,
/// `InvalidIndex`, `IndexOutOfBounds`, `Unindexable`), and a value that
/// cannot cross the tree boundary in either direction (`Conversion`).
#[derive(Debug)]
pub enum PointerError {
    /// The pointer text itself is malformed: a non-empty pointer that
    /// does not start with `/`, or a percent-encoded segment that does
    /// not decode to valid UTF-8.
    Syntax { pointer: String, reason: String },

    /// An object along the path has no member with the given key.
    MissingKey(String),

    /// A token used against an array is not a non-negative base-10
    /// integer (this includes `-` on the read path).
    InvalidIndex(String),

    /// A numeric token is past the end of the array it indexes.
    IndexOutOfBounds { index: usize, len: usize },

    /// Traversal reached a scalar leaf with tokens still remaining.
    Unindexable { token: String, found: &'static str },

    /// A value could not be converted into the tree model, or a
    /// resolved node could not be converted into the requested type.
    Conversion(String),
}

impl PointerError {
    /// Creates a new `Syntax` error.
    #[inline]
    pub(crate) fn syntax(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Syntax {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `MissingKey` error.
    #[inline]
    pub(crate) fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey(key.into())
    }

    /// Creates a new `InvalidIndex` error.
    #[inline]
    pub(crate) fn invalid_index(token: impl Into<String>) -> Self {
        Self::InvalidIndex(token.into())
    }

    /// Creates a new `IndexOutOfBounds` error.
    #[inline]
    pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Creates a new `Unindexable` error.
    #[inline]
    pub(crate) fn unindexable(token: impl Into<String>, found: &'static str) -> Self {
        Self::Unindexable {
            token: token.into(),
            found,
        }
    }

    /// Creates a new `Conversion` error.
    #[inline]
    pub(crate) fn conversion(reason: impl Into<String>) -> Self {
        Self::Conversion(reason.into())
    }

    /// Returns `true` for the resolution-failure family: the pointer is
    /// well formed but does not lead to a node in this document.
    ///
    /// `Syntax` and `Conversion` are not part of this family; the first
    /// is a caller programming error and the second a type mismatch.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PointerError::MissingKey(_)
                | PointerError::InvalidIndex(_)
                | PointerError::IndexOutOfBounds { .. }
                | PointerError::Unindexable { .. }
        )
    }
}

impl Display for PointerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerError::Syntax { pointer, reason } => {
                write!(f, "Malformed pointer '{}': {}", pointer, reason)
            }
            PointerError::MissingKey(key) => {
                write!(f, "Missing key: {}", key)
            }
            PointerError::InvalidIndex(token) => {
                write!(f, "Invalid array index: {}", token)
            }
            PointerError::IndexOutOfBounds { index, len } => {
                write!(
                    f,
                    "Index {} out of bounds for array of length {}",
                    index, len
                )
            }
            PointerError::Unindexable { token, found } => {
                write!(f, "Cannot dereference '{}' on a {} value", token, found)
            }
            PointerError::Conversion(reason) => {
                write!(f, "Conversion failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for PointerError {}

impl From<serde_json::Error> for PointerError {
    fn from(err: serde_json::Error) -> Self {
        PointerError::conversion(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::PointerError;

    #[test]
    fn test_not_found_family_membership() {
        assert!(PointerError::missing_key("foo").is_not_found());
        assert!(PointerError::invalid_index("-").is_not_found());
        assert!(PointerError::index_out_of_bounds(4, 3).is_not_found());
        assert!(PointerError::unindexable("bar", "number").is_not_found());
        assert!(!PointerError::syntax("foo", "missing leading '/'").is_not_found());
        assert!(!PointerError::conversion("expected bool").is_not_found());
    }

    #[test]
    fn test_display_messages() {
        let err = PointerError::index_out_of_bounds(10, 2);
        assert_eq!(
            err.to_string(),
            "Index 10 out of bounds for array of length 2"
        );
        let err = PointerError::unindexable("baz", "string");
        assert_eq!(
            err.to_string(),
            "Cannot dereference 'baz' on a string value"
        );
    }
}
