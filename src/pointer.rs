use crate::error::PointerError;
use crate::navigator;
use crate::{ENCODED_PERCENT, ENCODED_SLASH, ENCODED_TILDE, PATH_SEPARATOR, PERCENT, TILDE};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A parsed RFC 6901 JSON pointer: an ordered sequence of decoded
/// reference tokens.
///
/// The empty pointer (`""`) carries zero tokens and denotes the
/// document root. Each token is stored fully decoded: percent
/// sequences and the `~1`/`~0` escapes are resolved during parsing,
/// exactly once, so downstream lookups compare literal keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPointer(Vec<String>);

impl JsonPointer {
    /// Returns the root pointer (zero tokens).
    pub fn root() -> Self {
        JsonPointer(Vec::new())
    }

    /// Parses a pointer string into decoded reference tokens.
    ///
    /// A pointer is either empty (the root reference) or starts with
    /// `/`; anything else is a `Syntax` error. Every `/` delimits a new
    /// token, so a trailing `/` produces a final empty-string token
    /// addressing a key literally named `""`.
    ///
    /// Each segment is decoded in a fixed order: percent-decoding
    /// first, then `~1` to `/`, then `~0` to `~`. Percent-decoded bytes
    /// that are not valid UTF-8 are a `Syntax` error.
    ///
    /// # Examples
    /// ```rust
    /// use jsonpointer::JsonPointer;
    ///
    /// let ptr = JsonPointer::parse("/a~1b/c%25d/0").unwrap();
    /// assert_eq!(ptr.tokens(), ["a/b", "c%d", "0"]);
    /// assert!(JsonPointer::parse("").unwrap().is_root());
    /// ```
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        if !pointer.starts_with(PATH_SEPARATOR) {
            return Err(PointerError::syntax(
                pointer,
                "a non-empty pointer must start with '/'",
            ));
        }
        let mut tokens = Vec::new();
        for raw in pointer[1..].split(PATH_SEPARATOR) {
            tokens.push(Self::decode_token(pointer, raw)?);
        }
        Ok(JsonPointer(tokens))
    }

    /// Decodes one raw pointer segment.
    ///
    /// Percent-decoding runs before tilde-unescaping so an escaped,
    /// percent-encoded tilde cannot be misread; `~1` runs before `~0`
    /// so `~01` decodes to the literal `~1` rather than a separator.
    fn decode_token(pointer: &str, raw: &str) -> Result<String, PointerError> {
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|e| PointerError::syntax(pointer, e.to_string()))?;
        Ok(decoded
            .replace(ENCODED_SLASH, PATH_SEPARATOR)
            .replace(ENCODED_TILDE, TILDE))
    }

    /// Appends a literal (already decoded) segment to the pointer.
    ///
    /// The segment is stored verbatim; `~`, `/`, and `%` inside it are
    /// re-escaped only when the pointer is formatted back to text.
    pub fn push(&mut self, segment: impl AsRef<str>) -> &mut Self {
        self.0.push(segment.as_ref().to_owned());
        self
    }

    /// Returns the decoded reference tokens in pointer order.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if this pointer denotes the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves this pointer against a document for reading.
    ///
    /// Never mutates the document; see [`navigator::resolve`].
    pub fn resolve<'a>(&self, document: &'a Value) -> Result<&'a Value, PointerError> {
        navigator::resolve(document, &self.0)
    }

    /// Resolves this pointer against a document for writing, creating
    /// missing intermediate nodes; see [`navigator::resolve_mut`].
    pub fn resolve_mut<'a>(&self, document: &'a mut Value) -> Result<&'a mut Value, PointerError> {
        navigator::resolve_mut(document, &self.0)
    }
}

impl Display for JsonPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for token in &self.0 {
            if token.contains(TILDE)
                || token.contains(PATH_SEPARATOR)
                || token.contains(PERCENT)
            {
                // The inverse of `decode_token`: literal percent signs
                // are encoded before the tilde escapes so parsing, which
                // percent-decodes first, recovers the token verbatim.
                let escaped = token
                    .replace(PERCENT, ENCODED_PERCENT)
                    .replace(TILDE, ENCODED_TILDE)
                    .replace(PATH_SEPARATOR, ENCODED_SLASH);
                write!(f, "{}{}", PATH_SEPARATOR, escaped)?;
            } else {
                write!(f, "{}{}", PATH_SEPARATOR, token)?;
            }
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
