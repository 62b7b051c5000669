//! JSON Pointer representation for locating values in instances and schemas.
//!
//! This module provides [`JsonPointer`], an RFC 6901 pointer built from string
//! reference tokens. The same type is used for both the *instance location*
//! (where in the validated data an error occurred) and the *keyword location*
//! (which keyword of the schema produced it).

use std::fmt::{self, Display};

/// Errors produced while parsing the textual form of a pointer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointerError {
    /// A non-empty pointer did not start with `/` (or `#/`).
    #[error("JSON pointer '{0}' must be empty or start with '/'")]
    MissingLeadingSlash(String),

    /// A `~` was not followed by `0` or `1`.
    #[error("JSON pointer '{0}' contains an invalid '~' escape")]
    InvalidEscape(String),
}

/// A path to a value inside a JSON document.
///
/// `JsonPointer` is immutable: [`push`](Self::push) and
/// [`push_index`](Self::push_index) return a new pointer and leave the
/// original untouched, so a pointer can be threaded through recursive
/// evaluation without any push/pop bookkeeping.
///
/// # Example
///
/// ```rust
/// use schemata::JsonPointer;
///
/// let pointer = JsonPointer::root()
///     .push("users")
///     .push_index(0)
///     .push("a/b");
///
/// assert_eq!(pointer.to_string(), "/users/0/a~1b");
/// assert_eq!(pointer.to_uri_fragment(), "#/users/0/a~1b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Creates an empty pointer referring to the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses the textual form of a pointer.
    ///
    /// Both the plain form (`/a/0`) and the URI fragment form (`#/a/0`) are
    /// accepted. Percent-encoding in the fragment form is not decoded.
    pub fn parse(input: &str) -> Result<Self, PointerError> {
        let body = input.strip_prefix('#').unwrap_or(input);
        if body.is_empty() {
            return Ok(Self::root());
        }

        let rest = body
            .strip_prefix('/')
            .ok_or_else(|| PointerError::MissingLeadingSlash(input.to_string()))?;

        let tokens = rest
            .split('/')
            .map(|token| unescape(token).ok_or_else(|| PointerError::InvalidEscape(input.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tokens })
    }

    /// Returns a new pointer with a reference token appended.
    ///
    /// This method does not modify the original pointer; it returns a new one.
    pub fn push(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Self { tokens }
    }

    /// Returns a new pointer with an array index appended.
    ///
    /// This method does not modify the original pointer; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(index.to_string())
    }

    /// Returns the parent pointer, or `None` if this is the root.
    pub fn pop(&self) -> Option<Self> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(Self {
                tokens: self.tokens[..self.tokens.len() - 1].to_vec(),
            })
        }
    }

    /// Returns true if this is the root pointer (no tokens).
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of reference tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if this pointer has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns an iterator over the unescaped reference tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the last token, or `None` if this is the root.
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Renders the pointer as a URI fragment (`#` followed by the pointer).
    pub fn to_uri_fragment(&self) -> String {
        format!("#{}", self)
    }
}

impl Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", token.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Checks that every `~` in `value` starts a `~0` or `~1` escape.
pub(crate) fn has_valid_escapes(value: &str) -> bool {
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '~' && !matches!(chars.next(), Some('0') | Some('1')) {
            return false;
        }
    }
    true
}

fn unescape(token: &str) -> Option<String> {
    if !has_valid_escapes(token) {
        return None;
    }
    Some(token.replace("~1", "/").replace("~0", "~"))
}
