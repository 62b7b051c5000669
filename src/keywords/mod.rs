//! Keyword validators and the per-draft keyword table.
//!
//! Every keyword is a plain function with the [`KeywordFn`] signature. A
//! keyword receives the context (already pointing at the keyword), the
//! keyword's value, the instance and the enclosing schema object so it can
//! read sibling keywords such as `exclusiveMinimum` or `additionalItems`.
//!
//! Keywords whose constraint only concerns one instance type return no
//! errors for instances of any other type.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{SchemaError, ValidationError};
use crate::validation::Context;

pub mod array;
pub mod combinators;
pub mod equality;
pub mod numeric;
pub mod object;
pub mod reference;
pub mod string;
pub mod type_check;

/// Errors collected by one keyword, or a fatal schema failure.
pub type KeywordResult = Result<Vec<ValidationError>, SchemaError>;

/// Signature shared by every keyword validator.
pub type KeywordFn = fn(&Context<'_>, &Value, &Value, &Map<String, Value>) -> KeywordResult;

/// An ordered mapping from keyword names to validators.
///
/// Keywords run in table order, which keeps error order deterministic
/// regardless of how the schema object stores its members.
///
/// # Example
///
/// ```rust
/// use schemata::keywords::KeywordResult;
/// use schemata::{Context, Draft};
/// use serde_json::{Map, Value};
///
/// fn always_ok(_: &Context<'_>, _: &Value, _: &Value, _: &Map<String, Value>) -> KeywordResult {
///     Ok(Vec::new())
/// }
///
/// let table = Draft::Draft7.keywords().with("x-custom", always_ok);
/// assert!(table.contains("x-custom"));
/// assert!(table.contains("if"));
/// ```
#[derive(Clone, Default)]
pub struct KeywordTable {
    keywords: IndexMap<&'static str, KeywordFn>,
    ref_overrides_siblings: bool,
}

impl KeywordTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a keyword.
    pub fn with(mut self, name: &'static str, keyword: KeywordFn) -> Self {
        self.keywords.insert(name, keyword);
        self
    }

    /// Removes a keyword.
    pub fn without(mut self, name: &str) -> Self {
        self.keywords.shift_remove(name);
        self
    }

    /// Makes a `$ref` suppress every sibling keyword of its schema object.
    pub fn with_ref_overriding_siblings(mut self, overrides: bool) -> Self {
        self.ref_overrides_siblings = overrides;
        self
    }

    /// Returns whether `$ref` suppresses its siblings.
    pub fn ref_overrides_siblings(&self) -> bool {
        self.ref_overrides_siblings
    }

    /// Looks up a keyword by name.
    pub fn get(&self, name: &str) -> Option<KeywordFn> {
        self.keywords.get(name).copied()
    }

    /// Returns true if the table knows `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.keywords.contains_key(name)
    }

    /// Returns the keyword names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keywords.keys().copied()
    }

    /// Returns the number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Returns true if the table has no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Yields the keywords present in `schema`, with their values, in table order.
    pub(crate) fn applicable<'s>(
        &'s self,
        schema: &'s Map<String, Value>,
    ) -> impl Iterator<Item = (&'static str, KeywordFn, &'s Value)> + 's {
        let ref_only = self.ref_overrides_siblings
            && schema.contains_key("$ref")
            && self.keywords.contains_key("$ref");

        self.keywords
            .iter()
            .filter(move |(name, _)| !ref_only || **name == "$ref")
            .filter_map(move |(name, keyword)| schema.get(*name).map(|value| (*name, *keyword, value)))
    }
}

impl std::fmt::Debug for KeywordTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordTable")
            .field("keywords", &self.keywords.keys().collect::<Vec<_>>())
            .field("ref_overrides_siblings", &self.ref_overrides_siblings)
            .finish()
    }
}

/// Runs `evaluate` over `items`, in parallel when the validator allows it.
///
/// Results keep the order of `items`; the first fatal error is returned.
pub(crate) fn map_branches<T, R, F>(ctx: &Context<'_>, items: &[T], evaluate: F) -> Result<Vec<R>, SchemaError>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> Result<R, SchemaError> + Sync + Send,
{
    if ctx.validator().parallel_branches() && items.len() > 1 {
        use rayon::prelude::*;
        items
            .par_iter()
            .enumerate()
            .map(|(index, item)| evaluate(index, item))
            .collect()
    } else {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| evaluate(index, item))
            .collect()
    }
}
