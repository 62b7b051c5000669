//! Validator configuration and the top-level validation entry points.
//!
//! A [`Validator`] bundles everything a validation call reads but never
//! changes: the draft's keyword table, the format registry, the reference
//! resolver, the recursion limit and whether independent branches may run
//! in parallel. It is `Send + Sync` and can be shared between threads.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;

use crate::draft::Draft;
use crate::error::SchemaError;
use crate::format::{FormatRegistry, FormatValidator};
use crate::keywords::KeywordTable;
use crate::registry::{Resolver, SchemaRegistry};
use crate::result::ValidationResult;
use crate::validation::Context;

const DEFAULT_MAX_DEPTH: usize = 100;
const DEFAULT_PATTERN_CACHE_LIMIT: usize = 1024;

/// Validation configuration for one draft.
///
/// # Example
///
/// ```rust
/// use schemata::{Draft, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new(Draft::Draft7);
/// let schema = json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": {"age": {"minimum": 0}}
/// });
///
/// let result = validator.validate(&schema, &json!({"age": -1})).unwrap();
/// assert!(!result.is_valid());
/// assert_eq!(result.errors().unwrap().len(), 2);
/// ```
pub struct Validator {
    draft: Draft,
    keywords: KeywordTable,
    formats: FormatRegistry,
    resolver: Arc<dyn Resolver>,
    max_depth: usize,
    parallel_branches: bool,
    pattern_cache_limit: usize,
    patterns: RwLock<HashMap<String, Option<Regex>>>,
}

impl Validator {
    /// Creates a validator with the keyword table and default formats of `draft`.
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            keywords: draft.keywords(),
            formats: draft.formats(),
            resolver: Arc::new(SchemaRegistry::new()),
            max_depth: DEFAULT_MAX_DEPTH,
            parallel_branches: false,
            pattern_cache_limit: DEFAULT_PATTERN_CACHE_LIMIT,
            patterns: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a validator for the draft the schema declares in `$schema`.
    ///
    /// Schemas without `$schema` use [`Draft::default`]. An unrecognized
    /// `$schema` URI falls back to the default draft with a warning.
    pub fn for_schema(schema: &Value) -> Self {
        let draft = match Draft::detect(schema) {
            Some(draft) => draft,
            None => {
                if let Some(uri) = schema.get("$schema").and_then(Value::as_str) {
                    tracing::warn!(
                        schema_uri = uri,
                        fallback = %Draft::default(),
                        "unrecognized $schema, using default draft"
                    );
                }
                Draft::default()
            }
        };
        Self::new(draft)
    }

    /// Registers or replaces a format capability.
    pub fn with_format<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: FormatValidator + 'static,
    {
        self.formats.insert(name, validator);
        self
    }

    /// Removes a format, so schemas naming it report it as unsupported.
    pub fn without_format(mut self, name: &str) -> Self {
        self.formats.remove(name);
        self
    }

    /// Replaces the whole format registry.
    pub fn with_formats(mut self, formats: FormatRegistry) -> Self {
        self.formats = formats;
        self
    }

    /// Replaces the keyword table, e.g. to add a vocabulary keyword.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    /// Sets how documents behind non-fragment `$ref`s are found.
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the maximum nesting depth of subschema evaluation.
    ///
    /// The default is 100. Exceeding it, typically through a reference
    /// cycle, fails with `SchemaError::MaxDepthExceeded`.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Evaluates `oneOf` branches and `contains` elements in parallel.
    ///
    /// `anyOf` always runs sequentially so it can stop at the first match.
    pub fn with_parallel_branches(mut self, parallel: bool) -> Self {
        self.parallel_branches = parallel;
        self
    }

    /// Sets how many compiled `pattern` sources are kept.
    ///
    /// The default is 1024. A full cache is emptied before the next source
    /// is stored; a limit of 0 disables caching.
    pub fn with_pattern_cache_limit(mut self, limit: usize) -> Self {
        self.pattern_cache_limit = limit;
        self
    }

    /// Returns the configured draft.
    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// Returns the keyword table.
    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Returns the format registry.
    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Returns the reference resolver.
    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    /// Returns the recursion limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns whether independent branches may run in parallel.
    pub fn parallel_branches(&self) -> bool {
        self.parallel_branches
    }

    /// Returns the compiled form of `source`, or `None` if it does not compile.
    ///
    /// Compilation results, including failures, are cached per validator up
    /// to the limit set by [`with_pattern_cache_limit`](Self::with_pattern_cache_limit).
    pub fn pattern(&self, source: &str) -> Option<Regex> {
        if let Some(cached) = self.patterns.read().get(source) {
            return cached.clone();
        }

        let compiled = Regex::new(source).ok();
        if self.pattern_cache_limit == 0 {
            return compiled;
        }

        let mut patterns = self.patterns.write();
        if patterns.len() >= self.pattern_cache_limit {
            tracing::debug!(limit = self.pattern_cache_limit, "pattern cache full, clearing");
            patterns.clear();
        }
        patterns.insert(source.to_string(), compiled.clone());
        compiled
    }

    /// Validates `instance` against `schema`.
    ///
    /// Every violation is collected into the returned result. `Err` means
    /// the schema itself is unusable: a subschema that is neither an object
    /// nor a boolean, an unresolvable `$ref`, an uncompilable member
    /// pattern, or nesting past the depth limit.
    #[tracing::instrument(skip_all, fields(draft = %self.draft))]
    pub fn validate(&self, schema: &Value, instance: &Value) -> Result<ValidationResult, SchemaError> {
        tracing::debug!("validating instance");

        let root = Arc::new(schema.clone());
        let result = Context::new(self, Arc::clone(&root)).evaluate(instance, &root)?;

        tracing::debug!(
            valid = result.is_valid(),
            errors = result.errors().map_or(0, |errors| errors.len()),
            "validation finished"
        );
        Ok(result)
    }

    /// Returns whether `instance` satisfies `schema`.
    pub fn is_valid(&self, schema: &Value, instance: &Value) -> Result<bool, SchemaError> {
        Ok(self.validate(schema, instance)?.is_valid())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Draft::default())
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("draft", &self.draft)
            .field("keywords", &self.keywords)
            .field("formats", &self.formats)
            .field("max_depth", &self.max_depth)
            .field("parallel_branches", &self.parallel_branches)
            .field("pattern_cache_limit", &self.pattern_cache_limit)
            .finish_non_exhaustive()
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Validator>();
};

/// Validates `instance` against `schema` using the draft the schema declares.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
///
/// let schema = json!({"$schema": "http://json-schema.org/draft-04/schema#", "minimum": 5, "exclusiveMinimum": true});
/// assert!(!schemata::validate(&schema, &json!(5)).unwrap().is_valid());
/// assert!(schemata::validate(&schema, &json!(6)).unwrap().is_valid());
/// ```
pub fn validate(schema: &Value, instance: &Value) -> Result<ValidationResult, SchemaError> {
    Validator::for_schema(schema).validate(schema, instance)
}
