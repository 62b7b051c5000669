//! Schema-usability failures.
//!
//! A [`SchemaError`] means the schema itself cannot be evaluated. It is never
//! folded into a validation result; it aborts the enclosing evaluation and is
//! returned to the caller as `Err`.

/// Failures that make a schema unusable for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A value in schema position is neither an object nor a boolean.
    #[error("value at '{keyword_location}' is not a valid schema: expected object or boolean, found {found}")]
    InvalidSchema {
        keyword_location: String,
        found: &'static str,
    },

    /// A `$ref` could not be resolved to a schema.
    #[error("unresolvable reference '{reference}' at '{keyword_location}'")]
    UnresolvableReference {
        reference: String,
        keyword_location: String,
    },

    /// A `patternProperties` or `additionalProperties` pattern does not compile.
    #[error("invalid regular expression '{pattern}' at '{keyword_location}'")]
    InvalidPattern {
        pattern: String,
        keyword_location: String,
    },

    /// Evaluation nested deeper than the configured limit, usually because of
    /// a reference cycle.
    #[error("maximum evaluation depth of {max_depth} exceeded at '{keyword_location}'")]
    MaxDepthExceeded {
        max_depth: usize,
        keyword_location: String,
    },
}
