//! Validation error records.
//!
//! This module provides [`ValidationError`] for a single violation and
//! [`ValidationErrors`] for a non-empty, ordered collection of them.

use std::fmt::{self, Display};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use stillwater::prelude::*;

use crate::error::ValidationErrorReason;
use crate::path::JsonPointer;

/// A single schema violation with both locations.
///
/// - **reason**: which rule failed and the offending data
/// - **instance_location**: where in the instance the violation was found
/// - **keyword_location**: which keyword of the schema produced it
///
/// Errors are created once by the keyword that detects the violation and
/// never mutated afterwards.
///
/// # Example
///
/// ```rust
/// use schemata::{JsonPointer, ValidationError};
/// use schemata::error::Meta;
///
/// let error = ValidationError::new(
///     Meta::FalsySchema,
///     JsonPointer::root().push("test").push_index(1),
///     JsonPointer::root().push("example"),
/// );
///
/// assert_eq!(error.to_string(), "/test/1: Falsy schema");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The rule that was violated.
    pub reason: ValidationErrorReason,
    /// Pointer into the instance.
    pub instance_location: JsonPointer,
    /// Pointer into the schema.
    pub keyword_location: JsonPointer,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(
        reason: impl Into<ValidationErrorReason>,
        instance_location: JsonPointer,
        keyword_location: JsonPointer,
    ) -> Self {
        Self {
            reason: reason.into(),
            instance_location,
            keyword_location,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_location.is_root() {
            write!(f, "(root): {}", self.reason)
        } else {
            write!(f, "{}: {}", self.instance_location, self.reason)
        }
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 3)?;
        state.serialize_field("error", &self.reason.to_string())?;
        state.serialize_field("instanceLocation", &self.instance_location.to_string())?;
        state.serialize_field("keywordLocation", &self.keyword_location.to_uri_fragment())?;
        state.end()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty collection of validation errors in production order.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>` so that an
/// invalid result always carries at least one error. It implements
/// `Semigroup`, allowing errors from independent validations to be combined:
///
/// ```rust
/// use schemata::{JsonPointer, ValidationError, ValidationErrors};
/// use schemata::error::Meta;
/// use stillwater::prelude::*;
///
/// let error = ValidationError::new(Meta::FalsySchema, JsonPointer::root(), JsonPointer::root());
/// let combined = ValidationErrors::single(error.clone())
///     .combine(ValidationErrors::single(error));
///
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors in production order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns all errors found at the given instance location.
    pub fn at_instance(&self, location: &JsonPointer) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| &e.instance_location == location)
            .collect()
    }

    /// Returns all errors produced by the given keyword location.
    pub fn at_keyword(&self, location: &JsonPointer) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| &e.keyword_location == location)
            .collect()
    }

    /// Converts the collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Meta, PropertyInclusion};
    use serde_json::json;

    fn missing(key: &str) -> ValidationError {
        ValidationError::new(
            PropertyInclusion::PropertyMissing {
                key: key.to_string(),
            },
            JsonPointer::root(),
            JsonPointer::root().push("required"),
        )
    }

    #[test]
    fn test_error_creation() {
        let error = missing("name");
        assert!(error.instance_location.is_root());
        assert_eq!(error.keyword_location.to_string(), "/required");
        assert_eq!(error.reason.to_string(), "Required property 'name' is missing");
    }

    #[test]
    fn test_error_display_root() {
        assert_eq!(
            missing("id").to_string(),
            "(root): Required property 'id' is missing"
        );
    }

    #[test]
    fn test_error_serializes_to_wire_form() {
        let error = ValidationError::new(
            Meta::FalsySchema,
            JsonPointer::parse("/test/1").unwrap(),
            JsonPointer::parse("#/example").unwrap(),
        );

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "error": "Falsy schema",
                "instanceLocation": "/test/1",
                "keywordLocation": "#/example",
            })
        );
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
        let errors = ValidationErrors::from_vec(vec![missing("a"), missing("b")]).unwrap();
        assert_eq!(errors.len(), 2);
        assert!(!errors.is_empty());
        assert_eq!(errors.first(), &missing("a"));
    }

    #[test]
    fn test_combine_preserves_order() {
        let combined = ValidationErrors::single(missing("a"))
            .combine(ValidationErrors::single(missing("b")))
            .combine(ValidationErrors::single(missing("c")));

        let keys: Vec<String> = combined.iter().map(|e| e.reason.to_string()).collect();
        assert_eq!(keys.len(), 3);
        assert!(keys[0].contains("'a'"));
        assert!(keys[2].contains("'c'"));
    }

    #[test]
    fn test_location_filters() {
        let nested = ValidationError::new(
            Meta::FalsySchema,
            JsonPointer::root().push("x"),
            JsonPointer::root().push("properties").push("x"),
        );
        let errors = ValidationErrors::single(missing("a")).combine(ValidationErrors::single(nested));

        assert_eq!(errors.at_instance(&JsonPointer::root()).len(), 1);
        assert_eq!(errors.at_instance(&JsonPointer::root().push("x")).len(), 1);
        assert_eq!(
            errors
                .at_keyword(&JsonPointer::root().push("required"))
                .len(),
            1
        );
    }

    #[test]
    fn test_errors_display() {
        let errors = ValidationErrors::single(missing("name"));
        let display = errors.to_string();
        assert!(display.contains("1 error(s)"));
        assert!(display.contains("Required property 'name' is missing"));
    }
}
