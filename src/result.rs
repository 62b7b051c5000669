//! The outcome of a validation call and its wire encoding.
//!
//! [`ValidationResult`] serializes to
//! `{"valid": bool, "errors"?: [{"error", "instanceLocation", "keywordLocation"}]}`
//! with `errors` present only when the instance is invalid.
//! [`ValidationOutput`] is the decodable mirror of that shape.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{ValidationError, ValidationErrors};

/// Either `Valid`, or `Invalid` with at least one error.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationErrors),
}

impl ValidationResult {
    /// Builds a result from a possibly empty list of errors.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        match ValidationErrors::from_vec(errors) {
            Some(errors) => ValidationResult::Invalid(errors),
            None => ValidationResult::Valid,
        }
    }

    /// Builds an invalid result holding one error.
    pub fn invalid(error: ValidationError) -> Self {
        ValidationResult::Invalid(ValidationErrors::single(error))
    }

    /// Returns true when no error was produced.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Returns the errors of an invalid result.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }

    /// Consumes the result, returning its errors (empty when valid).
    pub fn into_errors(self) -> Vec<ValidationError> {
        match self {
            ValidationResult::Valid => Vec::new(),
            ValidationResult::Invalid(errors) => errors.into_vec(),
        }
    }

    /// Merges two results, keeping error order.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (ValidationResult::Valid, other) => other,
            (this, ValidationResult::Valid) => this,
            (ValidationResult::Invalid(a), ValidationResult::Invalid(b)) => {
                ValidationResult::Invalid(a.combine(b))
            }
        }
    }

    /// Converts into a stillwater `Validation` for applicative composition.
    pub fn into_validation(self) -> Validation<(), ValidationErrors> {
        match self {
            ValidationResult::Valid => Validation::Success(()),
            ValidationResult::Invalid(errors) => Validation::Failure(errors),
        }
    }

    /// Produces the decoded form of the wire encoding.
    pub fn to_output(&self) -> ValidationOutput {
        ValidationOutput {
            valid: self.is_valid(),
            errors: self
                .errors()
                .map(|errors| errors.iter().map(OutputError::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationResult::Valid => {
                let mut state = serializer.serialize_struct("ValidationResult", 1)?;
                state.serialize_field("valid", &true)?;
                state.end()
            }
            ValidationResult::Invalid(errors) => {
                let mut state = serializer.serialize_struct("ValidationResult", 2)?;
                state.serialize_field("valid", &false)?;
                state.serialize_field("errors", errors)?;
                state.end()
            }
        }
    }
}

/// Decoded form of a serialized [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutput {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<OutputError>,
}

/// One entry of the `errors` list on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputError {
    pub error: String,
    pub instance_location: String,
    pub keyword_location: String,
}

impl From<&ValidationError> for OutputError {
    fn from(error: &ValidationError) -> Self {
        Self {
            error: error.reason.to_string(),
            instance_location: error.instance_location.to_string(),
            keyword_location: error.keyword_location.to_uri_fragment(),
        }
    }
}
