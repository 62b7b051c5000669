//! The closed taxonomy of validation error reasons.
//!
//! Every reason is grouped into a category enum; [`ValidationErrorReason`]
//! wraps the categories transparently so its `Display` output is the
//! category's message.

use serde_json::Value;

use crate::value::Number;

/// Why an instance failed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationErrorReason {
    #[error(transparent)]
    StringLength(#[from] StringLength),
    #[error(transparent)]
    ItemCount(#[from] ItemCount),
    #[error(transparent)]
    NumericValue(#[from] ValueBounds),
    #[error(transparent)]
    PropertiesLength(#[from] PropertiesLength),
    #[error(transparent)]
    MultipleOf(#[from] MultipleCheck),
    #[error(transparent)]
    Pattern(#[from] PatternCheck),
    #[error(transparent)]
    PropertyInclusion(#[from] PropertyInclusion),
    #[error(transparent)]
    Uniqueness(#[from] Uniqueness),
    #[error(transparent)]
    TypeCheck(#[from] TypeCheck),
    #[error(transparent)]
    Applicators(#[from] Applicators),
    #[error(transparent)]
    Formatting(#[from] Formatting),
    #[error(transparent)]
    Meta(#[from] Meta),
}

/// `minLength` / `maxLength` violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StringLength {
    #[error("Length of string is larger than max length {max}")]
    TooManyCharacters { max: u64 },
    #[error("Length of string is smaller than minimum length {min}")]
    TooFewCharacters { min: u64 },
}

/// `minItems` / `maxItems` violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemCount {
    #[error("Length of array is greater than maximum {max}")]
    TooManyItems { max: u64 },
    #[error("Length of array is smaller than the minimum {min}")]
    TooFewItems { min: u64 },
}

/// Numeric bound violations.
///
/// `exclusive` records whether the strict comparison was applied, either
/// through the standalone `exclusiveMinimum`/`exclusiveMaximum` keywords or
/// through their legacy boolean form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueBounds {
    #[error("Value is lower than {} value of {min}", bound_name(.exclusive, "minimum"))]
    TooLow { min: Number, exclusive: bool },
    #[error("Value exceeds {} value of {max}", bound_name(.exclusive, "maximum"))]
    TooHigh { max: Number, exclusive: bool },
}

fn bound_name(exclusive: &bool, bound: &str) -> String {
    if *exclusive {
        format!("exclusive {}", bound)
    } else {
        bound.to_string()
    }
}

/// `minProperties` / `maxProperties` violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertiesLength {
    #[error("Amount of properties is less than the required amount of {min}")]
    TooFew { min: u64 },
    #[error("Amount of properties is greater than maximum permitted of {max}")]
    TooMany { max: u64 },
}

/// `multipleOf` violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MultipleCheck {
    #[error("{instance} is not a multiple of {multiple_of}")]
    NotMultiple { instance: Number, multiple_of: Number },
}

/// `pattern` violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternCheck {
    #[error("'{instance}' does not match pattern: '{pattern}'")]
    Mismatch { instance: String, pattern: String },
}

/// `required` violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyInclusion {
    #[error("Required property '{key}' is missing")]
    PropertyMissing { key: String },
}

/// `uniqueItems` violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Uniqueness {
    #[error("{collection} does not have unique items")]
    UniqueItemsNotIncluded { collection: Value },
}

/// `type` violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeCheck {
    #[error("{instance} is not of type '{}'", .expected.join("', '"))]
    InvalidType { instance: Value, expected: Vec<String> },
}

/// Violations reported by applicator and equality keywords.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Applicators {
    #[error("Additional results are not permitted in this array.")]
    AdditionalItemsNotPermitted,
    #[error("{instance} does not meet anyOf validation rules.")]
    AnyOfNotMet { instance: Value },
    #[error("'{instance}' does not match contains")]
    ContainsNotMet { instance: Value },
    #[error("{instance} does not match contains + maxContains {max}")]
    MaxContainsNotMet { instance: Value, max: u64 },
    #[error("'{key}' is a dependency for '{property}'")]
    MissingDependency { key: String, property: String },
    #[error("Only one value from `oneOf` ({one_of}) should be met ({instance})")]
    OneOfNotMet { one_of: Value, instance: Value },
    #[error("'{instance}' does not match 'not' validation.")]
    NotNotMet { instance: Value },
    #[error("'{instance}' is not a valid enumeration value of '{enum_values}'")]
    EnumNotMet { instance: Value, enum_values: Value },
    #[error("'{instance}' is not equal to const '{const_value}'")]
    ConstNotMet { instance: Value, const_value: Value },
}

/// `format` violations, including a bad `pattern` regex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Formatting {
    #[error("'format' validation of '{format}' is not yet supported.")]
    Unsupported { format: String },
    #[error("'{instance}' is an invalid IPv4 address")]
    InvalidIpv4Address { instance: String },
    #[error("'{instance}' is an invalid IPv6 address")]
    InvalidIpv6Address { instance: String },
    #[error("'{instance}' is an invalid URI")]
    InvalidUri { instance: String },
    #[error("'{instance}' is an invalid regex")]
    InvalidRegex { instance: String },
    #[error("'{instance}' is an invalid UUID")]
    InvalidUuid { instance: String },
    #[error("'{instance}' is an invalid JSON Pointer")]
    InvalidJsonPointer { instance: String },
    #[error("'{instance}' is an invalid RFC 3339 formatted date-time")]
    Rfc3339DateTime { instance: String },
    #[error("'{instance}' is an invalid RFC 3339 formatted time")]
    Rfc3339Time { instance: String },
    #[error("'{instance}' is an invalid RFC 3339 formatted date")]
    Rfc3339Date { instance: String },
    #[error("'{instance}' is an invalid duration")]
    Duration { instance: String },
    /// Raised by user-registered format capabilities.
    #[error("'{instance}' is an invalid {format}")]
    Custom { format: String, instance: String },
}

/// Violations that are about the schema shape rather than a keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Meta {
    #[error("Falsy schema")]
    FalsySchema,
}
