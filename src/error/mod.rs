//! Error types.
//!
//! Two disjoint kinds of error exist:
//! - [`ValidationError`]s describe how the instance violates the schema. They
//!   are collected into a [`ValidationResult`](crate::ValidationResult).
//! - [`SchemaError`]s describe why the schema cannot be evaluated. They are
//!   propagated as `Err` and abort validation.

mod reason;
mod schema_error;
mod validation_error;

pub use reason::{
    Applicators, Formatting, ItemCount, Meta, MultipleCheck, PatternCheck, PropertiesLength,
    PropertyInclusion, StringLength, TypeCheck, Uniqueness, ValidationErrorReason, ValueBounds,
};
pub use schema_error::SchemaError;
pub use validation_error::{ValidationError, ValidationErrors};
