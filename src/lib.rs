//! # Schemata
//!
//! A JSON Schema keyword evaluation engine that reports ALL violations of an
//! instance, each with the location in the instance and the keyword in the
//! schema that produced it.
//!
//! ## Overview
//!
//! Schemas and instances are plain [`serde_json::Value`]s. A [`Validator`]
//! holds the keyword table of one draft (4, 6, 7, 2019-09 or 2020-12), the
//! format registry and the reference resolver. Evaluation descends through
//! the schema with a location-tracking [`Context`], collecting every
//! [`ValidationError`] instead of stopping at the first one. A schema that
//! cannot be evaluated at all is reported separately as a [`SchemaError`].
//!
//! ## Core Types
//!
//! - [`JsonPointer`]: Locations inside instances and schemas (`/users/0/email`)
//! - [`ValidationError`]: A single violation with its reason and both locations
//! - [`ValidationErrors`]: A non-empty collection of violations
//! - [`ValidationResult`]: `Valid` or `Invalid(ValidationErrors)`, serializable
//!   to the `{valid, errors}` output format
//! - [`Validator`]: Per-draft configuration and the entry point
//!
//! ## Example
//!
//! ```rust
//! use schemata::{Draft, Validator};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string", "minLength": 1},
//!         "tags": {"type": "array", "uniqueItems": true}
//!     }
//! });
//!
//! let validator = Validator::new(Draft::Draft202012);
//! let result = validator
//!     .validate(&schema, &json!({"name": "", "tags": [1, 1.0]}))
//!     .unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&result).unwrap()["errors"][0]["keywordLocation"],
//!     json!("#/properties/name/minLength")
//! );
//! assert_eq!(result.errors().unwrap().len(), 2);
//! ```

pub mod draft;
pub mod error;
pub mod format;
pub mod keywords;
pub mod path;
pub mod registry;
pub mod result;
pub mod validation;
pub mod validator;
pub mod value;

pub use draft::Draft;
pub use error::{SchemaError, ValidationError, ValidationErrorReason, ValidationErrors};
pub use format::{FormatRegistry, FormatValidator};
pub use path::{JsonPointer, PointerError};
pub use registry::{RegistryError, Resolver, SchemaRegistry};
pub use result::{OutputError, ValidationOutput, ValidationResult};
pub use validation::Context;
pub use validator::{validate, Validator};
