//! The evaluation context threaded through keyword validation.
//!
//! This module provides [`Context`], which carries the instance and keyword
//! locations, the document used to resolve fragment references, the current
//! nesting depth, and a read-only reference to the active [`Validator`]
//! configuration. Contexts are cheap to derive: every `keyword`/`item`/
//! `property` call returns a new context with one more pointer token, so a
//! location can never leak from one branch into a sibling.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{Meta, SchemaError, ValidationError, ValidationErrorReason};
use crate::path::JsonPointer;
use crate::registry::{locate, split_reference};
use crate::result::ValidationResult;
use crate::validator::Validator;
use crate::value::kind_name;

/// Location-tracking evaluation state.
///
/// One root context is created per top-level validation call; everything
/// below it is derived. Deriving never mutates the parent, which makes a
/// context safe to share between branches evaluated on different threads.
#[derive(Clone)]
pub struct Context<'v> {
    validator: &'v Validator,
    root: Arc<Value>,
    instance_location: JsonPointer,
    keyword_location: JsonPointer,
    depth: usize,
}

impl<'v> Context<'v> {
    /// Creates the root context for evaluating `root` with `validator`.
    pub fn new(validator: &'v Validator, root: Arc<Value>) -> Self {
        Self {
            validator,
            root,
            instance_location: JsonPointer::root(),
            keyword_location: JsonPointer::root(),
            depth: 0,
        }
    }

    /// Returns the active validator configuration.
    pub fn validator(&self) -> &'v Validator {
        self.validator
    }

    /// Returns the document fragment references resolve against.
    pub fn root(&self) -> &Arc<Value> {
        &self.root
    }

    /// Returns the current location in the instance.
    pub fn instance_location(&self) -> &JsonPointer {
        &self.instance_location
    }

    /// Returns the current location in the schema.
    pub fn keyword_location(&self) -> &JsonPointer {
        &self.keyword_location
    }

    /// Returns how many nested evaluations enclose this context.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enters a keyword (or a named entry below one) of the schema.
    pub fn keyword(&self, name: &str) -> Self {
        Self {
            keyword_location: self.keyword_location.push(name),
            ..self.clone()
        }
    }

    /// Enters the `index`-th subschema of an array-valued keyword.
    pub fn keyword_index(&self, index: usize) -> Self {
        Self {
            keyword_location: self.keyword_location.push_index(index),
            ..self.clone()
        }
    }

    /// Moves from the current keyword to a sibling keyword of the same schema.
    pub fn sibling(&self, name: &str) -> Self {
        let parent = self.keyword_location.pop().unwrap_or_default();
        Self {
            keyword_location: parent.push(name),
            ..self.clone()
        }
    }

    /// Enters an array element of the instance.
    pub fn item(&self, index: usize) -> Self {
        Self {
            instance_location: self.instance_location.push_index(index),
            ..self.clone()
        }
    }

    /// Enters an object member of the instance.
    pub fn property(&self, key: &str) -> Self {
        Self {
            instance_location: self.instance_location.push(key),
            ..self.clone()
        }
    }

    /// Creates an error located at the current instance and keyword locations.
    pub fn error(&self, reason: impl Into<ValidationErrorReason>) -> ValidationError {
        ValidationError::new(
            reason,
            self.instance_location.clone(),
            self.keyword_location.clone(),
        )
    }

    /// Evaluates `subschema` against `instance` as a nested validation.
    ///
    /// The caller is expected to have entered the locations the nested
    /// evaluation belongs to. Violations are returned in the result;
    /// `Err` means the schema cannot be evaluated.
    pub fn descend(&self, instance: &Value, subschema: &Value) -> Result<ValidationResult, SchemaError> {
        if self.depth >= self.validator.max_depth() {
            return Err(SchemaError::MaxDepthExceeded {
                max_depth: self.validator.max_depth(),
                keyword_location: self.keyword_location.to_uri_fragment(),
            });
        }

        let nested = Self {
            depth: self.depth + 1,
            ..self.clone()
        };
        nested.evaluate(instance, subschema)
    }

    /// Returns whether `subschema` accepts `instance`.
    pub fn is_valid(&self, instance: &Value, subschema: &Value) -> Result<bool, SchemaError> {
        Ok(self.descend(instance, subschema)?.is_valid())
    }

    /// Resolves `reference` and evaluates the target against `instance`.
    ///
    /// A reference without a base URI resolves against the current document;
    /// otherwise the base is looked up through the validator's resolver and
    /// becomes the document for references inside the target.
    pub fn descend_reference(
        &self,
        instance: &Value,
        reference: &str,
    ) -> Result<ValidationResult, SchemaError> {
        let (base, fragment) = split_reference(reference);
        let document = if base.is_empty() {
            Arc::clone(&self.root)
        } else {
            self.validator
                .resolver()
                .resolve_document(base)
                .ok_or_else(|| self.unresolvable(reference))?
        };

        let target = locate(&document, fragment).ok_or_else(|| self.unresolvable(reference))?;
        tracing::trace!(
            reference,
            keyword_location = %self.keyword_location,
            "resolved reference"
        );

        let scoped = Self {
            root: Arc::clone(&document),
            ..self.clone()
        };
        scoped.descend(instance, target)
    }

    fn unresolvable(&self, reference: &str) -> SchemaError {
        SchemaError::UnresolvableReference {
            reference: reference.to_string(),
            keyword_location: self.keyword_location.to_uri_fragment(),
        }
    }

    /// Runs every applicable keyword of `schema` and concatenates their errors.
    pub(crate) fn evaluate(&self, instance: &Value, schema: &Value) -> Result<ValidationResult, SchemaError> {
        match schema {
            Value::Bool(true) => Ok(ValidationResult::Valid),
            Value::Bool(false) => Ok(ValidationResult::invalid(self.error(Meta::FalsySchema))),
            Value::Object(object) => {
                let mut errors = Vec::new();
                for (name, keyword, value) in self.validator.keywords().applicable(object) {
                    errors.extend(keyword(&self.keyword(name), value, instance, object)?);
                }
                Ok(ValidationResult::from_errors(errors))
            }
            other => Err(SchemaError::InvalidSchema {
                keyword_location: self.keyword_location.to_uri_fragment(),
                found: kind_name(other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Draft;
    use serde_json::json;

    fn root_context(validator: &Validator) -> Context<'_> {
        Context::new(validator, Arc::new(json!({})))
    }

    #[test]
    fn test_derived_locations_do_not_leak() {
        let validator = Validator::new(Draft::Draft202012);
        let ctx = root_context(&validator);

        let first = ctx.keyword("items").item(0);
        let second = ctx.keyword("items").item(1);

        assert_eq!(first.instance_location().to_string(), "/0");
        assert_eq!(second.instance_location().to_string(), "/1");
        assert!(ctx.instance_location().is_root());
        assert!(ctx.keyword_location().is_root());
    }

    #[test]
    fn test_sibling_replaces_last_keyword() {
        let validator = Validator::new(Draft::Draft7);
        let ctx = root_context(&validator).keyword("if");
        assert_eq!(ctx.sibling("then").keyword_location().to_string(), "/then");
    }

    #[test]
    fn test_error_uses_current_locations() {
        let validator = Validator::new(Draft::Draft202012);
        let ctx = root_context(&validator).keyword("properties").keyword("a").property("a");
        let error = ctx.error(Meta::FalsySchema);
        assert_eq!(error.instance_location.to_string(), "/a");
        assert_eq!(error.keyword_location.to_uri_fragment(), "#/properties/a");
    }

    #[test]
    fn test_boolean_schemas() {
        let validator = Validator::new(Draft::Draft202012);
        let ctx = root_context(&validator);

        assert!(ctx.is_valid(&json!(1), &json!(true)).unwrap());
        let result = ctx.descend(&json!(1), &json!(false)).unwrap();
        assert_eq!(
            result.errors().unwrap().first().reason,
            ValidationErrorReason::Meta(Meta::FalsySchema)
        );
    }

    #[test]
    fn test_non_schema_value_is_fatal() {
        let validator = Validator::new(Draft::Draft202012);
        let ctx = root_context(&validator);
        let err = ctx.descend(&json!(1), &json!("string")).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { found: "string", .. }));
    }

    #[test]
    fn test_depth_limit() {
        let validator = Validator::new(Draft::Draft202012).with_max_depth(2);
        let ctx = root_context(&validator);
        let schema = json!({"not": {"not": {"not": true}}});
        let err = ctx.descend(&json!(null), &schema).unwrap_err();
        assert!(matches!(err, SchemaError::MaxDepthExceeded { max_depth: 2, .. }));
    }
}
