//! The `$ref` keyword.

use serde_json::{Map, Value};

use super::KeywordResult;
use crate::validation::Context;

/// `$ref`: validates the instance against the referenced schema.
///
/// Errors inside the target are located under `$ref` in the keyword
/// location. A reference that cannot be resolved aborts the evaluation.
pub fn reference(ctx: &Context<'_>, reference: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let Some(reference) = reference.as_str() else {
        return Ok(Vec::new());
    };
    Ok(ctx.descend_reference(instance, reference)?.into_errors())
}
