//! The `type` keyword.
//!
//! Draft 4 only treats numbers written without a fraction or exponent as
//! integers; later drafts also accept floats with a zero fractional part,
//! so `1.0` is an integer there.

use serde_json::{Map, Value};

use super::KeywordResult;
use crate::error::TypeCheck;
use crate::validation::Context;
use crate::value::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntegerRule {
    Representation,
    Mathematical,
}

fn is_type(instance: &Value, name: &str, rule: IntegerRule) -> bool {
    match name {
        "null" => instance.is_null(),
        "boolean" => instance.is_boolean(),
        "string" => instance.is_string(),
        "array" => instance.is_array(),
        "object" => instance.is_object(),
        "number" => instance.is_number(),
        "integer" => match (rule, Number::of(instance)) {
            (_, Some(Number::Integer(_))) => true,
            (IntegerRule::Mathematical, Some(number)) => number.is_integral(),
            _ => false,
        },
        _ => false,
    }
}

fn check_type(ctx: &Context<'_>, expected: &Value, instance: &Value, rule: IntegerRule) -> KeywordResult {
    let names: Vec<&str> = match expected {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
        _ => return Ok(Vec::new()),
    };

    if names.iter().any(|name| is_type(instance, name, rule)) {
        Ok(Vec::new())
    } else {
        Ok(vec![ctx.error(TypeCheck::InvalidType {
            instance: instance.clone(),
            expected: names.into_iter().map(str::to_string).collect(),
        })])
    }
}

/// `type` for draft 6 and later.
pub fn type_of(ctx: &Context<'_>, expected: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    check_type(ctx, expected, instance, IntegerRule::Mathematical)
}

/// `type` for draft 4.
pub fn type_of_draft4(ctx: &Context<'_>, expected: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    check_type(ctx, expected, instance, IntegerRule::Representation)
}
