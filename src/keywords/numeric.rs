//! Numeric keywords: `minimum`, `maximum`, `exclusiveMinimum`,
//! `exclusiveMaximum` and `multipleOf`.
//!
//! Bounds compare only numbers of the same kind. An integer bound applied to
//! a float instance (or the reverse) is a no-op, as is any bound whose value
//! is not a number.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use super::KeywordResult;
use crate::error::{MultipleCheck, ValidationError, ValueBounds};
use crate::validation::Context;
use crate::value::{compare_same_kind, Number};

/// Checks `instance` against `bound`, reporting `error` when `accepts`
/// rejects the ordering of instance relative to bound.
fn check_bound(
    ctx: &Context<'_>,
    bound: &Value,
    instance: &Value,
    accepts: impl Fn(Ordering) -> bool,
    error: impl FnOnce(Number) -> ValueBounds,
) -> Vec<ValidationError> {
    let (Some(bound), Some(actual)) = (Number::of(bound), Number::of(instance)) else {
        return Vec::new();
    };

    match compare_same_kind(&actual, &bound) {
        Some(ordering) if !accepts(ordering) => vec![ctx.error(error(bound))],
        _ => Vec::new(),
    }
}

fn lower_bound(ctx: &Context<'_>, bound: &Value, instance: &Value, exclusive: bool) -> Vec<ValidationError> {
    check_bound(
        ctx,
        bound,
        instance,
        |ordering| ordering == Ordering::Greater || (!exclusive && ordering == Ordering::Equal),
        |min| ValueBounds::TooLow { min, exclusive },
    )
}

fn upper_bound(ctx: &Context<'_>, bound: &Value, instance: &Value, exclusive: bool) -> Vec<ValidationError> {
    check_bound(
        ctx,
        bound,
        instance,
        |ordering| ordering == Ordering::Less || (!exclusive && ordering == Ordering::Equal),
        |max| ValueBounds::TooHigh { max, exclusive },
    )
}

/// `minimum`: instance ≥ bound.
pub fn minimum(ctx: &Context<'_>, minimum: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    Ok(lower_bound(ctx, minimum, instance, false))
}

/// `maximum`: instance ≤ bound.
pub fn maximum(ctx: &Context<'_>, maximum: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    Ok(upper_bound(ctx, maximum, instance, false))
}

/// `exclusiveMinimum` (draft 6 and later): instance > bound.
pub fn exclusive_minimum(
    ctx: &Context<'_>,
    minimum: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    Ok(lower_bound(ctx, minimum, instance, true))
}

/// `exclusiveMaximum` (draft 6 and later): instance < bound.
pub fn exclusive_maximum(
    ctx: &Context<'_>,
    maximum: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    Ok(upper_bound(ctx, maximum, instance, true))
}

fn legacy_exclusive(schema: &Map<String, Value>, sibling: &str) -> bool {
    schema.get(sibling).and_then(Value::as_bool).unwrap_or(false)
}

/// Draft 4 `minimum`, made strict by a sibling `"exclusiveMinimum": true`.
pub fn minimum_draft4(
    ctx: &Context<'_>,
    minimum: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> KeywordResult {
    let exclusive = legacy_exclusive(schema, "exclusiveMinimum");
    Ok(lower_bound(ctx, minimum, instance, exclusive))
}

/// Draft 4 `maximum`, made strict by a sibling `"exclusiveMaximum": true`.
pub fn maximum_draft4(
    ctx: &Context<'_>,
    maximum: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> KeywordResult {
    let exclusive = legacy_exclusive(schema, "exclusiveMaximum");
    Ok(upper_bound(ctx, maximum, instance, exclusive))
}

/// `multipleOf`: instance divided by the divisor has no fractional part.
///
/// Non-positive divisors and non-positive instances are not checked.
pub fn multiple_of(
    ctx: &Context<'_>,
    multiple_of: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(divisor), Some(actual)) = (Number::of(multiple_of), Number::of(instance)) else {
        return Ok(Vec::new());
    };
    if divisor.as_f64() <= 0.0 || actual.as_f64() <= 0.0 {
        return Ok(Vec::new());
    }

    if is_multiple(actual, divisor) {
        Ok(Vec::new())
    } else {
        Ok(vec![ctx.error(MultipleCheck::NotMultiple {
            instance: actual,
            multiple_of: divisor,
        })])
    }
}

fn is_multiple(actual: Number, divisor: Number) -> bool {
    match (actual, divisor) {
        (Number::Integer(actual), Number::Integer(divisor)) => actual % divisor == 0,
        _ => {
            let quotient = actual.as_f64() / divisor.as_f64();
            if !quotient.is_finite() {
                return false;
            }
            // tolerate representation error, e.g. 0.0075 / 0.0001
            (quotient - quotient.round()).abs() <= f64::EPSILON * quotient.abs().max(1.0)
        }
    }
}
