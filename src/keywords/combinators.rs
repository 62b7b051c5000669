//! Applicator keywords that combine subschemas: `allOf`, `anyOf`, `oneOf`,
//! `not` and `if`/`then`/`else`.

use serde_json::{Map, Value};

use super::{map_branches, KeywordResult};
use crate::error::Applicators;
use crate::validation::Context;

/// `allOf`: the instance must satisfy every subschema.
///
/// Errors of all failing branches are reported, in branch order.
pub fn all_of(ctx: &Context<'_>, all_of: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let Some(branches) = all_of.as_array() else {
        return Ok(Vec::new());
    };

    let mut errors = Vec::new();
    for (index, subschema) in branches.iter().enumerate() {
        errors.extend(ctx.keyword_index(index).descend(instance, subschema)?.into_errors());
    }
    Ok(errors)
}

/// `anyOf`: the instance must satisfy at least one subschema.
///
/// Branches are tried in order and evaluation stops at the first match.
pub fn any_of(ctx: &Context<'_>, any_of: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let Some(branches) = any_of.as_array() else {
        return Ok(Vec::new());
    };

    for (index, subschema) in branches.iter().enumerate() {
        if ctx.keyword_index(index).is_valid(instance, subschema)? {
            return Ok(Vec::new());
        }
    }

    Ok(vec![ctx.error(Applicators::AnyOfNotMet {
        instance: instance.clone(),
    })])
}

/// `oneOf`: exactly one subschema must accept the instance.
///
/// Every branch is evaluated, so a second match is always detected.
pub fn one_of(ctx: &Context<'_>, one_of: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let Some(branches) = one_of.as_array() else {
        return Ok(Vec::new());
    };

    let matches = map_branches(ctx, branches, |index, subschema| {
        ctx.keyword_index(index).is_valid(instance, subschema)
    })?;

    if matches.iter().filter(|matched| **matched).count() == 1 {
        Ok(Vec::new())
    } else {
        Ok(vec![ctx.error(Applicators::OneOfNotMet {
            one_of: one_of.clone(),
            instance: instance.clone(),
        })])
    }
}

/// `not`: the instance must be rejected by the subschema.
pub fn not(ctx: &Context<'_>, not: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    if ctx.is_valid(instance, not)? {
        Ok(vec![ctx.error(Applicators::NotNotMet {
            instance: instance.clone(),
        })])
    } else {
        Ok(Vec::new())
    }
}

/// `if`: selects `then` or `else` depending on whether `if` accepts the instance.
///
/// Errors of `if` itself are never reported; errors of the selected branch
/// are located under that sibling keyword.
pub fn if_then_else(
    ctx: &Context<'_>,
    condition: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> KeywordResult {
    let branch = if ctx.is_valid(instance, condition)? {
        "then"
    } else {
        "else"
    };

    match schema.get(branch) {
        Some(subschema) => Ok(ctx.sibling(branch).descend(instance, subschema)?.into_errors()),
        None => Ok(Vec::new()),
    }
}
