//! Array keywords: `minItems`, `maxItems`, `uniqueItems`, `items`,
//! `prefixItems`, `additionalItems` and `contains` with its
//! `minContains`/`maxContains` modifiers.

use serde_json::{Map, Value};

use super::{map_branches, KeywordResult};
use crate::error::{Applicators, ItemCount, SchemaError, Uniqueness, ValidationError};
use crate::validation::Context;
use crate::value::{as_count, equal};

/// `minItems`
pub fn min_items(ctx: &Context<'_>, min_items: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(min), Some(items)) = (as_count(min_items), instance.as_array()) else {
        return Ok(Vec::new());
    };

    if (items.len() as u64) < min {
        Ok(vec![ctx.error(ItemCount::TooFewItems { min })])
    } else {
        Ok(Vec::new())
    }
}

/// `maxItems`
pub fn max_items(ctx: &Context<'_>, max_items: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(max), Some(items)) = (as_count(max_items), instance.as_array()) else {
        return Ok(Vec::new());
    };

    if (items.len() as u64) > max {
        Ok(vec![ctx.error(ItemCount::TooManyItems { max })])
    } else {
        Ok(Vec::new())
    }
}

/// `uniqueItems`: no two elements may be equal under JSON equality, so
/// `[1, 1.0]` repeats while `[1, true]` does not.
pub fn unique_items(
    ctx: &Context<'_>,
    unique_items: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(true), Some(items)) = (unique_items.as_bool(), instance.as_array()) else {
        return Ok(Vec::new());
    };

    let has_duplicate = items
        .iter()
        .enumerate()
        .any(|(index, item)| items[index + 1..].iter().any(|other| equal(item, other)));

    if has_duplicate {
        Ok(vec![ctx.error(Uniqueness::UniqueItemsNotIncluded {
            collection: instance.clone(),
        })])
    } else {
        Ok(Vec::new())
    }
}

fn each_item<'a>(
    ctx: &Context<'_>,
    items: impl Iterator<Item = (usize, &'a Value)>,
    subschema: &Value,
) -> KeywordResult {
    let mut errors = Vec::new();
    for (index, item) in items {
        errors.extend(ctx.item(index).descend(item, subschema)?.into_errors());
    }
    Ok(errors)
}

fn positional(ctx: &Context<'_>, schemas: &[Value], items: &[Value]) -> KeywordResult {
    let mut errors = Vec::new();
    for (index, (subschema, item)) in schemas.iter().zip(items).enumerate() {
        let nested = ctx.keyword_index(index).item(index);
        errors.extend(nested.descend(item, subschema)?.into_errors());
    }
    Ok(errors)
}

/// `items` up to 2019-09: a single schema applies to every element, an
/// array of schemas applies position by position.
pub fn items(ctx: &Context<'_>, items: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let Some(elements) = instance.as_array() else {
        return Ok(Vec::new());
    };

    match items {
        Value::Array(schemas) => positional(ctx, schemas, elements),
        subschema => each_item(ctx, elements.iter().enumerate(), subschema),
    }
}

/// `additionalItems`: applies to elements past an array-form `items`.
///
/// `false` reports a single error for the whole array.
pub fn additional_items(
    ctx: &Context<'_>,
    additional: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> KeywordResult {
    let (Some(Value::Array(leading)), Some(elements)) = (schema.get("items"), instance.as_array()) else {
        return Ok(Vec::new());
    };
    if elements.len() <= leading.len() {
        return Ok(Vec::new());
    }

    match additional {
        Value::Bool(false) => Ok(vec![ctx.error(Applicators::AdditionalItemsNotPermitted)]),
        subschema => each_item(ctx, elements.iter().enumerate().skip(leading.len()), subschema),
    }
}

/// `prefixItems` (2020-12): positional schemas for the leading elements.
pub fn prefix_items(ctx: &Context<'_>, prefix: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(schemas), Some(elements)) = (prefix.as_array(), instance.as_array()) else {
        return Ok(Vec::new());
    };
    positional(ctx, schemas, elements)
}

/// `items` (2020-12): applies to every element not covered by `prefixItems`.
pub fn items_after_prefix(
    ctx: &Context<'_>,
    items: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> KeywordResult {
    let Some(elements) = instance.as_array() else {
        return Ok(Vec::new());
    };

    let skip = schema
        .get("prefixItems")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    each_item(ctx, elements.iter().enumerate().skip(skip), items)
}

/// Counts the elements accepted by `subschema`.
fn count_matches(ctx: &Context<'_>, subschema: &Value, elements: &[Value]) -> Result<u64, SchemaError> {
    let matches = map_branches(ctx, elements, |index, item| ctx.item(index).is_valid(item, subschema))?;
    Ok(matches.into_iter().filter(|matched| *matched).count() as u64)
}

fn contains_between(
    ctx: &Context<'_>,
    subschema: &Value,
    instance: &Value,
    min: u64,
    max: Option<u64>,
) -> Result<Vec<ValidationError>, SchemaError> {
    let Some(elements) = instance.as_array() else {
        return Ok(Vec::new());
    };
    if min == 0 && max.is_none() {
        return Ok(Vec::new());
    }

    let count = count_matches(ctx, subschema, elements)?;
    let not_met = || {
        ctx.error(Applicators::ContainsNotMet {
            instance: instance.clone(),
        })
    };

    match max {
        Some(max) if count > max => Ok(vec![
            ctx.error(Applicators::MaxContainsNotMet {
                instance: instance.clone(),
                max,
            }),
            not_met(),
        ]),
        _ if count < min => Ok(vec![not_met()]),
        _ => Ok(Vec::new()),
    }
}

/// `contains` (draft 6 and 7): at least one element must match.
pub fn contains(ctx: &Context<'_>, contains: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    contains_between(ctx, contains, instance, 1, None)
}

/// `contains` (2019-09 and later): the number of matching elements must lie
/// within `minContains` (default 1) and `maxContains` (default unbounded; a
/// non-positive maximum is treated as unbounded).
///
/// Exceeding the maximum reports two errors: the maximum violation followed
/// by the general `contains` violation.
pub fn contains_bounded(
    ctx: &Context<'_>,
    contains: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> KeywordResult {
    let min = schema.get("minContains").and_then(as_count).unwrap_or(1);
    let max = schema.get("maxContains").and_then(as_count).filter(|max| *max > 0);
    contains_between(ctx, contains, instance, min, max)
}
