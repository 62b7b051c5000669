//! Object keywords: `required`, `minProperties`, `maxProperties`,
//! `properties`, `patternProperties`, `additionalProperties`,
//! `propertyNames` and the dependency keywords.

use regex::Regex;
use serde_json::{Map, Value};

use super::KeywordResult;
use crate::error::{Applicators, PropertiesLength, PropertyInclusion, SchemaError, ValidationError};
use crate::validation::Context;
use crate::value::as_count;

/// `required`: one error per listed key that is absent.
pub fn required(ctx: &Context<'_>, required: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(keys), Some(object)) = (required.as_array(), instance.as_object()) else {
        return Ok(Vec::new());
    };

    Ok(keys
        .iter()
        .filter_map(Value::as_str)
        .filter(|key| !object.contains_key(*key))
        .map(|key| {
            ctx.error(PropertyInclusion::PropertyMissing {
                key: key.to_string(),
            })
        })
        .collect())
}

/// `minProperties`
pub fn min_properties(
    ctx: &Context<'_>,
    min_properties: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(min), Some(object)) = (as_count(min_properties), instance.as_object()) else {
        return Ok(Vec::new());
    };

    if (object.len() as u64) < min {
        Ok(vec![ctx.error(PropertiesLength::TooFew { min })])
    } else {
        Ok(Vec::new())
    }
}

/// `maxProperties`
pub fn max_properties(
    ctx: &Context<'_>,
    max_properties: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(max), Some(object)) = (as_count(max_properties), instance.as_object()) else {
        return Ok(Vec::new());
    };

    if (object.len() as u64) > max {
        Ok(vec![ctx.error(PropertiesLength::TooMany { max })])
    } else {
        Ok(Vec::new())
    }
}

/// `properties`: each present member is validated against its subschema.
pub fn properties(ctx: &Context<'_>, properties: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(properties), Some(object)) = (properties.as_object(), instance.as_object()) else {
        return Ok(Vec::new());
    };

    let mut errors = Vec::new();
    for (key, subschema) in properties {
        if let Some(member) = object.get(key) {
            let nested = ctx.keyword(key).property(key);
            errors.extend(nested.descend(member, subschema)?.into_errors());
        }
    }
    Ok(errors)
}

/// Compiles a pattern used to select members; failure is fatal here.
fn member_pattern(ctx: &Context<'_>, pattern: &str) -> Result<Regex, SchemaError> {
    ctx.validator()
        .pattern(pattern)
        .ok_or_else(|| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            keyword_location: ctx.keyword_location().to_uri_fragment(),
        })
}

/// `patternProperties`: members whose name matches a pattern are validated
/// against that pattern's subschema.
pub fn pattern_properties(
    ctx: &Context<'_>,
    pattern_properties: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(patterns), Some(object)) = (pattern_properties.as_object(), instance.as_object()) else {
        return Ok(Vec::new());
    };

    let mut errors = Vec::new();
    for (pattern, subschema) in patterns {
        let scoped = ctx.keyword(pattern);
        let regex = member_pattern(&scoped, pattern)?;
        for (key, member) in object.iter().filter(|(key, _)| regex.is_match(key)) {
            errors.extend(scoped.property(key).descend(member, subschema)?.into_errors());
        }
    }
    Ok(errors)
}

/// `additionalProperties`: members not covered by `properties` or
/// `patternProperties` are validated against this subschema.
pub fn additional_properties(
    ctx: &Context<'_>,
    additional: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> KeywordResult {
    let Some(object) = instance.as_object() else {
        return Ok(Vec::new());
    };

    let declared = schema.get("properties").and_then(Value::as_object);
    let patterns = schema
        .get("patternProperties")
        .and_then(Value::as_object)
        .map(|patterns| {
            patterns
                .keys()
                .map(|pattern| member_pattern(&ctx.sibling("patternProperties").keyword(pattern), pattern))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    let mut errors = Vec::new();
    for (key, member) in object {
        let is_declared = declared.is_some_and(|declared| declared.contains_key(key));
        if is_declared || patterns.iter().any(|regex| regex.is_match(key)) {
            continue;
        }
        errors.extend(ctx.property(key).descend(member, additional)?.into_errors());
    }
    Ok(errors)
}

/// `propertyNames`: every member name, as a string instance, must satisfy
/// the subschema. Errors are located at the member.
pub fn property_names(
    ctx: &Context<'_>,
    property_names: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let Some(object) = instance.as_object() else {
        return Ok(Vec::new());
    };

    let mut errors = Vec::new();
    for key in object.keys() {
        let name = Value::String(key.clone());
        errors.extend(ctx.property(key).descend(&name, property_names)?.into_errors());
    }
    Ok(errors)
}

fn missing_dependencies(
    ctx: &Context<'_>,
    trigger: &str,
    dependencies: &[Value],
    object: &Map<String, Value>,
) -> Vec<ValidationError> {
    dependencies
        .iter()
        .filter_map(Value::as_str)
        .filter(|key| !object.contains_key(*key))
        .map(|key| {
            ctx.error(Applicators::MissingDependency {
                key: key.to_string(),
                property: trigger.to_string(),
            })
        })
        .collect()
}

/// `dependencies` (draft 4 to 7): when a member is present, either the
/// listed members must also be present, or the instance must satisfy the
/// given subschema.
pub fn dependencies(
    ctx: &Context<'_>,
    dependencies: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(dependencies), Some(object)) = (dependencies.as_object(), instance.as_object()) else {
        return Ok(Vec::new());
    };

    let mut errors = Vec::new();
    for (trigger, dependency) in dependencies.iter().filter(|(key, _)| object.contains_key(*key)) {
        let scoped = ctx.keyword(trigger);
        match dependency {
            Value::Array(keys) => errors.extend(missing_dependencies(&scoped, trigger, keys, object)),
            subschema => errors.extend(scoped.descend(instance, subschema)?.into_errors()),
        }
    }
    Ok(errors)
}

/// `dependentRequired` (2019-09 and later): the array form of `dependencies`.
pub fn dependent_required(
    ctx: &Context<'_>,
    dependent_required: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(dependencies), Some(object)) = (dependent_required.as_object(), instance.as_object()) else {
        return Ok(Vec::new());
    };

    Ok(dependencies
        .iter()
        .filter(|(trigger, _)| object.contains_key(*trigger))
        .filter_map(|(trigger, keys)| keys.as_array().map(|keys| (trigger, keys)))
        .flat_map(|(trigger, keys)| missing_dependencies(&ctx.keyword(trigger), trigger, keys, object))
        .collect())
}

/// `dependentSchemas` (2019-09 and later): the schema form of `dependencies`.
pub fn dependent_schemas(
    ctx: &Context<'_>,
    dependent_schemas: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> KeywordResult {
    let (Some(dependencies), Some(object)) = (dependent_schemas.as_object(), instance.as_object()) else {
        return Ok(Vec::new());
    };

    let mut errors = Vec::new();
    for (trigger, subschema) in dependencies.iter().filter(|(key, _)| object.contains_key(*key)) {
        errors.extend(ctx.keyword(trigger).descend(instance, subschema)?.into_errors());
    }
    Ok(errors)
}
