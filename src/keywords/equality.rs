//! `enum` and `const`, both decided by JSON value equality.

use serde_json::{Map, Value};

use super::KeywordResult;
use crate::error::Applicators;
use crate::validation::Context;
use crate::value::equal;

/// `enum`: the instance must equal one of the listed values.
pub fn enumeration(ctx: &Context<'_>, values: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let Some(candidates) = values.as_array() else {
        return Ok(Vec::new());
    };

    if candidates.iter().any(|candidate| equal(candidate, instance)) {
        Ok(Vec::new())
    } else {
        Ok(vec![ctx.error(Applicators::EnumNotMet {
            instance: instance.clone(),
            enum_values: values.clone(),
        })])
    }
}

/// `const`: the instance must equal the value.
pub fn constant(ctx: &Context<'_>, value: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    if equal(value, instance) {
        Ok(Vec::new())
    } else {
        Ok(vec![ctx.error(Applicators::ConstNotMet {
            instance: instance.clone(),
            const_value: value.clone(),
        })])
    }
}
