//! String keywords: `minLength`, `maxLength`, `pattern` and `format`.

use serde_json::{Map, Value};

use super::KeywordResult;
use crate::error::{Formatting, PatternCheck, StringLength};
use crate::validation::Context;
use crate::value::as_count;

/// Length in Unicode scalar values, which is what both length keywords count.
fn char_count(value: &str) -> u64 {
    value.chars().count() as u64
}

/// `minLength`
pub fn min_length(ctx: &Context<'_>, min_length: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(min), Some(value)) = (as_count(min_length), instance.as_str()) else {
        return Ok(Vec::new());
    };

    if char_count(value) < min {
        Ok(vec![ctx.error(StringLength::TooFewCharacters { min })])
    } else {
        Ok(Vec::new())
    }
}

/// `maxLength`
pub fn max_length(ctx: &Context<'_>, max_length: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(max), Some(value)) = (as_count(max_length), instance.as_str()) else {
        return Ok(Vec::new());
    };

    if char_count(value) > max {
        Ok(vec![ctx.error(StringLength::TooManyCharacters { max })])
    } else {
        Ok(Vec::new())
    }
}

/// `pattern`: the string must contain a match of the regular expression.
///
/// A pattern that does not compile is reported as a validation error at
/// this keyword instead of aborting the evaluation.
pub fn pattern(ctx: &Context<'_>, pattern: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(source), Some(value)) = (pattern.as_str(), instance.as_str()) else {
        return Ok(Vec::new());
    };

    let Some(regex) = ctx.validator().pattern(source) else {
        tracing::debug!(
            pattern = source,
            keyword_location = %ctx.keyword_location(),
            "pattern does not compile"
        );
        return Ok(vec![ctx.error(Formatting::InvalidRegex {
            instance: source.to_string(),
        })]);
    };

    if regex.is_match(value) {
        Ok(Vec::new())
    } else {
        Ok(vec![ctx.error(PatternCheck::Mismatch {
            instance: value.to_string(),
            pattern: source.to_string(),
        })])
    }
}

/// `format`: delegates to the format capability registered under the name.
///
/// Names without a registered capability produce `Formatting::Unsupported`.
pub fn format(ctx: &Context<'_>, format: &Value, instance: &Value, _: &Map<String, Value>) -> KeywordResult {
    let (Some(name), Some(value)) = (format.as_str(), instance.as_str()) else {
        return Ok(Vec::new());
    };

    match ctx.validator().formats().get(name) {
        Some(validator) => Ok(validator
            .validate(value)
            .err()
            .map(|reason| ctx.error(reason))
            .into_iter()
            .collect()),
        None => {
            tracing::warn!(format = name, "no validator registered for format");
            Ok(vec![ctx.error(Formatting::Unsupported {
                format: name.to_string(),
            })])
        }
    }
}
