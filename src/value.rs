//! Numeric view and structural equality over JSON values.
//!
//! Instances and schemas are plain [`serde_json::Value`]s. This module adds the
//! pieces the keywords need on top of that: a closed [`Number`] type that keeps
//! integers and floats apart, the JSON equality used by `const`, `enum` and
//! `uniqueItems`, and a few small accessors for keyword arguments.

use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde_json::Value;

/// A JSON number with its representation preserved.
///
/// `Integer` covers the whole `i64` and `u64` range; everything that was
/// written with a fraction or exponent is a `Float`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i128),
    Float(f64),
}

impl Number {
    /// Returns the numeric view of a value, or `None` for non-numbers.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Self::from_json(n),
            _ => None,
        }
    }

    /// Converts a `serde_json::Number`, keeping integers exact.
    pub fn from_json(number: &serde_json::Number) -> Option<Self> {
        if let Some(i) = number.as_i64() {
            Some(Number::Integer(i as i128))
        } else if let Some(u) = number.as_u64() {
            Some(Number::Integer(u as i128))
        } else {
            number.as_f64().map(Number::Float)
        }
    }

    /// Returns the value as `f64`, possibly losing precision for huge integers.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Returns true if the number has no fractional part.
    pub fn is_integral(&self) -> bool {
        match *self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Orders two numbers of the same representation.
///
/// Returns `None` when one is an integer and the other a float, or when a
/// float comparison is undefined.
pub fn compare_same_kind(a: &Number, b: &Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => Some(x.cmp(y)),
        (Number::Float(x), Number::Float(y)) => x.partial_cmp(y),
        _ => None,
    }
}

/// Compares two numbers by mathematical value without a lossy cast.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (*a, *b) {
        (Number::Integer(x), Number::Integer(y)) => x == y,
        (Number::Float(x), Number::Float(y)) => x == y,
        (Number::Integer(i), Number::Float(f)) | (Number::Float(f), Number::Integer(i)) => {
            // i128 spans far beyond the i64/u64 inputs, so the cast is exact for integral f
            f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38 && f as i128 == i
        }
    }
}

/// Deep JSON equality.
///
/// Numbers compare by value regardless of representation, booleans never
/// equal numbers, arrays compare element-wise in order and objects compare
/// by key set and per-key value.
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => match (Number::from_json(x), Number::from_json(y)) {
            (Some(x), Some(y)) => numbers_equal(&x, &y),
            _ => false,
        },
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| equal(value, other)))
        }
        _ => false,
    }
}

/// Reads a non-negative integer keyword argument such as `minLength`.
///
/// Floats with a zero fractional part (`2.0`) are accepted.
pub fn as_count(value: &Value) -> Option<u64> {
    match Number::of(value)? {
        Number::Integer(i) => u64::try_from(i).ok(),
        Number::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        Number::Float(_) => None,
    }
}

/// Returns the JSON Schema type name of a value.
///
/// Integers written without a fraction report `"integer"`; every other number
/// reports `"number"`.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_representation_is_preserved() {
        assert_eq!(Number::of(&json!(5)), Some(Number::Integer(5)));
        assert_eq!(Number::of(&json!(5.0)), Some(Number::Float(5.0)));
        assert_eq!(
            Number::of(&json!(u64::MAX)),
            Some(Number::Integer(u64::MAX as i128))
        );
        assert_eq!(Number::of(&json!(true)), None);
        assert_eq!(Number::of(&json!("5")), None);
    }

    #[test]
    fn test_compare_same_kind() {
        let one = Number::Integer(1);
        let two = Number::Integer(2);
        assert_eq!(compare_same_kind(&one, &two), Some(Ordering::Less));
        assert_eq!(
            compare_same_kind(&Number::Float(2.5), &Number::Float(1.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(compare_same_kind(&one, &Number::Float(1.0)), None);
    }

    #[test]
    fn test_numbers_equal_across_representations() {
        assert!(equal(&json!(1), &json!(1.0)));
        assert!(!equal(&json!(1), &json!(1.5)));
        assert!(equal(&json!(-3), &json!(-3.0)));
    }

    #[test]
    fn test_booleans_are_not_numbers() {
        assert!(!equal(&json!(true), &json!(1)));
        assert!(!equal(&json!(false), &json!(0)));
        assert!(!equal(&json!(0), &json!(false)));
    }

    #[test]
    fn test_arrays_compare_in_order() {
        assert!(equal(&json!([1, "a"]), &json!([1.0, "a"])));
        assert!(!equal(&json!([1, "a"]), &json!(["a", 1])));
        assert!(!equal(&json!([1]), &json!([1, 1])));
    }

    #[test]
    fn test_objects_ignore_key_order() {
        assert!(equal(&json!({"a": 1, "b": [2]}), &json!({"b": [2.0], "a": 1})));
        assert!(!equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!equal(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn test_strings_and_null() {
        assert!(equal(&json!("é"), &json!("é")));
        assert!(!equal(&json!("e"), &json!("é")));
        assert!(equal(&json!(null), &json!(null)));
        assert!(!equal(&json!(null), &json!(false)));
    }

    #[test]
    fn test_as_count() {
        assert_eq!(as_count(&json!(3)), Some(3));
        assert_eq!(as_count(&json!(2.0)), Some(2));
        assert_eq!(as_count(&json!(-1)), None);
        assert_eq!(as_count(&json!(1.5)), None);
        assert_eq!(as_count(&json!("3")), None);
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(kind_name(&json!(1)), "integer");
        assert_eq!(kind_name(&json!(1.0)), "number");
        assert_eq!(kind_name(&json!([])), "array");
        assert_eq!(kind_name(&json!({})), "object");
    }
}
