use schemata::error::{Applicators, ItemCount, Uniqueness};
use schemata::{Draft, ValidationErrorReason, ValidationResult, Validator};
use serde_json::{json, Value};

fn validate_with(draft: Draft, schema: Value, instance: Value) -> ValidationResult {
    Validator::new(draft).validate(&schema, &instance).unwrap()
}

fn validate(schema: Value, instance: Value) -> ValidationResult {
    validate_with(Draft::Draft202012, schema, instance)
}

fn reasons(result: &ValidationResult) -> Vec<ValidationErrorReason> {
    result
        .errors()
        .map(|errors| errors.iter().map(|e| e.reason.clone()).collect())
        .unwrap_or_default()
}

fn locations(result: &ValidationResult) -> Vec<(String, String)> {
    result
        .errors()
        .map(|errors| {
            errors
                .iter()
                .map(|e| (e.instance_location.to_string(), e.keyword_location.to_uri_fragment()))
                .collect()
        })
        .unwrap_or_default()
}

// ====== Item Count Tests ======

#[test]
fn test_min_items() {
    assert!(validate(json!({"minItems": 2}), json!([1, 2])).is_valid());
    assert_eq!(
        reasons(&validate(json!({"minItems": 2}), json!([1]))),
        vec![ValidationErrorReason::ItemCount(ItemCount::TooFewItems { min: 2 })]
    );
}

#[test]
fn test_max_items() {
    assert!(validate(json!({"maxItems": 1}), json!([])).is_valid());
    assert_eq!(
        reasons(&validate(json!({"maxItems": 1}), json!([1, 2]))),
        vec![ValidationErrorReason::ItemCount(ItemCount::TooManyItems { max: 1 })]
    );
}

#[test]
fn test_item_counts_ignore_non_arrays() {
    assert!(validate(json!({"minItems": 1}), json!("abc")).is_valid());
}

// ====== uniqueItems Tests ======

#[test]
fn test_unique_items_number_equality() {
    let result = validate(json!({"uniqueItems": true}), json!([1, 1.0]));
    assert_eq!(
        reasons(&result),
        vec![ValidationErrorReason::Uniqueness(Uniqueness::UniqueItemsNotIncluded {
            collection: json!([1, 1.0]),
        })]
    );
}

#[test]
fn test_unique_items_bool_is_not_number() {
    assert!(validate(json!({"uniqueItems": true}), json!([1, true])).is_valid());
    assert!(validate(json!({"uniqueItems": true}), json!([0, false])).is_valid());
}

#[test]
fn test_unique_items_deep_equality() {
    let schema = json!({"uniqueItems": true});
    assert!(!validate(schema.clone(), json!([{"a": [1]}, {"a": [1.0]}])).is_valid());
    assert!(validate(schema.clone(), json!([[1, 2], [2, 1]])).is_valid());
    assert!(validate(schema, json!([])).is_valid());
}

#[test]
fn test_unique_items_false_allows_duplicates() {
    assert!(validate(json!({"uniqueItems": false}), json!([1, 1])).is_valid());
}

// ====== contains Tests ======

#[test]
fn test_contains_requires_one_match() {
    let schema = json!({"contains": {"type": "string"}});
    assert!(validate(schema.clone(), json!([1, "a"])).is_valid());

    let result = validate(schema.clone(), json!([1, 2]));
    assert_eq!(
        reasons(&result),
        vec![ValidationErrorReason::Applicators(Applicators::ContainsNotMet {
            instance: json!([1, 2]),
        })]
    );
    assert!(!validate(schema, json!([])).is_valid());
}

#[test]
fn test_contains_ignores_non_arrays() {
    assert!(validate(json!({"contains": false}), json!({"a": 1})).is_valid());
}

#[test]
fn test_max_contains_exceeded_reports_two_errors() {
    let schema = json!({"contains": {"type": "integer"}, "maxContains": 1});
    let result = validate(schema, json!([1, 2]));

    assert_eq!(
        reasons(&result),
        vec![
            ValidationErrorReason::Applicators(Applicators::MaxContainsNotMet {
                instance: json!([1, 2]),
                max: 1,
            }),
            ValidationErrorReason::Applicators(Applicators::ContainsNotMet {
                instance: json!([1, 2]),
            }),
        ]
    );
    assert_eq!(
        locations(&result),
        vec![
            (String::new(), "#/contains".to_string()),
            (String::new(), "#/contains".to_string()),
        ]
    );
}

#[test]
fn test_min_contains() {
    let schema = json!({"contains": {"const": 1}, "minContains": 2});
    assert!(validate(schema.clone(), json!([1, 1, 2])).is_valid());
    assert!(!validate(schema, json!([1, 2])).is_valid());
}

#[test]
fn test_min_contains_zero_is_trivially_satisfied() {
    let schema = json!({"contains": false, "minContains": 0});
    assert!(validate(schema.clone(), json!([])).is_valid());
    assert!(validate(schema, json!([1, 2, 3])).is_valid());
}

#[test]
fn test_min_contains_zero_still_checks_max() {
    let schema = json!({"contains": true, "minContains": 0, "maxContains": 1});
    assert!(validate(schema.clone(), json!([1])).is_valid());
    assert_eq!(validate(schema, json!([1, 2])).errors().unwrap().len(), 2);
}

#[test]
fn test_zero_max_contains_is_unbounded() {
    let schema = json!({"contains": {"type": "number"}, "maxContains": 0});
    assert!(validate(schema.clone(), json!([1, 2])).is_valid());
    assert_eq!(
        reasons(&validate(schema, json!(["a"]))),
        vec![ValidationErrorReason::Applicators(Applicators::ContainsNotMet {
            instance: json!(["a"]),
        })]
    );
}

#[test]
fn test_zero_min_and_max_contains_is_trivially_satisfied() {
    let schema = json!({"contains": false, "minContains": 0, "maxContains": 0});
    assert!(validate(schema.clone(), json!([1])).is_valid());
    assert!(validate(schema, json!([])).is_valid());
}

#[test]
fn test_negative_max_contains_is_unbounded() {
    let schema = json!({"contains": true, "maxContains": -3});
    assert!(validate(schema, json!([1, 2, 3])).is_valid());
}

#[test]
fn test_max_contains_ignored_before_2019() {
    let schema = json!({"contains": {"type": "integer"}, "maxContains": 1});
    assert!(validate_with(Draft::Draft7, schema, json!([1, 2])).is_valid());
}

// ====== items Tests ======

#[test]
fn test_items_schema_applies_to_every_element() {
    let result = validate(json!({"items": {"type": "integer"}}), json!([1, "a", 2, "b"]));
    assert_eq!(
        locations(&result),
        vec![
            ("/1".to_string(), "#/items/type".to_string()),
            ("/3".to_string(), "#/items/type".to_string()),
        ]
    );
}

#[test]
fn test_prefix_items_and_items() {
    let schema = json!({
        "prefixItems": [{"type": "string"}, {"type": "boolean"}],
        "items": {"type": "integer"}
    });

    assert!(validate(schema.clone(), json!(["a", true, 1, 2])).is_valid());
    assert!(validate(schema.clone(), json!(["a"])).is_valid());

    let result = validate(schema, json!([1, true, "x"]));
    assert_eq!(
        locations(&result),
        vec![
            ("/0".to_string(), "#/prefixItems/0/type".to_string()),
            ("/2".to_string(), "#/items/type".to_string()),
        ]
    );
}

#[test]
fn test_items_false_after_prefix() {
    let schema = json!({"prefixItems": [true], "items": false});
    assert!(validate(schema.clone(), json!([1])).is_valid());
    assert!(!validate(schema, json!([1, 2])).is_valid());
}

#[test]
fn test_legacy_array_items() {
    let schema = json!({"items": [{"type": "string"}, {"type": "integer"}]});
    assert!(validate_with(Draft::Draft7, schema.clone(), json!(["a", 1, null])).is_valid());

    let result = validate_with(Draft::Draft7, schema, json!([1, 1]));
    assert_eq!(
        locations(&result),
        vec![("/0".to_string(), "#/items/0/type".to_string())]
    );
}

#[test]
fn test_additional_items_false() {
    let schema = json!({"items": [{}, {}], "additionalItems": false});
    assert!(validate_with(Draft::Draft4, schema.clone(), json!([1, 2])).is_valid());

    let result = validate_with(Draft::Draft4, schema, json!([1, 2, 3, 4]));
    assert_eq!(
        reasons(&result),
        vec![ValidationErrorReason::Applicators(Applicators::AdditionalItemsNotPermitted)]
    );
}

#[test]
fn test_additional_items_schema() {
    let schema = json!({"items": [{}], "additionalItems": {"type": "string"}});
    let result = validate_with(Draft::Draft201909, schema, json!([1, "a", 2]));
    assert_eq!(
        locations(&result),
        vec![("/2".to_string(), "#/additionalItems/type".to_string())]
    );
}

#[test]
fn test_additional_items_ignored_without_array_items() {
    let schema = json!({"items": {}, "additionalItems": false});
    assert!(validate_with(Draft::Draft7, schema, json!([1, 2, 3])).is_valid());
}
