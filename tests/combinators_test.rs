use schemata::error::{Applicators, Meta, TypeCheck};
use schemata::{Draft, ValidationErrorReason, ValidationResult, Validator};
use serde_json::{json, Value};

fn validate(schema: Value, instance: Value) -> ValidationResult {
    Validator::new(Draft::Draft202012)
        .validate(&schema, &instance)
        .unwrap()
}

fn keyword_locations(result: &ValidationResult) -> Vec<String> {
    result
        .errors()
        .map(|errors| errors.iter().map(|e| e.keyword_location.to_uri_fragment()).collect())
        .unwrap_or_default()
}

// ====== not Tests ======

#[test]
fn test_not_rejects_matching_instance() {
    let result = validate(json!({"not": {"type": "string"}}), json!("x"));
    let errors = result.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.first().reason,
        ValidationErrorReason::Applicators(Applicators::NotNotMet { instance: json!("x") })
    );
    assert_eq!(keyword_locations(&result), vec!["#/not"]);
}

#[test]
fn test_not_accepts_non_matching_instance() {
    assert!(validate(json!({"not": {"type": "string"}}), json!(1)).is_valid());
}

#[test]
fn test_not_false_accepts_everything() {
    assert!(validate(json!({"not": false}), json!(null)).is_valid());
    assert!(!validate(json!({"not": true}), json!(null)).is_valid());
}

// ====== oneOf Tests ======

#[test]
fn test_one_of_exactly_one_match() {
    let schema = json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]});
    assert!(validate(schema, json!(1)).is_valid());
}

#[test]
fn test_one_of_two_matches() {
    let schema = json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]});
    let result = validate(schema.clone(), json!(3));

    let errors = result.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.first().reason,
        ValidationErrorReason::Applicators(Applicators::OneOfNotMet {
            one_of: schema["oneOf"].clone(),
            instance: json!(3),
        })
    );
    assert_eq!(keyword_locations(&result), vec!["#/oneOf"]);
}

#[test]
fn test_one_of_with_type_guarded_branch() {
    let schema = json!({"oneOf": [{"type": "string"}, {"minLength": 1}]});
    assert!(!validate(schema.clone(), json!("x")).is_valid());
    assert!(validate(schema.clone(), json!("")).is_valid());
    // minLength ignores non-strings, so only the second branch accepts 5
    assert!(validate(schema, json!(5)).is_valid());
}

#[test]
fn test_one_of_no_match() {
    let schema = json!({"oneOf": [{"type": "string"}, {"type": "boolean"}]});
    assert!(!validate(schema, json!(3)).is_valid());
}

// ====== anyOf Tests ======

#[test]
fn test_any_of_no_match() {
    let result = validate(json!({"anyOf": [{"type": "string"}]}), json!(1));
    let errors = result.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.first().reason,
        ValidationErrorReason::Applicators(Applicators::AnyOfNotMet { instance: json!(1) })
    );
    assert_eq!(keyword_locations(&result), vec!["#/anyOf"]);
}

#[test]
fn test_any_of_any_match() {
    let schema = json!({"anyOf": [{"type": "string"}, {"type": "integer"}]});
    assert!(validate(schema, json!(1)).is_valid());
}

#[test]
fn test_any_of_stops_at_first_match() {
    // the second branch would be a fatal error if it were evaluated
    let schema = json!({"anyOf": [{"type": "integer"}, {"$ref": "#/$defs/missing"}]});
    assert!(validate(schema, json!(1)).is_valid());
}

#[test]
fn test_one_of_evaluates_every_branch() {
    let schema = json!({"oneOf": [{"type": "integer"}, {"$ref": "#/$defs/missing"}]});
    let err = Validator::new(Draft::Draft202012)
        .validate(&schema, &json!(1))
        .unwrap_err();
    assert!(err.to_string().contains("#/$defs/missing"));
}

// ====== allOf Tests ======

#[test]
fn test_all_of_concatenates_branch_errors() {
    let schema = json!({"allOf": [{"type": "string"}, {"minimum": 10}, true]});
    let result = validate(schema, json!(3));

    assert_eq!(keyword_locations(&result), vec!["#/allOf/0/type", "#/allOf/1/minimum"]);
    assert!(matches!(
        result.errors().unwrap().first().reason,
        ValidationErrorReason::TypeCheck(TypeCheck::InvalidType { .. })
    ));
}

#[test]
fn test_all_of_false_branch() {
    let result = validate(json!({"allOf": [true, false]}), json!(1));
    let errors = result.errors().unwrap();
    assert_eq!(errors.first().reason, ValidationErrorReason::Meta(Meta::FalsySchema));
    assert_eq!(keyword_locations(&result), vec!["#/allOf/1"]);
}

// ====== if/then/else Tests ======

#[test]
fn test_if_then_else_selects_branch() {
    let schema = json!({
        "if": {"type": "integer"},
        "then": {"minimum": 10},
        "else": {"type": "string"}
    });

    assert!(validate(schema.clone(), json!(12)).is_valid());
    assert!(validate(schema.clone(), json!("text")).is_valid());

    let result = validate(schema.clone(), json!(3));
    assert_eq!(keyword_locations(&result), vec!["#/then/minimum"]);

    let result = validate(schema, json!(null));
    assert_eq!(keyword_locations(&result), vec!["#/else/type"]);
}

#[test]
fn test_if_without_branches_never_fails() {
    assert!(validate(json!({"if": false}), json!(1)).is_valid());
    assert!(validate(json!({"if": true, "else": false}), json!(1)).is_valid());
}

#[test]
fn test_if_is_ignored_by_draft6() {
    let schema = json!({"if": true, "then": false});
    let validator = Validator::new(Draft::Draft6);
    assert!(validator.is_valid(&schema, &json!(1)).unwrap());
    assert!(!Validator::new(Draft::Draft7).is_valid(&schema, &json!(1)).unwrap());
}

// ====== Nested Tests ======

#[test]
fn test_nested_applicators_track_locations() {
    let schema = json!({
        "properties": {
            "value": {"anyOf": [{"type": "string"}, {"not": {"type": "integer"}}]}
        }
    });

    let result = validate(schema, json!({"value": 5}));
    let errors = result.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().instance_location.to_string(), "/value");
    assert_eq!(
        errors.first().keyword_location.to_uri_fragment(),
        "#/properties/value/anyOf"
    );
}
