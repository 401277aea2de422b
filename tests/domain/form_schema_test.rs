use serde_json::json;

use formscribe::domain::{FieldType, FormSchema, SchemaError};

#[test]
fn given_object_with_fields_when_normalizing_then_returns_ordered_schema() {
    let input = json!({
        "fields": [
            { "id": "patientName", "type": "text", "required": true },
            { "id": "patientAge", "type": "number" },
        ]
    });

    let schema = FormSchema::normalize(&input).unwrap();

    assert_eq!(schema.len(), 2);
    assert_eq!(schema.fields()[0].id, "patientName");
    assert!(schema.fields()[0].required);
    assert_eq!(schema.fields()[1].field_type, FieldType::Number);
    assert!(!schema.fields()[1].required);
}

#[test]
fn given_bare_list_when_normalizing_then_matches_wrapped_object_form() {
    let list = json!([
        { "id": "email", "type": "text", "required": true },
        { "id": "age", "type": "number" },
    ]);
    let wrapped = json!({ "fields": list.clone() });

    let from_list = FormSchema::normalize(&list).unwrap();
    let from_object = FormSchema::normalize(&wrapped).unwrap();

    assert_eq!(from_list.len(), from_object.len());
    for (left, right) in from_list.fields().iter().zip(from_object.fields()) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.field_type, right.field_type);
        assert_eq!(left.required, right.required);
    }
}

#[test]
fn given_json_encoded_string_when_normalizing_then_parses_inner_schema() {
    let input = json!(r#"{"fields": [{"id": "notes", "type": "textarea"}]}"#);

    let schema = FormSchema::normalize(&input).unwrap();

    assert_eq!(schema.len(), 1);
    assert_eq!(schema.fields()[0].field_type, FieldType::Textarea);
}

#[test]
fn given_invalid_json_string_when_normalizing_then_fails_with_invalid_json() {
    let input = json!("{not json");

    let error = FormSchema::normalize(&input).unwrap_err();

    assert!(matches!(error, SchemaError::InvalidJson(_)));
}

#[test]
fn given_object_without_fields_when_normalizing_then_fails_with_missing_fields() {
    let input = json!({ "title": "demo form" });

    let error = FormSchema::normalize(&input).unwrap_err();

    assert!(matches!(error, SchemaError::MissingFields));
}

#[test]
fn given_scalar_input_when_normalizing_then_fails_with_missing_fields() {
    let input = json!(42);

    let error = FormSchema::normalize(&input).unwrap_err();

    assert!(matches!(error, SchemaError::MissingFields));
}

#[test]
fn given_field_without_type_when_normalizing_then_fails_with_invalid_field() {
    let input = json!({ "fields": [ { "id": "name" } ] });

    let error = FormSchema::normalize(&input).unwrap_err();

    assert!(matches!(error, SchemaError::InvalidField(_)));
}

#[test]
fn given_non_boolean_required_when_normalizing_then_fails_with_invalid_field() {
    let input = json!({ "fields": [ { "id": "name", "type": "text", "required": "yes" } ] });

    let error = FormSchema::normalize(&input).unwrap_err();

    assert!(matches!(error, SchemaError::InvalidField(_)));
}

#[test]
fn given_duplicate_field_ids_when_normalizing_then_fails_with_invalid_field() {
    let input = json!({
        "fields": [
            { "id": "name", "type": "text" },
            { "id": "name", "type": "textarea" },
        ]
    });

    let error = FormSchema::normalize(&input).unwrap_err();

    assert!(matches!(error, SchemaError::InvalidField(_)));
}

#[test]
fn given_empty_field_id_when_normalizing_then_fails_with_invalid_field() {
    let input = json!({ "fields": [ { "id": "  ", "type": "text" } ] });

    let error = FormSchema::normalize(&input).unwrap_err();

    assert!(matches!(error, SchemaError::InvalidField(_)));
}

#[test]
fn given_unknown_type_label_when_normalizing_then_falls_back_to_text() {
    let input = json!({ "fields": [ { "id": "misc", "type": "widget" } ] });

    let schema = FormSchema::normalize(&input).unwrap();

    assert_eq!(schema.fields()[0].field_type, FieldType::Text);
}

#[test]
fn given_select_with_options_when_normalizing_then_preserves_option_order() {
    let input = json!({
        "fields": [
            {
                "id": "testResult",
                "type": "select",
                "options": ["Positive", "Negative", "Inconclusive"],
                "description": "Final test outcome",
            }
        ]
    });

    let schema = FormSchema::normalize(&input).unwrap();

    let field = &schema.fields()[0];
    assert_eq!(field.options, vec!["Positive", "Negative", "Inconclusive"]);
    assert_eq!(field.description.as_deref(), Some("Final test outcome"));
}
