use formscribe::domain::{FieldSpec, FieldType, FieldValue, FormSchema};
use formscribe::infrastructure::text_processing::{extract_generic_fields, field_aliases};

fn schema(fields: Vec<FieldSpec>) -> FormSchema {
    FormSchema::from_fields(fields)
}

#[test]
fn given_camel_case_id_when_deriving_aliases_then_includes_spaced_and_joined_forms() {
    let aliases = field_aliases("patientName");

    assert!(aliases.contains(&"patientname".to_string()));
    assert!(aliases.contains(&"patient name".to_string()));
}

#[test]
fn given_snake_case_id_when_deriving_aliases_then_splits_tokens() {
    let aliases = field_aliases("health_worker_id");

    assert!(aliases.contains(&"health worker id".to_string()));
    assert!(aliases.contains(&"healthworkerid".to_string()));
}

#[test]
fn given_id_ending_in_date_when_deriving_aliases_then_adds_dateless_contraction() {
    let aliases = field_aliases("symptomsDate");

    assert!(aliases.contains(&"symptoms".to_string()));
}

#[test]
fn given_birth_date_id_when_deriving_aliases_then_adds_dob() {
    let aliases = field_aliases("dateOfBirth");

    assert!(aliases.contains(&"dob".to_string()));
}

#[test]
fn given_labeled_line_when_extracting_then_assigns_value_to_matching_field() {
    let schema = schema(vec![FieldSpec::new("patientName", FieldType::Text)]);
    let text = "Patient Name: Janet Yakubu";

    let extracted = extract_generic_fields(text, &schema);

    assert_eq!(
        extracted.get("patientName"),
        Some(&FieldValue::Text("Janet Yakubu".to_string()))
    );
}

#[test]
fn given_equals_separator_when_extracting_then_matches_like_colon() {
    let schema = schema(vec![FieldSpec::new("location", FieldType::Text)]);
    let text = "location = Wuse clinic";

    let extracted = extract_generic_fields(text, &schema);

    assert_eq!(
        extracted.get("location"),
        Some(&FieldValue::Text("Wuse clinic".to_string()))
    );
}

#[test]
fn given_number_field_when_extracting_then_takes_first_numeric_substring() {
    let schema = schema(vec![FieldSpec::new("patientAge", FieldType::Number)]);
    let text = "Age: 21 years old";

    let extracted = extract_generic_fields(text, &schema);

    assert_eq!(extracted.get("patientAge"), Some(&FieldValue::Number(21.0)));
}

#[test]
fn given_boolean_field_when_extracting_then_parses_yes_no_vocabulary() {
    let schema = schema(vec![FieldSpec::new("followUpRequired", FieldType::Boolean)]);

    let extracted = extract_generic_fields("Follow Up Required: yes", &schema);
    assert_eq!(extracted.get("followUpRequired"), Some(&FieldValue::Bool(true)));

    let extracted = extract_generic_fields("Follow Up Required: No", &schema);
    assert_eq!(extracted.get("followUpRequired"), Some(&FieldValue::Bool(false)));
}

#[test]
fn given_date_field_when_extracting_then_normalizes_to_iso() {
    let schema = schema(vec![FieldSpec::new("symptomsDate", FieldType::Date)]);
    let text = "Symptoms Date: 17/08/2025";

    let extracted = extract_generic_fields(text, &schema);

    assert_eq!(
        extracted.get("symptomsDate"),
        Some(&FieldValue::Text("2025-08-17".to_string()))
    );
}

#[test]
fn given_multiselect_field_when_extracting_then_fuzzy_matches_options() {
    let schema = schema(vec![FieldSpec::new("reportedSymptoms", FieldType::Multiselect)
        .with_options(["Fever", "Headache", "Chills"])]);
    let text = "Reported Symptoms: fever; severe headache, rash";

    let extracted = extract_generic_fields(text, &schema);

    assert_eq!(
        extracted.get("reportedSymptoms"),
        Some(&FieldValue::List(vec![
            "Fever".to_string(),
            "Headache".to_string(),
            "rash".to_string(),
        ]))
    );
}

#[test]
fn given_select_field_when_extracting_then_falls_back_to_raw_on_no_option_match() {
    let schema = schema(vec![
        FieldSpec::new("testResult", FieldType::Select).with_options(["Positive", "Negative"])
    ]);

    let extracted = extract_generic_fields("Test Result: positive", &schema);
    assert_eq!(
        extracted.get("testResult"),
        Some(&FieldValue::Text("Positive".to_string()))
    );

    let extracted = extract_generic_fields("Test Result: pending", &schema);
    assert_eq!(
        extracted.get("testResult"),
        Some(&FieldValue::Text("pending".to_string()))
    );
}

#[test]
fn given_two_fields_tied_on_score_when_extracting_then_first_field_keeps_the_value() {
    // Both ids alias to "notes" with an exact match; the earlier field wins.
    let schema = schema(vec![
        FieldSpec::new("notes", FieldType::Text),
        FieldSpec::new("Notes", FieldType::Text),
    ]);
    let text = "notes: follow up next week";

    let extracted = extract_generic_fields(text, &schema);

    assert_eq!(
        extracted.get("notes"),
        Some(&FieldValue::Text("follow up next week".to_string()))
    );
    assert_eq!(extracted.get("Notes"), None);
}

#[test]
fn given_unrelated_key_when_extracting_then_field_stays_absent() {
    let schema = schema(vec![FieldSpec::new("patientName", FieldType::Text)]);
    let text = "Vehicle Registration: ABC-123";

    let extracted = extract_generic_fields(text, &schema);

    assert!(extracted.is_empty());
}

#[test]
fn given_garbled_input_when_extracting_then_never_panics() {
    let schema = schema(vec![
        FieldSpec::new("patientAge", FieldType::Number),
        FieldSpec::new("symptomsDate", FieldType::Date),
    ]);
    let text = ":::\n===\nAge: not-a-number\nSymptoms Date: 2025-99-99\n";

    let extracted = extract_generic_fields(text, &schema);

    assert_eq!(extracted.get("symptomsDate"), None);
}
