use formscribe::domain::{FieldSpec, FieldType, FieldValue, FormSchema};
use formscribe::infrastructure::text_processing::extract_clinical_fields;

fn report_schema() -> FormSchema {
    FormSchema::from_fields(vec![
        FieldSpec::new("patientName", FieldType::Text).required(),
        FieldSpec::new("patientAge", FieldType::Number).required(),
        FieldSpec::new("patientGender", FieldType::Select).with_options(["Male", "Female"]),
        FieldSpec::new("symptomsDate", FieldType::Date),
        FieldSpec::new("reportedSymptoms", FieldType::Multiselect),
        FieldSpec::new("testResult", FieldType::Select)
            .with_options(["Positive", "Negative", "Inconclusive"]),
        FieldSpec::new("healthWorkerId", FieldType::Text),
        FieldSpec::new("followUpRequired", FieldType::Boolean),
        FieldSpec::new("notes", FieldType::Textarea),
    ])
}

#[test]
fn given_key_value_report_when_extracting_then_fills_known_fields() {
    let text = "\
Patient Name: Abeni Coker
Age: 21
Gender: Female
Symptoms Date: 17/08/2025
Symptoms: headache, body pains, drowsiness
Test Result: malaria positive
Health Worker ID: HW-0042!
Follow up: yes
Notes: responded well to treatment";

    let extracted = extract_clinical_fields(text, &report_schema());

    assert_eq!(
        extracted.get("patientName"),
        Some(&FieldValue::Text("Abeni Coker".to_string()))
    );
    assert_eq!(extracted.get("patientAge"), Some(&FieldValue::Number(21.0)));
    assert_eq!(
        extracted.get("patientGender"),
        Some(&FieldValue::Text("Female".to_string()))
    );
    assert_eq!(
        extracted.get("symptomsDate"),
        Some(&FieldValue::Text("2025-08-17".to_string()))
    );
    assert_eq!(
        extracted.get("reportedSymptoms"),
        Some(&FieldValue::List(vec![
            "headache".to_string(),
            "body pain".to_string(),
        ]))
    );
    assert_eq!(
        extracted.get("testResult"),
        Some(&FieldValue::Text("Positive".to_string()))
    );
    assert_eq!(
        extracted.get("healthWorkerId"),
        Some(&FieldValue::Text("HW-0042".to_string()))
    );
    assert_eq!(extracted.get("followUpRequired"), Some(&FieldValue::Bool(true)));
    assert_eq!(
        extracted.get("notes"),
        Some(&FieldValue::Text("responded well to treatment".to_string()))
    );
}

#[test]
fn given_bulleted_ocr_lines_when_extracting_then_strips_markers() {
    let text = "• Patient Name: Janet Yakubu\n☒ Follow-up: no";

    let extracted = extract_clinical_fields(text, &report_schema());

    assert_eq!(
        extracted.get("patientName"),
        Some(&FieldValue::Text("Janet Yakubu".to_string()))
    );
    assert_eq!(extracted.get("followUpRequired"), Some(&FieldValue::Bool(false)));
}

#[test]
fn given_inconclusive_result_when_extracting_then_normalizes_to_canonical_label() {
    let extracted = extract_clinical_fields("Result: seems inconclusive", &report_schema());

    assert_eq!(
        extracted.get("testResult"),
        Some(&FieldValue::Text("Inconclusive".to_string()))
    );
}

#[test]
fn given_free_flowing_prose_when_line_scan_finds_nothing_then_regex_fallbacks_apply() {
    let text = "Seen at the outreach post. Name: Abeni Coker, Age: 21, reported fever and chills since 17 Aug 2025.";

    let extracted = extract_clinical_fields(text, &report_schema());

    assert_eq!(
        extracted.get("patientAge"),
        Some(&FieldValue::Number(21.0))
    );
    assert_eq!(
        extracted.get("symptomsDate"),
        Some(&FieldValue::Text("2025-08-17".to_string()))
    );
    let symptoms = extracted.get("reportedSymptoms").unwrap();
    assert_eq!(
        symptoms,
        &FieldValue::List(vec!["fever".to_string(), "chills".to_string()])
    );
}

#[test]
fn given_schema_without_known_vocabulary_when_extracting_then_returns_nothing() {
    let schema = FormSchema::from_fields(vec![
        FieldSpec::new("invoiceNumber", FieldType::Text),
        FieldSpec::new("totalAmount", FieldType::Number),
    ]);

    let extracted = extract_clinical_fields("Name: Abeni Coker\nAge: 21", &schema);

    assert!(extracted.is_empty());
}

#[test]
fn given_snake_case_schema_ids_when_extracting_then_binds_by_canonical_id() {
    let schema = FormSchema::from_fields(vec![FieldSpec::new("patient_name", FieldType::Text)]);

    let extracted = extract_clinical_fields("Patient Name: Abeni Coker", &schema);

    assert_eq!(
        extracted.get("patient_name"),
        Some(&FieldValue::Text("Abeni Coker".to_string()))
    );
}

#[test]
fn given_gender_shorthand_when_extracting_then_expands_to_full_label() {
    let extracted = extract_clinical_fields("Sex: F", &report_schema());

    assert_eq!(
        extracted.get("patientGender"),
        Some(&FieldValue::Text("Female".to_string()))
    );
}

#[test]
fn given_empty_text_when_extracting_then_returns_empty_map() {
    assert!(extract_clinical_fields("", &report_schema()).is_empty());
}
