use formscribe::application::services::{build_extraction_prompt, build_strict_retry_prompt};
use formscribe::domain::{FieldSpec, FieldType, FormSchema};

fn schema() -> FormSchema {
    FormSchema::from_fields(vec![
        FieldSpec::new("patientName", FieldType::Text).required(),
        FieldSpec::new("testResult", FieldType::Select)
            .with_options(["Positive", "Negative"])
            .with_description("Final test outcome"),
    ])
}

#[test]
fn given_schema_when_building_prompt_then_lists_every_field_with_type_and_requirement() {
    let prompt = build_extraction_prompt(&schema(), "Name: Janet");

    assert!(prompt.contains("- patientName (text, REQUIRED)"));
    assert!(prompt.contains("- testResult (select, optional)"));
}

#[test]
fn given_options_and_description_when_building_prompt_then_renders_both() {
    let prompt = build_extraction_prompt(&schema(), "Name: Janet");

    assert!(prompt.contains("Valid options: Positive, Negative"));
    assert!(prompt.contains("Description: Final test outcome"));
}

#[test]
fn given_source_text_when_building_prompt_then_appends_it_after_field_list() {
    let prompt = build_extraction_prompt(&schema(), "Name: Janet Yakubu");

    assert!(prompt.contains("Text to extract from:"));
    assert!(prompt.ends_with("Name: Janet Yakubu"));
}

#[test]
fn given_prompt_when_building_then_demands_json_only_output() {
    let prompt = build_extraction_prompt(&schema(), "irrelevant");

    assert!(prompt.starts_with("You are an information extraction engine."));
    assert!(prompt.contains("Return ONLY a valid JSON object"));
    assert!(prompt.contains("No prose, no explanations, no Markdown."));
}

#[test]
fn given_strict_variant_when_building_then_appends_null_instruction() {
    let base = build_extraction_prompt(&schema(), "text");
    let strict = build_strict_retry_prompt(&schema(), "text");

    assert!(strict.starts_with(&base));
    assert!(strict.ends_with("Respond ONLY with JSON. If a field is unknown, put null."));
}
