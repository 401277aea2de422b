use crate::domain::{FieldSpec, FormSchema};

/// Render the extraction instruction block for one request: a JSON-only
/// rule, the schema's field list, and the source text.
pub fn build_extraction_prompt(schema: &FormSchema, source_text: &str) -> String {
    let mut lines = Vec::with_capacity(schema.len() + 8);

    lines.push("You are an information extraction engine.".to_string());
    lines.push(
        "Return ONLY a valid JSON object whose keys exactly match the field ids below."
            .to_string(),
    );
    lines.push("Rules: No prose, no explanations, no Markdown.".to_string());
    lines.push(String::new());
    lines.push("Fields to extract:".to_string());

    for field in schema.fields() {
        lines.push(render_field_line(field));
    }

    lines.push(String::new());
    lines.push("Text to extract from:".to_string());
    lines.push(source_text.to_string());

    lines.join("\n")
}

/// Retry variant sent after an unparsable response.
pub fn build_strict_retry_prompt(schema: &FormSchema, source_text: &str) -> String {
    format!(
        "{}\nRespond ONLY with JSON. If a field is unknown, put null.",
        build_extraction_prompt(schema, source_text)
    )
}

fn render_field_line(field: &FieldSpec) -> String {
    let requirement = if field.required { "REQUIRED" } else { "optional" };
    let mut line = format!("- {} ({}, {})", field.id, field.field_type.as_str(), requirement);

    if !field.options.is_empty() {
        line.push_str(&format!(" - Valid options: {}", field.options.join(", ")));
    }
    if let Some(description) = &field.description {
        line.push_str(&format!(" - Description: {description}"));
    }

    line
}
