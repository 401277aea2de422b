use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{FieldSpec, FieldType, FieldValue};

use super::date_parser;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").unwrap());

/// Parse a yes/no style token. Returns `None` for anything outside the
/// recognized vocabulary.
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" => Some(true),
        "no" | "n" | "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// First numeric substring of `input`, if any.
pub fn first_number(input: &str) -> Option<f64> {
    FIRST_NUMBER
        .find(input)
        .and_then(|m| m.as_str().parse().ok())
}

/// Coerce a raw matched string into the field's declared type. A value
/// that does not fit yields `Empty`, never an error.
pub fn coerce_value(raw: &str, field: &FieldSpec) -> FieldValue {
    let raw = raw.trim();
    if raw.is_empty() {
        return FieldValue::Empty;
    }

    match field.field_type {
        FieldType::Number => first_number(raw).map(FieldValue::Number).unwrap_or(FieldValue::Empty),
        FieldType::Boolean => parse_bool(raw).map(FieldValue::Bool).unwrap_or(FieldValue::Empty),
        FieldType::Date => date_parser::normalize_date(raw)
            .map(FieldValue::Text)
            .unwrap_or(FieldValue::Empty),
        FieldType::Multiselect => {
            let items: Vec<String> = raw
                .split([';', ','])
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| match_option(token, &field.options).unwrap_or_else(|| token.to_string()))
                .collect();
            if items.is_empty() {
                FieldValue::Empty
            } else {
                FieldValue::List(items)
            }
        }
        FieldType::Select => FieldValue::Text(
            match_option(raw, &field.options).unwrap_or_else(|| raw.to_string()),
        ),
        FieldType::Text | FieldType::Textarea => FieldValue::Text(raw.to_string()),
    }
}

/// Resolve a token against declared options: exact match first, then
/// substring containment either way. Returns the canonical option text.
fn match_option(token: &str, options: &[String]) -> Option<String> {
    let lowered = token.to_lowercase();

    options
        .iter()
        .find(|option| option.to_lowercase() == lowered)
        .or_else(|| {
            options.iter().find(|option| {
                let candidate = option.to_lowercase();
                candidate.contains(&lowered) || lowered.contains(&candidate)
            })
        })
        .cloned()
}
