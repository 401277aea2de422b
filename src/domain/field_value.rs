use serde_json::Value;

use super::field_spec::FieldType;

/// An extracted value, tagged by the owning field's declared type.
///
/// `Empty` is the "unknown" value; it serializes to the type-appropriate
/// default (empty string, null, or empty list).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<String>),
    Empty,
}

impl FieldValue {
    /// Whether this value counts as "no answer" for merging and
    /// required-field validation.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// The default stand-in for a field that no source answered.
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Multiselect => Self::List(Vec::new()),
            FieldType::Number | FieldType::Boolean => Self::Empty,
            _ => Self::Text(String::new()),
        }
    }

    /// Coerce a raw model-output value into the field's declared type.
    /// Anything that does not fit becomes `Empty` rather than an error.
    pub fn from_json(value: &Value, field_type: FieldType) -> Self {
        if value.is_null() {
            return Self::Empty;
        }

        match field_type {
            FieldType::Number => match value {
                Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Empty),
                Value::String(s) => s.trim().parse::<f64>().map(Self::Number).unwrap_or(Self::Empty),
                _ => Self::Empty,
            },
            FieldType::Boolean => match value {
                Value::Bool(b) => Self::Bool(*b),
                Value::String(s) => match s.trim().to_lowercase().as_str() {
                    "true" | "yes" | "1" => Self::Bool(true),
                    "false" | "no" | "0" => Self::Bool(false),
                    _ => Self::Empty,
                },
                _ => Self::Empty,
            },
            FieldType::Multiselect => match value {
                Value::Array(items) => Self::List(
                    items
                        .iter()
                        .map(|v| match v {
                            Value::String(s) => s.trim().to_string(),
                            other => other.to_string(),
                        })
                        .filter(|s| !s.is_empty())
                        .collect(),
                ),
                Value::String(s) => {
                    let items: Vec<String> = s
                        .split([';', ','])
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect();
                    Self::List(items)
                }
                _ => Self::Empty,
            },
            _ => match value {
                Value::String(s) => Self::Text(s.clone()),
                Value::Number(n) => Self::Text(n.to_string()),
                Value::Bool(b) => Self::Text(b.to_string()),
                Value::Array(items) => Self::Text(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
                _ => Self::Empty,
            },
        }
    }

    /// Render for the response body, honoring per-type defaults for `Empty`.
    pub fn to_json(&self, field_type: FieldType) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Bool(b) => Value::Bool(*b),
            Self::List(items) => {
                Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
            }
            Self::Empty => match field_type {
                FieldType::Multiselect => Value::Array(Vec::new()),
                FieldType::Number | FieldType::Boolean => Value::Null,
                _ => Value::String(String::new()),
            },
        }
    }
}
