use std::collections::HashSet;

use serde_json::Value;

use super::field_spec::{FieldSpec, FieldType};

/// Malformed caller schema. Raised before any heuristic or model call.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("form schema is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("form schema must be an object with a 'fields' list")]
    MissingFields,
    #[error("invalid field entry: {0}")]
    InvalidField(String),
}

/// Ordered, canonicalized form schema. Immutable once normalized.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn from_fields(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Normalize a schema value of unknown shape.
    ///
    /// Accepts an object with a `fields` list, a bare list of field
    /// objects, or a JSON-encoded string of either.
    pub fn normalize(input: &Value) -> Result<Self, SchemaError> {
        let parsed;
        let mut data = input;

        if let Value::String(raw) = input {
            parsed = serde_json::from_str::<Value>(raw)
                .map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
            data = &parsed;
        }

        let wrapped;
        if data.is_array() {
            wrapped = serde_json::json!({ "fields": data });
            data = &wrapped;
        }

        let fields = data
            .as_object()
            .and_then(|obj| obj.get("fields"))
            .and_then(Value::as_array)
            .ok_or(SchemaError::MissingFields)?;

        let mut normalized = Vec::with_capacity(fields.len());
        let mut seen = HashSet::new();

        for entry in fields {
            let entry = entry
                .as_object()
                .ok_or_else(|| SchemaError::InvalidField("each field must be an object".into()))?;

            let id = entry.get("id").and_then(Value::as_str).ok_or_else(|| {
                SchemaError::InvalidField("each field needs 'id' (string) and 'type' (string)".into())
            })?;
            let type_label = entry.get("type").and_then(Value::as_str).ok_or_else(|| {
                SchemaError::InvalidField("each field needs 'id' (string) and 'type' (string)".into())
            })?;

            if id.trim().is_empty() {
                return Err(SchemaError::InvalidField("field 'id' must be non-empty".into()));
            }
            if !seen.insert(id.to_string()) {
                return Err(SchemaError::InvalidField(format!("duplicate field id '{id}'")));
            }

            let required = match entry.get("required") {
                None | Some(Value::Null) => false,
                Some(Value::Bool(b)) => *b,
                Some(_) => {
                    return Err(SchemaError::InvalidField(
                        "'required' must be boolean when provided".into(),
                    ))
                }
            };

            let options = entry
                .get("options")
                .and_then(Value::as_array)
                .map(|opts| {
                    opts.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            let description = entry
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string);

            normalized.push(FieldSpec {
                id: id.to_string(),
                field_type: FieldType::from_label(type_label),
                required,
                options,
                description,
            });
        }

        Ok(Self { fields: normalized })
    }

    /// Normalize directly from a JSON-encoded string, as received in
    /// multipart form fields.
    pub fn normalize_str(raw: &str) -> Result<Self, SchemaError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
        Self::normalize(&value)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
