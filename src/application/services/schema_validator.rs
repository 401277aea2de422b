use serde_json::{json, Map, Value};

use crate::domain::{FieldValue, FormSchema};

/// Re-derives a structural schema from the field list and reports which
/// required fields ended up absent or empty in a merged result.
///
/// Only `required` violations are surfaced; type mismatches are tolerated
/// in keeping with the best-effort contract.
pub struct SchemaValidator {
    required: Vec<String>,
    structural: Value,
}

impl SchemaValidator {
    pub fn new(schema: &FormSchema) -> Self {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in schema.fields() {
            properties.insert(
                field.id.clone(),
                json!({ "type": field.field_type.json_type() }),
            );
            if field.required {
                required.push(field.id.clone());
            }
        }

        let structural = json!({
            "type": "object",
            "properties": properties,
            "required": required,
        });

        Self { required, structural }
    }

    /// The derived JSON-schema-shaped structural description.
    pub fn structural_schema(&self) -> &Value {
        &self.structural
    }

    /// Required field ids whose value is absent or empty.
    pub fn missing_required(&self, fields: &[(String, FieldValue)]) -> Vec<String> {
        self.required
            .iter()
            .filter(|id| {
                fields
                    .iter()
                    .find(|(field_id, _)| field_id == *id)
                    .is_none_or(|(_, value)| value.is_empty())
            })
            .cloned()
            .collect()
    }
}
