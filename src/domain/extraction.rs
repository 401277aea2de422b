use super::field_value::FieldValue;

/// Token, cost, and timing accounting for one extraction call.
#[derive(Debug, Clone, Default)]
pub struct UsageMetrics {
    pub tokens_in: u32,
    pub tokens_out: u32,
    /// Unset when the resolved model has no entry in the pricing table.
    pub cost_usd: Option<f64>,
    pub elapsed_ms: u64,
    pub provider: String,
    pub model: String,
}

/// Best-effort extraction outcome: one value per schema field, the set of
/// required fields that ended up empty, and the usage accounting.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Schema-ordered (field id, value) pairs, one per schema field.
    pub fields: Vec<(String, FieldValue)>,
    pub missing_required: Vec<String>,
    pub usage: UsageMetrics,
}

impl ExtractionResult {
    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_id, _)| field_id == id)
            .map(|(_, value)| value)
    }
}
