mod extraction;
mod field_spec;
mod field_value;
mod form_schema;
mod ocr_block;

pub use extraction::{ExtractionResult, UsageMetrics};
pub use field_spec::{FieldSpec, FieldType};
pub use field_value::FieldValue;
pub use form_schema::{FormSchema, SchemaError};
pub use ocr_block::OcrBlock;
