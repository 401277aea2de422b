mod clinical_report_extractor;
mod date_parser;
mod field_coercion;
mod generic_field_extractor;
mod json_extract;

pub use clinical_report_extractor::extract_clinical_fields;
pub use date_parser::{format_date, normalize_date, parse_date};
pub use field_coercion::{coerce_value, first_number, parse_bool};
pub use generic_field_extractor::{extract_generic_fields, field_aliases};
pub use json_extract::parse_json_object;
