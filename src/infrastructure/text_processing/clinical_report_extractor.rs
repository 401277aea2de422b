use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::domain::{FieldValue, FormSchema};

use super::date_parser;
use super::field_coercion::{first_number, parse_bool};

/// Closed vocabulary of symptoms recognized by the report heuristic.
const SYMPTOM_VOCAB: &[&str] = &[
    "fever",
    "headache",
    "chills",
    "cough",
    "nausea",
    "vomiting",
    "diarrhea",
    "fatigue",
    "body pain",
    "muscle pain",
    "sore throat",
    "loss of appetite",
    "sweats",
    "weakness",
    "dizziness",
];

/// Known community-health field vocabulary: canonical field id plus the
/// label synonyms that mark it in a report. Checked in order; the first
/// concept whose label matches a line's key wins that line.
struct Concept {
    id: &'static str,
    labels: &'static [&'static str],
}

const CONCEPTS: &[Concept] = &[
    Concept { id: "patientName", labels: &["patient name", "name"] },
    Concept { id: "patientAge", labels: &["age"] },
    Concept { id: "patientGender", labels: &["gender", "sex"] },
    Concept {
        id: "symptomsDate",
        labels: &["symptoms date", "date of symptoms", "onset date", "date"],
    },
    Concept { id: "reportedSymptoms", labels: &["symptoms", "reported symptoms"] },
    Concept { id: "testResult", labels: &["test result", "result"] },
    Concept {
        id: "treatmentProvided",
        labels: &["treatment provided", "treatment", "therapy", "medication"],
    },
    Concept {
        id: "healthWorkerId",
        labels: &["health worker id", "hw id", "staff id", "worker id"],
    },
    Concept { id: "location", labels: &["location"] },
    Concept { id: "followUpRequired", labels: &["follow up", "follow-up", "followup"] },
    Concept { id: "notes", labels: &["notes", "remarks", "comments", "observation"] },
];

static NAME_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bName\s*:\s*([A-Za-z][A-Za-z.'-]+\s+[A-Za-z][A-Za-z.'-]+)").unwrap()
});
static AGE_FALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAge\s*:\s*(\d{1,3})\b").unwrap());
static GENDER_FALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:Gender|Sex)\s*:\s*(Male|Female|M|F)\b").unwrap());

/// Fixed-vocabulary report scanner.
///
/// Binds schema fields to the known concepts by canonical id, runs a
/// line-oriented `key: value` pass with per-concept post-processing, then
/// a whole-text regex pass for fields the line scan left empty, to
/// tolerate free-flowing prose. Pure and infallible: unmatched or garbled
/// input just yields fewer entries.
pub fn extract_clinical_fields(text: &str, schema: &FormSchema) -> HashMap<String, FieldValue> {
    // concept index -> schema field id
    let mut bound: HashMap<usize, String> = HashMap::new();
    for field in schema.fields() {
        let key = canonical_key(&field.id);
        if let Some(index) = CONCEPTS.iter().position(|c| canonical_key(c.id) == key) {
            bound.entry(index).or_insert_with(|| field.id.clone());
        }
    }
    if bound.is_empty() {
        return HashMap::new();
    }

    let mut values: HashMap<usize, FieldValue> = HashMap::new();

    for raw_line in text.lines() {
        let line = normalize_line(raw_line);
        if line.is_empty() {
            continue;
        }

        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (line.clone(), String::new()),
        };
        let key = key.to_lowercase();

        let Some(index) = CONCEPTS
            .iter()
            .position(|concept| concept.labels.iter().any(|label| key.contains(label)))
        else {
            continue;
        };
        if !bound.contains_key(&index) {
            continue;
        }

        let fallback_source = if value.is_empty() { key.as_str() } else { value.as_str() };
        if let Some(parsed) = parse_concept(CONCEPTS[index].id, &value, fallback_source) {
            values.insert(index, parsed);
        }
    }

    // Whole-text fallbacks for prose without key:value lines.
    for (index, concept) in CONCEPTS.iter().enumerate() {
        if !bound.contains_key(&index) || values.contains_key(&index) {
            continue;
        }
        let parsed = match concept.id {
            "patientName" => NAME_FALLBACK
                .captures(text)
                .map(|caps| FieldValue::Text(caps[1].trim().to_string())),
            "patientAge" => AGE_FALLBACK
                .captures(text)
                .and_then(|caps| caps[1].parse::<f64>().ok())
                .map(FieldValue::Number),
            "patientGender" => GENDER_FALLBACK
                .captures(text)
                .map(|caps| FieldValue::Text(normalize_gender(&caps[1]))),
            "symptomsDate" => date_parser::normalize_date(text).map(FieldValue::Text),
            "reportedSymptoms" => {
                let symptoms = split_symptoms(text);
                if symptoms.is_empty() {
                    None
                } else {
                    Some(FieldValue::List(symptoms))
                }
            }
            "followUpRequired" => parse_bool(text).map(FieldValue::Bool),
            _ => None,
        };
        if let Some(parsed) = parsed {
            values.insert(index, parsed);
        }
    }

    values
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(index, value)| (bound[&index].clone(), value))
        .collect()
}

fn parse_concept(concept_id: &str, value: &str, fallback_source: &str) -> Option<FieldValue> {
    match concept_id {
        "patientName" | "treatmentProvided" | "location" | "notes" => {
            if value.is_empty() {
                None
            } else {
                Some(FieldValue::Text(value.to_string()))
            }
        }
        "patientAge" => first_number(fallback_source)
            .filter(|n| (0.0..1000.0).contains(n))
            .map(FieldValue::Number),
        "patientGender" => {
            let lowered = fallback_source.to_lowercase();
            let trimmed = lowered.trim();
            if lowered.contains("female") || trimmed == "f" {
                Some(FieldValue::Text("Female".to_string()))
            } else if lowered.contains("male") || trimmed == "m" {
                Some(FieldValue::Text("Male".to_string()))
            } else {
                None
            }
        }
        "symptomsDate" => date_parser::normalize_date(fallback_source).map(FieldValue::Text),
        "reportedSymptoms" => {
            let symptoms = split_symptoms(value);
            if symptoms.is_empty() {
                None
            } else {
                Some(FieldValue::List(symptoms))
            }
        }
        "testResult" => {
            let lowered = fallback_source.to_lowercase();
            let normalized = if lowered.contains("positive") {
                "Positive".to_string()
            } else if lowered.contains("negative") {
                "Negative".to_string()
            } else if lowered.contains("inconclusive") {
                "Inconclusive".to_string()
            } else if value.is_empty() {
                return None;
            } else {
                value.to_string()
            };
            Some(FieldValue::Text(normalized))
        }
        "healthWorkerId" => {
            let cleaned: String = value
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(FieldValue::Text(cleaned))
            }
        }
        "followUpRequired" => parse_bool(fallback_source).map(FieldValue::Bool),
        _ => None,
    }
}

/// NFKC-normalize and strip bullet, checkbox, and bracket noise that OCR
/// tends to leave at line edges.
fn normalize_line(line: &str) -> String {
    let normalized: String = line.nfkc().collect();
    normalized
        .trim_matches(|c: char| "•·-—–*☒☐✓✔✗[]() \t\r\n".contains(c))
        .to_string()
}

fn normalize_gender(raw: &str) -> String {
    if raw.to_lowercase().starts_with('f') {
        "Female".to_string()
    } else {
        "Male".to_string()
    }
}

/// Split a free-text symptoms phrase on commas and semicolons, keeping
/// only known vocabulary terms (matched as substrings to survive noise).
fn split_symptoms(input: &str) -> Vec<String> {
    let lowered = input.to_lowercase();
    let mut found = Vec::new();

    for part in lowered.split([';', ',']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if SYMPTOM_VOCAB.contains(&part) {
            if !found.iter().any(|s| s == part) {
                found.push(part.to_string());
            }
            continue;
        }
        for term in SYMPTOM_VOCAB {
            if part.contains(term) && !found.iter().any(|s| s == term) {
                found.push((*term).to_string());
            }
        }
    }

    found
}

fn canonical_key(id: &str) -> String {
    id.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}
