use std::collections::{HashMap, HashSet};

use crate::domain::{FieldValue, FormSchema};

use super::field_coercion::coerce_value;

/// Minimum score for a key to be assigned to a field at all.
const MATCH_THRESHOLD: u32 = 40;

/// Schema-agnostic line scanner.
///
/// Walks `key: value` / `key = value` lines, scores every candidate key
/// against alias sets derived from the schema's field ids, and keeps the
/// best-scoring value per field. Tolerates garbled input and never fails
/// on an absent match; fields with no usable line are simply missing from
/// the returned map.
pub fn extract_generic_fields(text: &str, schema: &FormSchema) -> HashMap<String, FieldValue> {
    let aliases: Vec<Vec<String>> = schema
        .fields()
        .iter()
        .map(|field| field_aliases(&field.id))
        .collect();

    // Best (score, raw value) seen so far, keyed by field index.
    let mut best: HashMap<usize, (u32, String)> = HashMap::new();

    for line in text.lines() {
        let Some((key, value)) = split_key_value(line) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        let mut line_best: Option<(usize, u32)> = None;
        for (index, field_aliases) in aliases.iter().enumerate() {
            let score = match_score(&key, field_aliases);
            if score < MATCH_THRESHOLD {
                continue;
            }
            // First field reaching the high-water mark keeps it.
            if line_best.is_none_or(|(_, high)| score > high) {
                line_best = Some((index, score));
            }
        }

        if let Some((index, score)) = line_best {
            let entry = best.entry(index).or_insert((0, String::new()));
            if score > entry.0 {
                *entry = (score, value.to_string());
            }
        }
    }

    let mut extracted = HashMap::new();
    for (index, (_, raw)) in best {
        let field = &schema.fields()[index];
        let value = coerce_value(&raw, field);
        if !value.is_empty() {
            extracted.insert(field.id.clone(), value);
        }
    }
    extracted
}

/// Alias strings for a field id: the id itself, its tokens spaced and
/// joined, plus domain contractions (a trailing "date" token dropped, and
/// "dob" for birth-date style ids). All lowercase.
pub fn field_aliases(id: &str) -> Vec<String> {
    let tokens = split_ident(id);
    let mut aliases = vec![
        id.to_lowercase(),
        tokens.join(" "),
        tokens.concat(),
    ];

    if tokens.len() > 1 && tokens.last().map(String::as_str) == Some("date") {
        aliases.push(tokens[..tokens.len() - 1].join(" "));
    }
    if tokens.iter().any(|t| t == "date") && tokens.iter().any(|t| t == "birth") {
        aliases.push("dob".to_string());
    }

    let mut seen = HashSet::new();
    aliases.retain(|alias| !alias.is_empty() && seen.insert(alias.clone()));
    aliases
}

/// Split a camelCase / snake_case identifier into lowercase tokens.
fn split_ident(id: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in id.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn split_key_value(line: &str) -> Option<(String, &str)> {
    let separator = line.find([':', '='])?;
    let key = line[..separator].trim().to_lowercase();
    let value = line[separator + 1..].trim();

    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Score a candidate key against one field's alias set: exact equality
/// 100, substring containment 80, token-set Jaccard overlap up to 60.
fn match_score(key: &str, aliases: &[String]) -> u32 {
    let key_tokens: HashSet<&str> = key.split_whitespace().collect();
    let mut best = 0;

    for alias in aliases {
        let score = if key == *alias {
            100
        } else if key.contains(alias.as_str()) || alias.contains(key) {
            80
        } else {
            let alias_tokens: HashSet<&str> = alias.split_whitespace().collect();
            (60.0 * jaccard(&key_tokens, &alias_tokens)) as u32
        };
        best = best.max(score);
    }

    best
}

fn jaccard(left: &HashSet<&str>, right: &HashSet<&str>) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = left.intersection(right).count();
    let union = left.union(right).count();
    intersection as f64 / union as f64
}
