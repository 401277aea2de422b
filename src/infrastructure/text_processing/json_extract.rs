use serde_json::Value;

/// Tolerant parse of model output into a JSON object.
///
/// Tries the whole string first; if that fails (models like to wrap JSON
/// in prose or fences), scans for the first balanced `{...}` substring
/// and parses that. Returns `None` when no object can be recovered.
pub fn parse_json_object(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if value.is_object() {
            return Some(value);
        }
    }

    let candidate = first_balanced_object(raw)?;
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)
}

/// First complete `{...}` span, tracking nesting depth and string state so
/// braces inside string literals do not confuse the scan.
fn first_balanced_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
