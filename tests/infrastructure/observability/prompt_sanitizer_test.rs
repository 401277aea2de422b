use formscribe::infrastructure::observability::sanitize_prompt;

#[test]
fn given_short_text_when_sanitizing_then_returns_trimmed_text() {
    assert_eq!(sanitize_prompt("  Name: Janet  "), "Name: Janet");
}

#[test]
fn given_empty_text_when_sanitizing_then_returns_placeholder() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_long_text_when_sanitizing_then_truncates_with_char_count() {
    let long = "x".repeat(250);

    let sanitized = sanitize_prompt(&long);

    assert!(sanitized.starts_with(&"x".repeat(100)));
    assert!(sanitized.ends_with("(250 chars total)"));
}

#[test]
fn given_multibyte_text_when_truncating_then_does_not_split_characters() {
    let long = "é".repeat(150);

    let sanitized = sanitize_prompt(&long);

    assert!(sanitized.contains("(150 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_it() {
    let sanitized = sanitize_prompt("auth Bearer sk-secret-value done");

    assert!(sanitized.contains("Bearer [REDACTED]"));
    assert!(!sanitized.contains("sk-secret-value"));
}

#[test]
fn given_api_key_parameter_when_sanitizing_then_redacts_it() {
    let sanitized = sanitize_prompt("call with api_key=abc123&x=1");

    assert!(sanitized.contains("api_key=[REDACTED]"));
    assert!(!sanitized.contains("abc123"));
}
