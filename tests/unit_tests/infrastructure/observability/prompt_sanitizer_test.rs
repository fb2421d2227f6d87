use voice_estimate::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_text_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   \n"), "[EMPTY]");
}

#[test]
fn given_short_transcript_when_sanitizing_then_text_is_unchanged() {
    assert_eq!(
        sanitize_prompt("  Peindre le salon en blanc cassé  "),
        "Peindre le salon en blanc cassé"
    );
}

#[test]
fn given_long_accented_transcript_when_sanitizing_then_truncates_on_char_boundary() {
    let transcript = "é".repeat(150);

    let sanitized = sanitize_prompt(&transcript);

    assert!(sanitized.starts_with(&"é".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_token_is_redacted() {
    let sanitized = sanitize_prompt("Authorization: Bearer sk-secret-123 end");

    assert!(!sanitized.contains("sk-secret-123"));
    assert!(sanitized.contains("Bearer [REDACTED] end"));
}

#[test]
fn given_query_credentials_when_sanitizing_then_values_are_redacted() {
    let sanitized = sanitize_prompt("url?api_key=abc&token=xyz");

    assert_eq!(sanitized, "url?api_key=[REDACTED]&token=[REDACTED]");
}
