use docqa::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_it_trimmed() {
    assert_eq!(
        sanitize_prompt("  What is the grace period?  "),
        "What is the grace period?"
    );
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_length_suffix() {
    let prompt = "a".repeat(250);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (250 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_value() {
    let sanitized = sanitize_prompt("use Bearer abc123secret please");

    assert_eq!(sanitized, "use Bearer [REDACTED] please");
}

#[test]
fn given_key_value_secrets_when_sanitizing_then_redacts_every_value() {
    let sanitized = sanitize_prompt("url?api_key=xyz&token=t0k and password=hunter2");

    assert!(!sanitized.contains("xyz"));
    assert!(!sanitized.contains("t0k"));
    assert!(!sanitized.contains("hunter2"));
    assert!(sanitized.contains("api_key=[REDACTED]"));
    assert!(sanitized.contains("token=[REDACTED]"));
}
