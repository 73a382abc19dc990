//! Log Redaction Layer
//!
//! Scrubs cloud API keys and bearer tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9\-_]{20,})|(AIza[0-9A-Za-z\-_]{35})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)")
        .unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_openai_style_keys() {
        let raw = r#"{"apiKey":"sk-abcdefghijklmnopqrstuvwx"}"#;
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("sk-abcdefghijklmnopqrstuvwx"));
        assert!(clean.contains("[REDACTED_TOKEN]"));
    }

    #[test]
    fn redacts_google_style_keys() {
        let raw = "key=AIzaSyA12345678901234567890123456789012_-";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("AIzaSyA"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        let raw = "Loaded catalog with 7 products";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
