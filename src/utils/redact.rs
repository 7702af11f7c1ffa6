use once_cell::sync::Lazy;
use regex::Regex;

const INLINE_REDACTION: &str = "***REDACTED***";

static ACCESS_TOKEN_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(access_token|fb_exchange_token|client_secret)=([^&\s"']+)"#)
        .expect("access token redaction regex")
});

static ACCESS_TOKEN_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)"(access_token|client_secret)"\s*:\s*"[^"]*""#)
        .expect("access token json redaction regex")
});

/// Masks credential values embedded in URLs, query strings or JSON bodies.
pub fn redact_credentials(text: &str) -> String {
    let masked = ACCESS_TOKEN_QUERY.replace_all(text, format!("$1={}", INLINE_REDACTION));
    ACCESS_TOKEN_JSON
        .replace_all(&masked, format!("\"$1\":\"{}\"", INLINE_REDACTION))
        .into_owned()
}

/// Redacts and caps a raw response body before it reaches the diagnostic stream.
pub fn redact_body(body: &str, max_bytes: usize) -> String {
    let redacted = redact_credentials(body);
    if redacted.len() <= max_bytes {
        return redacted;
    }
    let mut end = max_bytes;
    while !redacted.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = redacted[..end].to_string();
    out.push_str(&format!(" ...[truncated {} bytes]", redacted.len() - out.len()));
    out
}
