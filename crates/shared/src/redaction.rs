//! Secret detection and redaction utilities.
//!
//! Tags and env values occasionally carry credentials (`api_key:...`). These
//! helpers keep them out of log output and error metadata.

/// Checks if a key/variable name likely refers to a secret.
///
/// Uses case-insensitive pattern matching to detect common secret-related
/// naming conventions.
///
/// # Examples
///
/// ```
/// use stats_client_shared::is_secret_key;
///
/// assert!(is_secret_key("API_KEY"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("auth_token"));
/// assert!(!is_secret_key("region"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use stats_client_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("API_KEY", "sk-123"), "[REDACTED]");
/// assert_eq!(redact_if_secret("STATS_PREFIXES", "svc."), "svc.");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// Tag names whose values are credentials. Compared whole, ignoring ASCII case.
const SECRET_TAG_NAMES: &[&str] = &[
    "api_key",
    "apikey",
    "access_token",
    "auth",
    "authorization",
    "client_secret",
    "credential",
    "credentials",
    "passwd",
    "password",
    "secret",
    "token",
];

/// Checks if a metric tag name (the part before `:`) carries a credential.
///
/// Unlike [`is_secret_key`], which matches fragments of env var names, this
/// compares the whole tag name so ordinary tags such as `author` or
/// `keyspace` are left alone.
///
/// # Examples
///
/// ```
/// use stats_client_shared::is_secret_tag_name;
///
/// assert!(is_secret_tag_name("API_KEY"));
/// assert!(is_secret_tag_name("token"));
/// assert!(!is_secret_tag_name("author"));
/// assert!(!is_secret_tag_name("keyspace"));
/// ```
pub fn is_secret_tag_name(name: &str) -> bool {
    let name = name.trim();
    SECRET_TAG_NAMES
        .iter()
        .any(|secret| secret.eq_ignore_ascii_case(name))
}

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";
