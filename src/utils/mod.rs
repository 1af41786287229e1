pub mod url_validator;

pub use url_validator::validate_target_url;

/// Keys that would shadow service routes and can never be claimed as
/// custom keys. Matched case-insensitively.
pub const RESERVED_KEYS: &[&str] = &[
    "admin", "api", "url", "peek", "static", "docs", "redoc", "openapi", "health", "metrics",
];

/// Whether `key` is an acceptable caller-supplied custom key:
/// 3 to 50 characters of `[A-Za-z0-9_-]`.
///
/// Acceptance is case-sensitive; distinct case variants are distinct keys.
pub fn is_valid_custom_key(key: &str) -> bool {
    if key.len() < 3 || key.len() > 50 {
        return false;
    }
    key.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Whether `key` collides with a reserved route name.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(key))
}
