//! Target-URL validation
//!
//! Only http:// and https:// targets are accepted; redirect targets using
//! script-capable or local schemes are rejected outright.

use url::Url;

use crate::errors::{Result, ShorturlError};

/// 危险协议列表
const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// Validate a redirect target.
///
/// Checks, in order: non-empty, not a dangerous scheme, http/https only,
/// and parseable as a URL.
pub fn validate_target_url(target: &str) -> Result<()> {
    let target = target.trim();

    if target.is_empty() {
        return Err(ShorturlError::validation("target URL cannot be empty"));
    }

    let lower = target.to_lowercase();

    for scheme in DANGEROUS_SCHEMES {
        if lower.starts_with(scheme) {
            return Err(ShorturlError::validation(format!(
                "URL scheme not allowed: {}",
                scheme
            )));
        }
    }

    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return Err(ShorturlError::validation(
            "URL must start with http:// or https://",
        ));
    }

    Url::parse(target)
        .map_err(|e| ShorturlError::validation(format!("invalid URL format: {}", e)))?;

    Ok(())
}
