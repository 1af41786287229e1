use serde::{Deserialize, Serialize};

/// A registered short link.
///
/// Records are never physically removed: deactivation flips `is_active`
/// and permanently retires the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortUrl {
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub is_active: bool,
    #[serde(default)]
    pub clicks: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
