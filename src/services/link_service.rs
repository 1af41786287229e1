//! Link management service
//!
//! Business logic shared by all HTTP handlers: creation (with custom-key
//! validation or unique key generation), redirect resolution with click
//! counting, inspection, and soft deletion.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::get_config;
use crate::errors::{Result, ShorturlError};
use crate::keygen::{derive_secret_key, generate_unique_key};
use crate::storage::{SeaOrmStorage, ShortUrl};
use crate::utils::{is_reserved_key, is_valid_custom_key, validate_target_url};

/// Request to create a new short link
#[derive(Debug, Clone)]
pub struct CreateUrlRequest {
    /// Target URL to shorten
    pub target_url: String,
    /// Caller-supplied key (optional, generated when absent)
    pub custom_key: Option<String>,
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct UrlCreateResult {
    pub record: ShortUrl,
    /// Whether the key was auto-generated
    pub generated_key: bool,
}

/// Service for short-link operations
pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

/// Draw a key with `draw` and hand it to `insert`, redrawing whenever the
/// insert loses a unique-index race to a concurrent writer. Any other
/// error aborts the loop.
async fn insert_with_redraw<D, DFut, I, IFut, T>(draw: D, insert: I) -> Result<T>
where
    D: Fn() -> DFut,
    DFut: Future<Output = Result<String>>,
    I: Fn(String) -> IFut,
    IFut: Future<Output = Result<T>>,
{
    loop {
        let key = draw().await?;
        match insert(key).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_key_conflict() => {
                warn!("Generated key lost an insert race, retrying: {}", e);
                continue;
            }
            Err(e) => return Err(e),
        }
    }
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    fn key_length(&self) -> usize {
        get_config().keygen.key_length
    }

    fn secret_suffix_length(&self) -> usize {
        get_config().keygen.secret_suffix_length
    }

    /// Create a short link.
    ///
    /// With a custom key: validate its shape, reject reserved words, and
    /// surface a taken key as a conflict without retrying. Without one:
    /// draw generated keys until the registry reports one free, and if a
    /// concurrent writer still wins the insert race, draw again. The
    /// unique index is the authority; the generator only makes collisions
    /// improbable.
    pub async fn create(&self, req: CreateUrlRequest) -> Result<UrlCreateResult> {
        validate_target_url(&req.target_url)?;

        match req.custom_key.filter(|k| !k.is_empty()) {
            Some(key) => {
                if !is_valid_custom_key(&key) {
                    return Err(ShorturlError::validation(format!(
                        "invalid custom key '{}': 3-50 characters of letters, digits, hyphen, underscore",
                        key
                    )));
                }
                if is_reserved_key(&key) {
                    return Err(ShorturlError::validation(format!(
                        "'{}' is a reserved keyword and cannot be used",
                        key
                    )));
                }
                if self.storage.key_exists(&key).await? {
                    return Err(ShorturlError::key_conflict(format!(
                        "custom key '{}' is already in use",
                        key
                    )));
                }

                // The key_exists check and the insert do not form a
                // transaction; the unique index still rejects a racer, and
                // for custom keys that rejection is the caller's conflict.
                let record = self.insert_record(key, &req.target_url).await?;
                Ok(UrlCreateResult {
                    record,
                    generated_key: false,
                })
            }
            None => {
                let length = self.key_length();
                let target_url = req.target_url.as_str();

                // A concurrent request can still commit the same key between
                // the existence check and the insert; the redraw covers it.
                let record = insert_with_redraw(
                    || {
                        let storage = self.storage.clone();
                        async move {
                            generate_unique_key(length, move |candidate| {
                                let storage = storage.clone();
                                async move { storage.key_exists(&candidate).await }
                            })
                            .await
                        }
                    },
                    |key| async move { self.insert_record(key, target_url).await },
                )
                .await?;

                Ok(UrlCreateResult {
                    record,
                    generated_key: true,
                })
            }
        }
    }

    async fn insert_record(&self, key: String, target_url: &str) -> Result<ShortUrl> {
        let record = ShortUrl {
            secret_key: derive_secret_key(&key, self.secret_suffix_length())?,
            key,
            target_url: target_url.to_string(),
            is_active: true,
            clicks: 0,
            created_at: Utc::now(),
        };

        self.storage.insert(&record).await?;
        info!(
            "LinkService: created link '{}' -> '{}'",
            record.key, record.target_url
        );
        Ok(record)
    }

    /// Resolve an active link for redirecting and count the traversal.
    pub async fn resolve_and_count(&self, key: &str) -> Result<Option<ShortUrl>> {
        let Some(mut record) = self.storage.find_active_by_key(key).await? else {
            return Ok(None);
        };

        self.storage.increment_clicks(key).await?;
        record.clicks += 1;
        Ok(Some(record))
    }

    /// Inspect a link by key without counting a click.
    ///
    /// Deactivated links stay visible here; only redirects hide them.
    pub async fn peek(&self, key: &str) -> Result<Option<ShortUrl>> {
        self.storage.find_by_key(key).await
    }

    /// Look up an active link by its secret key.
    pub async fn admin_info(&self, secret_key: &str) -> Result<Option<ShortUrl>> {
        self.storage.find_active_by_secret_key(secret_key).await
    }

    /// Permanently deactivate a link by its secret key.
    pub async fn deactivate(&self, secret_key: &str) -> Result<Option<ShortUrl>> {
        self.storage.deactivate_by_secret_key(secret_key).await
    }
}
