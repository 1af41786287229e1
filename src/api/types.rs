//! API DTOs and error codes

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use tracing::error;

use crate::errors::ShorturlError;
use crate::storage::ShortUrl;

/// API 错误码枚举
///
/// 按千位分域：
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,

    KeyConflict = 3001,
}

/// Request body for `POST /url`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenRequest {
    pub target_url: String,
    #[serde(default)]
    pub custom_key: Option<String>,
}

/// Response body for creation and admin lookup
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UrlInfoResponse {
    pub target_url: String,
    pub is_active: bool,
    pub clicks: u64,
    /// Public short URL, base_url + key
    pub url: String,
    /// Administration URL carrying the secret key
    pub admin_url: String,
}

impl UrlInfoResponse {
    pub fn from_record(record: &ShortUrl, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            target_url: record.target_url.clone(),
            is_active: record.is_active,
            clicks: record.clicks,
            url: format!("{}/{}", base, record.key),
            admin_url: format!("{}/admin/{}", base, record.secret_key),
        }
    }
}

/// Response body for `GET /peek/{key}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PeekResponse {
    pub key: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ShortUrl> for PeekResponse {
    fn from(record: ShortUrl) -> Self {
        Self {
            key: record.key,
            target_url: record.target_url,
            is_active: record.is_active,
            clicks: record.clicks,
            created_at: record.created_at,
        }
    }
}

/// Plain-message response (deletion, welcome)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DetailResponse {
    pub detail: String,
}

/// JSON error body: `{code, error}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub error: String,
}

pub fn error_response(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiError {
        code,
        error: message.into(),
    })
}

pub fn not_found_response(message: impl Into<String>) -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
}

/// Translate a service error into an HTTP response.
pub fn service_error_response(e: &ShorturlError) -> HttpResponse {
    match e {
        ShorturlError::Validation(msg) => {
            error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg.clone())
        }
        ShorturlError::KeyConflict(msg) => {
            error_response(StatusCode::CONFLICT, ErrorCode::KeyConflict, msg.clone())
        }
        ShorturlError::NotFound(msg) => not_found_response(msg.clone()),
        other => {
            error!("Internal error while handling request: {}", other);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "internal server error",
            )
        }
    }
}
