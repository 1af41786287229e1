//! Redirect and peek endpoints
//!
//! The redirect is the hot path: short key to 307, counting the
//! traversal. Peek returns the same record without counting, and unlike
//! the redirect it keeps deactivated links visible.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, error};

use crate::api::types::{PeekResponse, not_found_response};
use crate::services::LinkService;
use crate::storage::ShortUrl;

pub struct RedirectService;

impl RedirectService {
    /// `GET /{key}`: 307 to the target, incrementing the click count.
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let key = path.into_inner();

        match link_service.resolve_and_count(&key).await {
            Ok(Some(record)) => Self::finish_redirect(record),
            Ok(None) => {
                debug!("Redirect key not found or inactive: {}", key);
                Self::unknown_url_response(&req)
            }
            Err(e) => {
                error!("Database error during redirect lookup: {}", e);
                Self::error_response()
            }
        }
    }

    /// `GET /peek/{key}`: inspect without redirecting or counting.
    pub async fn peek(
        req: HttpRequest,
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let key = path.into_inner();

        match link_service.peek(&key).await {
            Ok(Some(record)) => HttpResponse::Ok().json(PeekResponse::from(record)),
            Ok(None) => Self::unknown_url_response(&req),
            Err(e) => {
                error!("Database error during peek lookup: {}", e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn finish_redirect(record: ShortUrl) -> HttpResponse {
        HttpResponse::TemporaryRedirect()
            .insert_header(("Location", record.target_url))
            .finish()
    }

    #[inline]
    fn unknown_url_response(req: &HttpRequest) -> HttpResponse {
        not_found_response(format!("URL '{}' doesn't exist", req.path()))
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::InternalServerError()
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// Must be registered last: `/{key}` is the catch-all.
pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/peek/{key}", web::get().to(RedirectService::peek))
        .route("/{key}", web::get().to(RedirectService::handle_redirect))
        .route("/{key}", web::head().to(RedirectService::handle_redirect));
}
