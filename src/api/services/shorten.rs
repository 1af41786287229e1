//! Link creation endpoint and the welcome root.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

use crate::api::types::{ShortenRequest, UrlInfoResponse, service_error_response};
use crate::config::get_config;
use crate::services::{CreateUrlRequest, LinkService};

pub struct ShortenService;

impl ShortenService {
    pub async fn read_root() -> impl Responder {
        HttpResponse::Ok().json("Welcome to the URL shortener API :)")
    }

    /// `POST /url`: register a target URL, optionally under a caller-chosen
    /// key, and return the public and admin URLs.
    pub async fn create_url(
        payload: web::Json<ShortenRequest>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let req = CreateUrlRequest {
            target_url: payload.target_url.clone(),
            custom_key: payload.custom_key.clone(),
        };

        match link_service.create(req).await {
            Ok(result) => {
                debug!(
                    "Created link '{}' (generated: {})",
                    result.record.key, result.generated_key
                );
                let config = get_config();
                HttpResponse::Created().json(UrlInfoResponse::from_record(
                    &result.record,
                    &config.server.base_url,
                ))
            }
            Err(e) => service_error_response(&e),
        }
    }
}

/// Top-level routes; registered before the redirect catch-all.
pub fn shorten_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(ShortenService::read_root))
        .route("/url", web::post().to(ShortenService::create_url));
}
