//! Administration endpoints
//!
//! The secret key handed out at creation is the only credential: knowing
//! it grants detail lookup and deactivation for that one link.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{error, info};

use crate::api::types::{DetailResponse, UrlInfoResponse, not_found_response};
use crate::config::get_config;
use crate::services::LinkService;

pub struct AdminService;

impl AdminService {
    /// `GET /admin/{secret_key}`: full link details for the owner.
    pub async fn get_url_info(
        req: HttpRequest,
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let secret_key = path.into_inner();

        match link_service.admin_info(&secret_key).await {
            Ok(Some(record)) => {
                let config = get_config();
                HttpResponse::Ok().json(UrlInfoResponse::from_record(
                    &record,
                    &config.server.base_url,
                ))
            }
            Ok(None) => Self::unknown_url_response(&req),
            Err(e) => {
                error!("Database error during admin lookup: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }

    /// `DELETE /admin/{secret_key}`: permanent deactivation. The key is
    /// retired, never freed for reuse.
    pub async fn delete_url(
        req: HttpRequest,
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let secret_key = path.into_inner();

        match link_service.deactivate(&secret_key).await {
            Ok(Some(record)) => {
                info!("Deactivated link '{}' via admin API", record.key);
                HttpResponse::Ok().json(DetailResponse {
                    detail: format!(
                        "Successfully deleted shortened URL for '{}'",
                        record.target_url
                    ),
                })
            }
            Ok(None) => Self::unknown_url_response(&req),
            Err(e) => {
                error!("Database error during link deactivation: {}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }

    #[inline]
    fn unknown_url_response(req: &HttpRequest) -> HttpResponse {
        not_found_response(format!("URL '{}' doesn't exist", req.path()))
    }
}

pub fn admin_routes() -> actix_web::Scope {
    web::scope("/admin")
        .route("/{secret_key}", web::get().to(AdminService::get_url_info))
        .route("/{secret_key}", web::delete().to(AdminService::delete_url))
}
