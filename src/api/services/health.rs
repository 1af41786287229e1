use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use crate::storage::SeaOrmStorage;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: i64,
    pub storage: HealthStorageCheck,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health Service
///
/// 直接调用 storage 方法，不通过 LinkService：健康检查需要简单直接，
/// 不应依赖业务逻辑。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");

        // 只查 count，不加载全表
        let storage_check = match tokio::time::timeout(Duration::from_secs(5), storage.count())
            .await
        {
            Ok(Ok(count)) => HealthStorageCheck {
                status: "healthy".to_string(),
                backend: storage.backend_name().to_string(),
                links_count: Some(count),
                error: None,
            },
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    links_count: None,
                    error: Some(format!("database error: {}", e)),
                }
            }
            Err(_) => {
                error!("Storage health check timeout");
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    backend: storage.backend_name().to_string(),
                    links_count: None,
                    error: Some("timeout".to_string()),
                }
            }
        };

        let healthy = storage_check.status == "healthy";
        let uptime = chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_seconds();

        let body = HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            uptime_seconds: uptime,
            storage: storage_check,
        };

        if healthy {
            HttpResponse::Ok().json(body)
        } else {
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
