use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing::info;

use shorturl::api::services::{AppStartTime, admin_routes, health_routes, redirect_routes, shorten_routes};
use shorturl::config::{get_config, init_config};
use shorturl::services::LinkService;
use shorturl::storage::StorageFactory;
use shorturl::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();
    init_config();
    let config = get_config();

    // Guard must live until shutdown so buffered log lines are flushed.
    let _log_guard = init_logging(&config).context("Failed to initialize logging")?;

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let link_service = Arc::new(LinkService::new(storage.clone()));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(shorten_routes)
            .service(admin_routes())
            .service(health_routes())
            // catch-all, keep last
            .configure(redirect_routes)
    })
    .workers(config.server.cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
