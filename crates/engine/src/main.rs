//! CineMatch Service - Hybrid Movie Recommendations
//!
//! Serves the two core operations over HTTP: similar-title
//! recommendations and content-catalog enumeration. The engine (both
//! similarity matrices and the link table) is built exactly once,
//! before the server accepts traffic, and shared read-only across
//! workers.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use cinematch_engine::routes;
use cinematch_engine::HybridRecommender;
use cinematch_core::{load_dotenv, ConfigLoader, DataConfig, EngineConfig, ServiceConfig};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    load_dotenv();

    let data_config = DataConfig::from_env()?;
    data_config.validate()?;
    let engine_config = EngineConfig::from_env()?;
    engine_config.validate()?;
    let service_config = ServiceConfig::from_env()?;
    service_config.validate()?;

    info!(data_dir = %data_config.data_dir.display(), "Building recommendation engine");
    let started = std::time::Instant::now();
    let engine = HybridRecommender::load(&data_config, &engine_config)
        .context("failed to build recommendation engine")?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "Engine ready");

    let engine = web::Data::new(engine);
    let bind = (service_config.host.clone(), service_config.port);
    info!(host = %bind.0, port = bind.1, "Starting CineMatch service");

    HttpServer::new(move || {
        App::new()
            .app_data(engine.clone())
            .route("/health", web::get().to(routes::health_check))
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
