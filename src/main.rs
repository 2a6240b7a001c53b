use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e)
    })?;

    let analysis_service = web::Data::from(state.analysis_service);
    let upload_config = web::Data::new(state.upload);
    let json_limit = usize::try_from(state.upload.max_bytes).unwrap_or(usize::MAX);

    tracing::info!(
        max_upload_bytes = state.upload.max_bytes,
        "Starting Contract Checker server on {}",
        bind_addr
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(analysis_service.clone())
            .app_data(upload_config.clone())
            .app_data(api::contract::json_config(json_limit))
            .configure(api::contract::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
