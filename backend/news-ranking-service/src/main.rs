/// News Ranking Service - HTTP Server
///
/// Serves hybrid news recommendations from precomputed model artifacts.
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use news_ranking_service::config::LogFormat;
use news_ranking_service::handlers::{self, HandlerState};
use news_ranking_service::{load_from_directory, Config, NewsRecommendationEngine};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let (json_layer, text_layer) = match config.service.log_format {
        LogFormat::Json => (Some(fmt::layer().json()), None),
        LogFormat::Text => (None, Some(fmt::layer())),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!(
        "Starting {} v{}",
        config.service.service_name,
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Environment: {}", config.service.app_env);

    // Artifacts are loaded exactly once; any failure aborts startup
    let artifacts_dir = config.artifacts.dir.clone();
    let sample_size = config.recommendation.users_sample_size;
    let artifacts =
        tokio::task::spawn_blocking(move || load_from_directory(&artifacts_dir, sample_size))
            .await
            .context("Artifact loading task panicked")?
            .with_context(|| format!("Failed to load artifacts from {}", config.artifacts.dir))?;

    let engine = Arc::new(NewsRecommendationEngine::new(
        artifacts,
        &config.recommendation,
    ));
    let state = web::Data::new(HandlerState { engine });

    let bind_address = format!("0.0.0.0:{}", config.service.http_port);
    tracing::info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with error")?;

    tracing::info!("{} shut down", config.service.service_name);
    Ok(())
}
