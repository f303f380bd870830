use std::env;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use bg_eraser_core::config::ProcessingConfig;
use bg_eraser_core::processor::Processor;
use bg_eraser_core::remover::{ImglyRemover, DEFAULT_MODEL_URL};

mod handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Fetch (or reuse from cache) the segmentation model before accepting traffic
    let model_url =
        env::var("BG_ERASER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string());
    log::info!("Loading segmentation model: {}", model_url);
    let remover = ImglyRemover::from_url(&model_url)
        .await
        .context("Failed to set up the background-removal model")?;

    let processor = Arc::new(Processor::new(
        Arc::new(remover),
        ProcessingConfig::default(),
    ));

    // Build router
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/remove-bg", post(handlers::remove_bg))
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(processor);

    // Server address
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{}", port);
    log::info!("Background Eraser Server running on http://{}", addr);
    log::info!("API endpoints:");
    log::info!("   POST /remove-bg - Remove image backgrounds (PNG or ZIP)");
    log::info!("   GET  /health - Health check");

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn root() -> &'static str {
    "Background Eraser Server v0.1.0\n\nAPI Endpoints:\n  POST /remove-bg\n  GET  /health\n"
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": "0.1.0"
    }))
}
