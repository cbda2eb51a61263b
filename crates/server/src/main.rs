use server::clients::lichess::LichessClient;
use server::config;
use server::routes;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use puzzle_core::PuzzleEngine;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    tracing::info!("Loading puzzle corpus from {}...", config.engine.puzzle_dir.display());
    let engine = PuzzleEngine::load(&config.engine).expect("Failed to load puzzle corpus");
    let engine = Arc::new(engine);

    let lichess = LichessClient::new(config.lichess_base_url.clone())
        .expect("Failed to build Lichess client");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        // Packs
        .route("/api/packs", get(routes::packs::list_packs))
        .route("/api/openings", get(routes::packs::list_openings))
        .route("/api/packs/{name}/puzzles", get(routes::packs::get_pack_puzzles))
        .route("/api/packs/{name}/pgn", get(routes::packs::get_pack_pgn))
        // Personalized
        .route("/api/personalized/{username}", get(routes::personalized::get_personalized))
        // Shared state
        .layer(Extension(engine))
        .layer(Extension(config.clone()))
        .layer(Extension(lichess))
        .layer(CompressionLayer::new())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
