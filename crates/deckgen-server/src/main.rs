//! HTTP server entry point and Axum router setup.
//!
//! Wires the generation clients and deck assembler into shared state,
//! configures routes, and serves finished decks from the static directory.

mod dto;
mod error;
mod handlers;
#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use deckgen_config::DeckConfig;
use deckgen_engine::DeckAssembler;
use deckgen_llm::{ImageClient, TextClient};

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub assembler: DeckAssembler,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let config = DeckConfig::from_env()?;
    std::fs::create_dir_all(&config.static_dir)?;
    info!("Serving decks from {}", config.static_dir.display());
    info!(
        "Models: text={}, image={}",
        config.text_model, config.image_model
    );

    let text = Arc::new(TextClient::new(&config.text_model, None));
    let art = Arc::new(ImageClient::new(&config.image_model, None));

    let addr = config.addr.clone();
    let static_dir = config.static_dir.clone();
    let state = Arc::new(ServerState {
        assembler: DeckAssembler::new(text, art, config),
    });

    let app = app(state, static_dir);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router over the shared state and static deck directory.
fn app(state: Arc<ServerState>, static_dir: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/generate-pdf", post(handlers::generate))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/", get(handlers::root))
        .route("/ping", get(handlers::ping))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}
