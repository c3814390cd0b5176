//! HTTP route handlers for the deck generation server.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use tracing::info;

use crate::dto::{GenerateRequest, GenerateResponse, PingResponse};
use crate::error::AppError;
use crate::ServerState;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>API for Multi Modal PDF</title>
    </head>
    <body>
        <div class="bg-gray-200 p-4 rounded-lg shadow-lg">
            <h1>API for Multi Modal PDF</h1>
            <ul>
                <li><a href="/generate-pdf">/generate-pdf</a></li>
                <li><a href="/ping">/ping</a></li>
            </ul>
        </div>
    </body>
</html>
"#;

/// Static landing page listing the available routes.
pub async fn root() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Liveness probe.
pub async fn ping() -> Json<PingResponse> {
    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();

    Json(PingResponse {
        res: "pong",
        version: env!("CARGO_PKG_VERSION"),
        time,
    })
}

/// Generates a slide deck PDF from a free-text prompt.
pub async fn generate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    info!(
        "Deck request: {}...",
        req.prompt.chars().take(50).collect::<String>()
    );

    let artifact = state.assembler.generate(&req.prompt).await?;

    Ok(Json(GenerateResponse {
        prompt: artifact.prompt,
        file: artifact.file,
    }))
}
