//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};

/// Request body for deck generation.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Response for a successfully generated deck.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
    pub file: String,
}

/// Liveness probe payload.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub res: &'static str,
    pub version: &'static str,
    pub time: f64,
}
