//! Handler tests exercising the full router with mocked generators.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use deckgen_config::DeckConfig;
use deckgen_core::{DeckError, ImageAsset, ImageGenerator, TextGenerator};
use deckgen_engine::DeckAssembler;
use deckgen_render::printpdf::image_crate::{DynamicImage, ImageOutputFormat};

use crate::{app, ServerState};

fn png_bytes() -> Vec<u8> {
    let image = DynamicImage::new_rgb8(8, 8);
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("encode test png");
    bytes
}

struct FixedTexts;

#[async_trait]
impl TextGenerator for FixedTexts {
    async fn generate(&self, _instruction: &str) -> Result<String, DeckError> {
        Ok("**Photosynthesis** converts light into chemical energy.".to_string())
    }
}

struct FixedImages;

#[async_trait]
impl ImageGenerator for FixedImages {
    async fn generate(&self, _instruction: &str) -> Result<ImageAsset, DeckError> {
        Ok(ImageAsset { bytes: png_bytes(), source_url: None })
    }
}

struct RefusingImages;

#[async_trait]
impl ImageGenerator for RefusingImages {
    async fn generate(&self, _instruction: &str) -> Result<ImageAsset, DeckError> {
        Err(DeckError::Upstream("content policy rejection".into()))
    }
}

fn test_state(
    static_dir: PathBuf,
    art: Arc<dyn ImageGenerator>,
) -> Arc<ServerState> {
    let config = DeckConfig {
        static_dir,
        min_slides: 3,
        max_slides: 3,
        max_retries: 0,
        call_timeout: Duration::from_secs(5),
        request_deadline: Duration::from_secs(30),
        rng_seed: Some(7),
        ..DeckConfig::default()
    };
    Arc::new(ServerState {
        assembler: DeckAssembler::new(Arc::new(FixedTexts), art, config),
    })
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate-pdf")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn ping_answers_pong() {
    let dir = TempDir::new().unwrap();
    let state = test_state(dir.path().to_path_buf(), Arc::new(FixedImages));
    let app = app(state, dir.path().to_path_buf());

    let response = app
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["res"], "pong");
    assert!(payload["time"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn landing_page_lists_the_routes() {
    let dir = TempDir::new().unwrap();
    let state = test_state(dir.path().to_path_buf(), Arc::new(FixedImages));
    let app = app(state, dir.path().to_path_buf());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("/generate-pdf"));
    assert!(html.contains("/ping"));
}

#[tokio::test]
async fn generate_returns_the_file_reference_and_writes_the_deck() {
    let dir = TempDir::new().unwrap();
    let state = test_state(dir.path().to_path_buf(), Arc::new(FixedImages));
    let app = app(state, dir.path().to_path_buf());

    let response = app
        .oneshot(generate_request(r#"{"prompt":"Photosynthesis"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["prompt"], "Photosynthesis");

    let file = payload["file"].as_str().unwrap();
    assert!(file.starts_with("static/"));
    assert!(file.ends_with(".pdf"));

    let written = dir.path().join(file.trim_start_matches("static/"));
    let bytes = std::fs::read(written).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn empty_prompt_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let state = test_state(dir.path().to_path_buf(), Arc::new(FixedImages));
    let app = app(state, dir.path().to_path_buf());

    let response = app
        .oneshot(generate_request(r#"{"prompt":"  "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("prompt"));
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway_and_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let state = test_state(dir.path().to_path_buf(), Arc::new(RefusingImages));
    let app = app(state, dir.path().to_path_buf());

    let response = app
        .oneshot(generate_request(r#"{"prompt":"Photosynthesis"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 0);
}
