//! OpenAI image generation client for slide illustrations.

use std::time::Instant;

use async_openai::{
    config::OpenAIConfig,
    types::{CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat},
    Client,
};
use async_trait::async_trait;
use tracing::info;

use deckgen_core::{DeckError, ImageAsset, ImageGenerator};

use crate::client::{build_config, llm_err};

/// Client requesting exactly one image per slide instruction.
pub struct ImageClient {
    client: Client<OpenAIConfig>,
    http: reqwest::Client,
    model: ImageModel,
}

impl ImageClient {
    /// Creates a new client for the given image model and optional API base URL.
    pub fn new(model: &str, api_base: Option<&str>) -> Self {
        Self {
            client: Client::with_config(build_config(api_base)),
            http: reqwest::Client::new(),
            model: parse_model(model),
        }
    }

    /// Downloads the generated image so the composer can embed it.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DeckError> {
        let response = self.http.get(url).send().await.map_err(llm_err)?;
        let response = response.error_for_status().map_err(llm_err)?;
        let bytes = response.bytes().await.map_err(llm_err)?;
        Ok(bytes.to_vec())
    }
}

fn parse_model(model: &str) -> ImageModel {
    match model {
        "dall-e-2" => ImageModel::DallE2,
        "dall-e-3" => ImageModel::DallE3,
        other => ImageModel::Other(other.to_string()),
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, instruction: &str) -> Result<ImageAsset, DeckError> {
        let start = Instant::now();

        let request = CreateImageRequestArgs::default()
            .prompt(instruction)
            .model(self.model.clone())
            .n(1)
            .response_format(ImageResponseFormat::Url)
            .build()
            .map_err(llm_err)?;

        let response = self.client.images().create(request).await.map_err(llm_err)?;
        let image = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| DeckError::Upstream("image response contained no data".into()))?;

        let url = match &*image {
            Image::Url { url, .. } => url.clone(),
            Image::B64Json { .. } => {
                return Err(DeckError::Upstream("expected a URL image response".into()));
            }
        };

        let bytes = self.fetch(&url).await?;
        info!(
            "Image: {}ms, {} bytes fetched",
            start.elapsed().as_millis(),
            bytes.len()
        );

        Ok(ImageAsset { bytes, source_url: Some(url) })
    }
}
