//! OpenAI-compatible chat client for slide text generation.

use std::time::Instant;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;
use tracing::info;

use deckgen_core::{DeckError, TextGenerator};

/// Converts any error into an upstream DeckError.
pub(crate) fn llm_err(e: impl ToString) -> DeckError {
    DeckError::Upstream(e.to_string())
}

/// Builds a client config for the given optional API base URL.
pub(crate) fn build_config(api_base: Option<&str>) -> OpenAIConfig {
    match api_base {
        Some(base) => OpenAIConfig::new().with_api_base(base),
        None => OpenAIConfig::default(),
    }
}

/// Builds the single user-role message the slide instruction is sent as.
fn build_messages(instruction: &str) -> Result<Vec<ChatCompletionRequestMessage>, DeckError> {
    Ok(vec![ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(instruction)
            .build()
            .map_err(llm_err)?,
    )])
}

/// Extracts the completion content, rejecting empty responses.
fn extract_content(
    response: CreateChatCompletionResponse,
    elapsed_ms: u64,
) -> Result<String, DeckError> {
    let (input_tokens, output_tokens) = response
        .usage
        .as_ref()
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(DeckError::Upstream("empty completion content".into()));
    }

    info!(
        "LLM: {}ms, tokens: {}/{} (in/out)",
        elapsed_ms, input_tokens, output_tokens
    );

    Ok(content)
}

/// Client for OpenAI-compatible chat completion APIs.
pub struct TextClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl TextClient {
    /// Creates a new client for the given model and optional API base URL.
    pub fn new(model: &str, api_base: Option<&str>) -> Self {
        Self {
            client: Client::with_config(build_config(api_base)),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for TextClient {
    async fn generate(&self, instruction: &str) -> Result<String, DeckError> {
        let start = Instant::now();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(build_messages(instruction)?)
            .build()
            .map_err(llm_err)?;

        let response = self.client.chat().create(request).await.map_err(llm_err)?;
        extract_content(response, start.elapsed().as_millis() as u64)
    }
}
