//! Core domain types and error definitions for deckgen.
//!
//! This crate provides the fundamental types shared across the deck
//! generation pipeline:
//!
//! - [`DeckError`]: error type for generation and composition operations
//! - [`TextGenerator`] and [`ImageGenerator`]: outbound generation traits
//! - [`ImageAsset`]: a generated image resolved to embeddable bytes
//! - [`DeckArtifact`]: the finished deck returned to the caller
//!
//! # Example
//!
//! ```rust
//! use deckgen_core::ImageAsset;
//!
//! let asset = ImageAsset {
//!     bytes: vec![0x89, 0x50, 0x4e, 0x47],
//!     source_url: Some("https://example.com/art.png".to_string()),
//! };
//! assert!(!asset.bytes.is_empty());
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while generating or composing a deck.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The request prompt was empty.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Text generation failed for a specific slide.
    #[error("text generation failed for slide {slide}: {reason}")]
    TextGeneration { slide: usize, reason: String },

    /// Image generation failed for a specific slide.
    #[error("image generation failed for slide {slide}: {reason}")]
    ImageGeneration { slide: usize, reason: String },

    /// An outbound API call failed before it could be attributed to a slide.
    #[error("upstream call failed: {0}")]
    Upstream(String),

    /// Page composition or PDF emission failed.
    #[error("page composition failed: {0}")]
    Render(String),

    /// Filesystem error while writing the deck.
    #[error("deck I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The overall request deadline expired.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// An outbound call kept failing after all retry attempts.
    #[error("max retries exceeded: {0}")]
    MaxRetriesExceeded(String),
}

impl DeckError {
    /// Converts any error into an upstream call failure.
    pub fn upstream(e: impl ToString) -> Self {
        DeckError::Upstream(e.to_string())
    }
}

/// A generated image resolved to bytes the composer can embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Encoded image data (PNG or JPEG).
    pub bytes: Vec<u8>,
    /// The URL the image model returned, when it returned one.
    pub source_url: Option<String>,
}

/// The finished deck for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckArtifact {
    /// The prompt the deck was generated from.
    pub prompt: String,
    /// Relative file reference returned to the caller (e.g. `static/<hex>.pdf`).
    pub file: String,
    /// Absolute path of the written PDF on disk.
    pub path: PathBuf,
    /// Number of pages committed to the deck.
    pub pages: usize,
}

/// Trait for resolving a slide instruction to generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submits one instruction and returns the generated slide text.
    async fn generate(&self, instruction: &str) -> Result<String, DeckError>;
}

/// Trait for resolving a slide instruction to a generated image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Submits one instruction and returns exactly one image asset.
    async fn generate(&self, instruction: &str) -> Result<ImageAsset, DeckError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_slide_index() {
        let err = DeckError::TextGeneration { slide: 2, reason: "timeout".into() };
        assert_eq!(err.to_string(), "text generation failed for slide 2: timeout");
    }

    #[test]
    fn upstream_wraps_any_error() {
        let err = DeckError::upstream("connection refused");
        assert!(matches!(err, DeckError::Upstream(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
