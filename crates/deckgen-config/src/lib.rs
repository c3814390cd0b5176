//! Runtime configuration for the deckgen service.
//!
//! Configuration is read from `DECK_*` environment variables with sensible
//! defaults, so the server runs with no configuration at all. The
//! `OPENAI_API_KEY` variable is consumed directly by the OpenAI client.
//!
//! # Example
//!
//! ```rust
//! use deckgen_config::DeckConfig;
//!
//! let config = DeckConfig::default();
//! assert_eq!(config.min_slides, 3);
//! assert_eq!(config.max_slides, 5);
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration from the environment.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An environment variable held a value that failed to parse.
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: String, value: String },

    /// The configured slide range is empty or inverted.
    #[error("slide range is empty: min {min} > max {max}")]
    EmptySlideRange { min: usize, max: usize },
}

/// Runtime settings for the deck generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Address the HTTP server binds to.
    pub addr: String,
    /// Directory the finished PDFs are written to and served from.
    pub static_dir: PathBuf,
    /// Chat model used for slide text.
    pub text_model: String,
    /// Image model used for slide art.
    pub image_model: String,
    /// Minimum number of slides per deck (inclusive).
    pub min_slides: usize,
    /// Maximum number of slides per deck (inclusive).
    pub max_slides: usize,
    /// Maximum in-flight outbound calls per phase.
    pub concurrency: usize,
    /// Retry attempts after the first failure of an outbound call.
    pub max_retries: u32,
    /// Timeout applied to each outbound call attempt.
    pub call_timeout: Duration,
    /// Deadline for the whole generation request.
    pub request_deadline: Duration,
    /// Optional RNG seed for deterministic slide counts and layouts.
    pub rng_seed: Option<u64>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".into(),
            static_dir: PathBuf::from("static"),
            text_model: "gpt-4o".into(),
            image_model: "dall-e-3".into(),
            min_slides: 3,
            max_slides: 5,
            concurrency: 4,
            max_retries: 2,
            call_timeout: Duration::from_secs(60),
            request_deadline: Duration::from_secs(300),
            rng_seed: None,
        }
    }
}

impl DeckConfig {
    /// Loads configuration from `DECK_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            addr: env::var("DECK_ADDR").unwrap_or(defaults.addr),
            static_dir: env::var("DECK_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            text_model: env::var("DECK_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: env::var("DECK_IMAGE_MODEL").unwrap_or(defaults.image_model),
            min_slides: parse_var("DECK_MIN_SLIDES", defaults.min_slides)?,
            max_slides: parse_var("DECK_MAX_SLIDES", defaults.max_slides)?,
            concurrency: parse_var("DECK_CONCURRENCY", defaults.concurrency)?,
            max_retries: parse_var("DECK_MAX_RETRIES", defaults.max_retries)?,
            call_timeout: Duration::from_secs(parse_var("DECK_CALL_TIMEOUT_SECS", 60)?),
            request_deadline: Duration::from_secs(parse_var("DECK_REQUEST_DEADLINE_SECS", 300)?),
            rng_seed: parse_optional_var("DECK_RNG_SEED")?,
        };

        if config.min_slides > config.max_slides {
            return Err(ConfigError::EmptySlideRange {
                min: config.min_slides,
                max: config.max_slides,
            });
        }

        Ok(config)
    }
}

/// Parses an environment variable, falling back to a default when unset.
fn parse_var<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Parses an optional environment variable, `None` when unset.
fn parse_optional_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var: var.to_string(), value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = DeckConfig::default();
        assert_eq!(config.min_slides, 3);
        assert_eq!(config.max_slides, 5);
        assert_eq!(config.text_model, "gpt-4o");
        assert_eq!(config.image_model, "dall-e-3");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn inverted_slide_range_is_rejected() {
        let err = ConfigError::EmptySlideRange { min: 5, max: 3 };
        assert_eq!(err.to_string(), "slide range is empty: min 5 > max 3");
    }

    #[test]
    fn parse_var_reports_the_offending_value() {
        // Use a variable name no other test touches.
        env::set_var("DECK_TEST_PARSE_VAR", "not-a-number");
        let result: Result<usize, _> = parse_var("DECK_TEST_PARSE_VAR", 1);
        env::remove_var("DECK_TEST_PARSE_VAR");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("not-a-number"));
    }
}
