//! Deck assembly engine: drives the generation pipeline in strict phase
//! order (all text → all images → per-slide compose) and owns the output
//! file for the lifetime of the request.
//!
//! Outbound calls within a phase are independent, so each phase fans out
//! with bounded, order-preserving concurrency; page composition is
//! strictly sequential because pages append to one document. Failed
//! slides are tagged with their index and abort the whole deck; a deck
//! with silently missing or shifted slides is never produced.

mod prompts;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};
use uuid::Uuid;

use deckgen_config::DeckConfig;
use deckgen_core::{
    DeckArtifact, DeckError, ImageAsset, ImageGenerator, TextGenerator,
};
use deckgen_render::{compose_page, normalize, DeckWriter, LayoutChoice};

pub use prompts::{image_instruction, ordinal_suffix, text_instruction};

/// Base delay for exponential retry backoff.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Orchestrates text generation, image generation, and page composition
/// into one PDF deck per request.
pub struct DeckAssembler {
    text: Arc<dyn TextGenerator>,
    art: Arc<dyn ImageGenerator>,
    config: DeckConfig,
}

impl DeckAssembler {
    /// Creates an assembler over the given generators and configuration.
    pub fn new(
        text: Arc<dyn TextGenerator>,
        art: Arc<dyn ImageGenerator>,
        config: DeckConfig,
    ) -> Self {
        Self { text, art, config }
    }

    /// Generates a complete deck for the prompt and returns the file
    /// reference, enforcing the overall request deadline.
    pub async fn generate(&self, prompt: &str) -> Result<DeckArtifact, DeckError> {
        match timeout(self.config.request_deadline, self.generate_inner(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(DeckError::DeadlineExceeded),
        }
    }

    async fn generate_inner(&self, prompt: &str) -> Result<DeckArtifact, DeckError> {
        if prompt.trim().is_empty() {
            return Err(DeckError::EmptyPrompt);
        }

        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let slide_count = rng.gen_range(self.config.min_slides..=self.config.max_slides);
        info!(
            "Generating deck: {} slides for '{}'",
            slide_count,
            prompt.chars().take(50).collect::<String>()
        );

        let texts = self.text_phase(prompt, slide_count).await?;
        info!("Text phase complete: {} slides", texts.len());

        let images = self.image_phase(&texts).await?;
        info!("Image phase complete: {} assets", images.len());
        debug_assert_eq!(texts.len(), images.len());

        self.compose_phase(prompt, &texts, &images, &mut rng)
    }

    /// Fans out one text-generation call per slide with bounded
    /// concurrency, preserving index order.
    async fn text_phase(
        &self,
        prompt: &str,
        slide_count: usize,
    ) -> Result<Vec<String>, DeckError> {
        let outcomes: Vec<Result<String, DeckError>> = stream::iter(0..slide_count)
            .map(|i| {
                let instruction = text_instruction(i, prompt);
                async move {
                    self.call_with_retries(|| self.text.generate(&instruction), "text")
                        .await
                }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        collect_phase(outcomes, |slide, reason| DeckError::TextGeneration { slide, reason })
    }

    /// Fans out one image-generation call per slide. Runs only after the
    /// text phase, since each instruction embeds the slide's own text.
    async fn image_phase(&self, texts: &[String]) -> Result<Vec<ImageAsset>, DeckError> {
        let total = texts.len();
        let instructions: Vec<String> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| image_instruction(i, total, text))
            .collect();
        let outcomes: Vec<Result<ImageAsset, DeckError>> = stream::iter(instructions)
            .map(|instruction| async move {
                self.call_with_retries(|| self.art.generate(&instruction), "image")
                    .await
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        collect_phase(outcomes, |slide, reason| DeckError::ImageGeneration { slide, reason })
    }

    /// Composes pages sequentially in slide-index order and writes the
    /// deck under a 128-bit random filename. Removes the file on any
    /// save failure.
    fn compose_phase(
        &self,
        prompt: &str,
        texts: &[String],
        images: &[ImageAsset],
        rng: &mut StdRng,
    ) -> Result<DeckArtifact, DeckError> {
        std::fs::create_dir_all(&self.config.static_dir)?;
        let filename = format!("{}.pdf", Uuid::new_v4().simple());
        let path = self.config.static_dir.join(&filename);

        let mut writer = DeckWriter::new(prompt)?;
        for (i, (text, image)) in texts.iter().zip(images).enumerate() {
            let rich = normalize(text);
            let choice = LayoutChoice::draw(rng);
            let layer = writer.start_page();
            compose_page(&layer, writer.fonts(), i, &rich, image, choice)?;
            writer.commit_page();
        }
        let pages = writer.page_count();

        if let Err(e) = writer.save(&path) {
            let _ = std::fs::remove_file(&path);
            return Err(e);
        }

        info!("Deck written: {} ({} pages)", path.display(), pages);
        Ok(DeckArtifact {
            prompt: prompt.to_string(),
            file: format!("static/{filename}"),
            path,
            pages,
        })
    }

    /// Runs one outbound call with a per-attempt timeout and bounded
    /// exponential backoff.
    async fn call_with_retries<T, F, Fut>(
        &self,
        mut call: F,
        what: &str,
    ) -> Result<T, DeckError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DeckError>>,
    {
        let mut attempt = 0u32;
        loop {
            match timeout(self.config.call_timeout, call()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) if attempt >= self.config.max_retries => return Err(e),
                Err(_) if attempt >= self.config.max_retries => {
                    return Err(DeckError::MaxRetriesExceeded(format!("{what} call timed out")));
                }
                Ok(Err(e)) => warn!("{} call failed (attempt {}): {}", what, attempt + 1, e),
                Err(_) => warn!("{} call timed out (attempt {})", what, attempt + 1),
            }
            sleep(backoff_delay(attempt)).await;
            attempt += 1;
        }
    }
}

/// Backoff before retry `attempt + 1`; the exponent saturates so large
/// retry budgets cannot overflow the multiplier.
fn backoff_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY * 2u32.saturating_pow(attempt)
}

/// Unpacks per-index tagged outcomes, aborting on the first failed slide.
///
/// The outcomes are index-aligned by construction, so a failure can never
/// shift later slides.
fn collect_phase<T>(
    outcomes: Vec<Result<T, DeckError>>,
    mut to_error: impl FnMut(usize, String) -> DeckError,
) -> Result<Vec<T>, DeckError> {
    let mut values = Vec::with_capacity(outcomes.len());
    for (slide, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(value) => values.push(value),
            Err(e) => {
                error!("slide {} failed: {}", slide, e);
                return Err(to_error(slide, e.to_string()));
            }
        }
    }
    Ok(values)
}
