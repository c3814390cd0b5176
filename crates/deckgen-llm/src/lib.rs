//! OpenAI-backed clients for slide text and illustration generation.
//!
//! Works with the OpenAI API and any compatible endpoint via `api_base`.
//! The [`TextClient`] resolves one slide instruction to generated text;
//! the [`ImageClient`] resolves one instruction to exactly one image,
//! fetched down to embeddable bytes.
//!
//! The `OPENAI_API_KEY` environment variable is read by the underlying
//! client configuration.

mod client;
mod images;

pub use client::TextClient;
pub use images::ImageClient;
