//! Markup normalization and PDF page composition for deckgen.
//!
//! This crate turns one slide's generated text and image into one fixed-size
//! PDF page:
//!
//! - [`normalize`]: lightweight markup into [`RichText`] spans and blocks
//! - [`LayoutChoice`]: per-slide image-left / image-right decision
//! - [`compose_page`]: renders one image + rich text pair onto a page
//! - [`DeckWriter`]: builder owning the document, commits pages in order
//!
//! Pages are a fixed 1024×768 pt canvas with a 512 pt image column and a
//! justified text frame on the opposite side.
//!
//! # Example
//!
//! ```rust
//! use deckgen_render::{normalize, style_for_slide};
//!
//! let rich = normalize("**Photosynthesis** converts light into energy.");
//! assert!(!rich.is_empty());
//! assert_eq!(style_for_slide(0).font_size, 22.0);
//! ```

mod deck;
mod layout;
mod markup;
mod page;
mod style;

pub use deck::{DeckFonts, DeckWriter};
pub use layout::{
    image_origin, text_frame, LayoutChoice, Rect, IMAGE_WIDTH, PAGE_HEIGHT, PAGE_WIDTH,
};
pub use markup::{normalize, Block, RichText, Span};
pub use page::compose_page;
pub use style::{style_for_slide, TextStyle, BODY, HEADING};

// Re-exported so callers and tests can build or decode image payloads
// against the exact backend version used for embedding.
pub use printpdf;
