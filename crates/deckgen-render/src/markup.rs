//! Normalizes lightweight markup in generated slide text into a
//! renderable rich-text representation.
//!
//! The generation models tend to answer with markdown (emphasis, headers,
//! bullet lists). The composer cannot draw raw `**` tokens, so this module
//! resolves them into styled spans. Anything the parser does not recognize
//! passes through as plain text.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

/// One logical block of a slide's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A markdown header; rendered bold within the slide's style.
    Heading { level: u8, spans: Vec<Span> },
    /// A plain paragraph.
    Paragraph { spans: Vec<Span> },
    /// A list item; rendered with a bullet prefix.
    Bullet { spans: Vec<Span> },
}

impl Block {
    /// The styled spans of this block, whatever its kind.
    pub fn spans(&self) -> &[Span] {
        match self {
            Block::Heading { spans, .. } | Block::Paragraph { spans } | Block::Bullet { spans } => {
                spans
            }
        }
    }
}

/// A slide's text after markup normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    pub blocks: Vec<Block>,
}

impl RichText {
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.spans().is_empty())
    }
}

#[derive(Clone, Copy)]
enum BlockKind {
    Heading(u8),
    Paragraph,
    Bullet,
}

/// Converts raw slide text (possibly containing markdown) into rich text.
///
/// Pure function; malformed input degrades to plain text rather than
/// failing.
pub fn normalize(raw: &str) -> RichText {
    let mut blocks = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut kind = BlockKind::Paragraph;
    let mut bold_depth = 0usize;
    let mut italic_depth = 0usize;

    let flush = |kind: BlockKind, spans: &mut Vec<Span>| {
        if spans.is_empty() {
            return None;
        }
        let spans = std::mem::take(spans);
        Some(match kind {
            BlockKind::Heading(level) => Block::Heading { level, spans },
            BlockKind::Paragraph => Block::Paragraph { spans },
            BlockKind::Bullet => Block::Bullet { spans },
        })
    };

    for event in Parser::new(raw) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                blocks.extend(flush(kind, &mut spans));
                kind = BlockKind::Heading(level as u8);
            }
            Event::Start(Tag::Paragraph) => {
                blocks.extend(flush(kind, &mut spans));
                kind = BlockKind::Paragraph;
            }
            Event::Start(Tag::Item) => {
                blocks.extend(flush(kind, &mut spans));
                kind = BlockKind::Bullet;
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::Item) => {
                blocks.extend(flush(kind, &mut spans));
                kind = BlockKind::Paragraph;
            }
            Event::Start(Tag::Strong) => bold_depth += 1,
            Event::End(TagEnd::Strong) => bold_depth = bold_depth.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic_depth += 1,
            Event::End(TagEnd::Emphasis) => italic_depth = italic_depth.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => {
                push_text(&mut spans, &text, bold_depth > 0, italic_depth > 0);
            }
            Event::SoftBreak | Event::HardBreak => {
                push_text(&mut spans, " ", bold_depth > 0, italic_depth > 0);
            }
            _ => {}
        }
    }
    blocks.extend(flush(kind, &mut spans));

    RichText { blocks }
}

/// Appends text to the span list, merging with the previous span when the
/// styling is identical.
fn push_text(spans: &mut Vec<Span>, text: &str, bold: bool, italic: bool) {
    if let Some(last) = spans.last_mut() {
        if last.bold == bold && last.italic == italic {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(Span { text: text.to_string(), bold, italic });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_text(rich: &RichText) -> String {
        rich.blocks
            .iter()
            .flat_map(|b| b.spans())
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn emphasis_resolves_without_residual_tokens() {
        let rich = normalize("This is **bold** and *italic* text.");
        let text = all_text(&rich);
        assert!(!text.contains("**"));
        assert!(!text.contains('*'));

        let spans: Vec<_> = rich.blocks[0].spans().to_vec();
        assert!(spans.iter().any(|s| s.bold && s.text == "bold"));
        assert!(spans.iter().any(|s| s.italic && s.text == "italic"));
    }

    #[test]
    fn headers_become_heading_blocks() {
        let rich = normalize("# Photosynthesis\n\nPlants convert light.");
        assert_eq!(rich.blocks.len(), 2);
        assert!(matches!(rich.blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(rich.blocks[1], Block::Paragraph { .. }));
    }

    #[test]
    fn list_items_become_bullets() {
        let rich = normalize("- chlorophyll\n- sunlight\n- water");
        let bullets = rich
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Bullet { .. }))
            .count();
        assert_eq!(bullets, 3);
    }

    #[test]
    fn adjacent_same_style_text_is_merged() {
        let rich = normalize("line one\nline two");
        assert_eq!(rich.blocks.len(), 1);
        assert_eq!(rich.blocks[0].spans().len(), 1);
        assert_eq!(rich.blocks[0].spans()[0].text, "line one line two");
    }

    #[test]
    fn plain_text_passes_through() {
        let rich = normalize("just a sentence");
        assert_eq!(all_text(&rich), "just a sentence");
        assert!(!rich.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_rich_text() {
        assert!(normalize("").is_empty());
    }

    #[test]
    fn unbalanced_markup_degrades_to_plain_text() {
        let rich = normalize("dangling **emphasis without a close");
        assert!(all_text(&rich).contains("emphasis without a close"));
    }
}
