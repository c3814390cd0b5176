//! Composes one slide onto one page: image placement on one half of the
//! canvas, justified rich text in the frame on the other half.

use printpdf::image_crate;
use printpdf::{Image, ImageTransform, Mm, PdfLayerReference, Pt};

use deckgen_core::{DeckError, ImageAsset};

use crate::deck::DeckFonts;
use crate::layout::{image_origin, text_frame, LayoutChoice, Rect, IMAGE_WIDTH, PAGE_HEIGHT};
use crate::markup::{Block, RichText};
use crate::style::{style_for_slide, TextStyle};

/// Resolution printpdf lays embedded bitmaps out at.
const IMAGE_DPI: f32 = 300.0;

fn pt_to_mm(value: f32) -> Mm {
    Mm::from(Pt(value))
}

/// Renders one slide's image and rich text onto the given page layer.
///
/// The heading style applies iff `slide_index == 0`. Any failure here is
/// fatal to the whole deck; pages are never partially recoverable.
pub fn compose_page(
    layer: &PdfLayerReference,
    fonts: &DeckFonts,
    slide_index: usize,
    text: &RichText,
    image: &ImageAsset,
    choice: LayoutChoice,
) -> Result<(), DeckError> {
    place_image(layer, image, choice)?;
    render_rich_text(layer, fonts, text, style_for_slide(slide_index), &text_frame(choice));
    Ok(())
}

/// Decodes the image and places it at the layout's origin, scaled to the
/// 512 pt column width with its aspect ratio preserved.
fn place_image(
    layer: &PdfLayerReference,
    asset: &ImageAsset,
    choice: LayoutChoice,
) -> Result<(), DeckError> {
    let decoded = image_crate::load_from_memory(&asset.bytes)
        .map_err(|e| DeckError::Render(format!("image decode: {e}")))?;
    let image = Image::from_dynamic_image(&decoded);

    let natural_width_pt = image.image.width.0 as f32 * 72.0 / IMAGE_DPI;
    let natural_height_pt = image.image.height.0 as f32 * 72.0 / IMAGE_DPI;
    let mut scale = IMAGE_WIDTH / natural_width_pt;
    if natural_height_pt * scale > PAGE_HEIGHT {
        scale = PAGE_HEIGHT / natural_height_pt;
    }

    let (x, y) = image_origin(choice);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(pt_to_mm(x)),
            translate_y: Some(pt_to_mm(y)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
    Ok(())
}

/// A wrapped word, carrying its styling and estimated width in points.
#[derive(Debug, Clone, PartialEq)]
struct Word {
    text: String,
    bold: bool,
    italic: bool,
    width: f32,
}

/// One wrapped line within the text frame.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    words: Vec<Word>,
    natural_width: f32,
}

/// Flows the rich text into the frame top-down, truncating at the frame
/// bottom. Non-final lines of each block are justified via word spacing.
fn render_rich_text(
    layer: &PdfLayerReference,
    fonts: &DeckFonts,
    text: &RichText,
    style: &TextStyle,
    frame: &Rect,
) {
    let mut y = frame.y + frame.height;
    let mut first = true;

    for block in &text.blocks {
        let lines = wrap_block(block, style, frame.width);
        if lines.is_empty() {
            continue;
        }
        if !first {
            y -= style.space_before;
        }
        first = false;

        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            y -= style.leading;
            if y < frame.y {
                return;
            }
            let extra = if i < last {
                justify_spacing(line, frame.width)
            } else {
                0.0
            };
            write_line(layer, fonts, line, style.font_size, frame.x, y, extra);
        }
        y -= style.space_after;
    }
}

/// Extra word spacing needed to stretch a line to the frame width.
fn justify_spacing(line: &Line, frame_width: f32) -> f32 {
    let gaps = line.words.len().saturating_sub(1);
    if gaps == 0 {
        return 0.0;
    }
    let extra = (frame_width - line.natural_width) / gaps as f32;
    if extra.is_finite() && extra > 0.0 {
        extra
    } else {
        0.0
    }
}

/// Writes one line of styled words at the given baseline.
fn write_line(
    layer: &PdfLayerReference,
    fonts: &DeckFonts,
    line: &Line,
    font_size: f32,
    x: f32,
    y: f32,
    extra_word_spacing: f32,
) {
    layer.begin_text_section();
    layer.set_text_cursor(pt_to_mm(x), pt_to_mm(y));
    if extra_word_spacing > 0.0 {
        layer.set_word_spacing(extra_word_spacing);
    }
    for (i, word) in line.words.iter().enumerate() {
        let font = fonts.for_span(word.bold, word.italic);
        layer.set_font(font, font_size);
        if i + 1 < line.words.len() {
            layer.write_text(format!("{} ", word.text), font);
        } else {
            layer.write_text(word.text.clone(), font);
        }
    }
    if extra_word_spacing > 0.0 {
        layer.set_word_spacing(0.0);
    }
    layer.end_text_section();
}

/// Greedily wraps a block's spans into lines no wider than `max_width`.
fn wrap_block(block: &Block, style: &TextStyle, max_width: f32) -> Vec<Line> {
    let force_bold = matches!(block, Block::Heading { .. });
    let space_width = estimate_width(" ", style.font_size, false);

    let mut words: Vec<Word> = Vec::new();
    if let Block::Bullet { .. } = block {
        words.push(make_word("\u{2022}", false, false, style.font_size));
    }
    for span in block.spans() {
        for token in span.text.split_whitespace() {
            words.push(make_word(token, span.bold || force_bold, span.italic, style.font_size));
        }
    }

    let mut lines = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut width = 0.0;
    for word in words {
        let needed = if current.is_empty() { word.width } else { width + space_width + word.width };
        if !current.is_empty() && needed > max_width {
            lines.push(Line { natural_width: width, words: std::mem::take(&mut current) });
            width = word.width;
            current.push(word);
        } else {
            width = needed;
            current.push(word);
        }
    }
    if !current.is_empty() {
        lines.push(Line { natural_width: width, words: current });
    }
    lines
}

fn make_word(text: &str, bold: bool, italic: bool, font_size: f32) -> Word {
    Word {
        text: text.to_string(),
        bold,
        italic,
        width: estimate_width(text, font_size, bold),
    }
}

/// Approximate Helvetica advance width of a string, in points.
///
/// Close enough for line breaking; exact metrics are not required since
/// frames are wide relative to the font size.
fn estimate_width(text: &str, font_size: f32, bold: bool) -> f32 {
    let weight = if bold { 1.05 } else { 1.0 };
    text.chars().map(char_width_factor).sum::<f32>() * font_size * weight
}

fn char_width_factor(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' | '.' | ',' | ':' | ';' | '!' => 0.28,
        'f' | 't' | 'r' | 'I' | ' ' | '(' | ')' | '[' | ']' | '-' | '"' => 0.35,
        'm' | 'w' | 'M' | 'W' | '@' | '\u{2022}' => 0.89,
        'A'..='Z' | '0'..='9' | '+' | '=' | '~' | '%' => 0.67,
        _ => 0.52,
    }
}
