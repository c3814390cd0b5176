//! The deck writer: a builder owning the PDF document for one request.
//!
//! Pages are started lazily and committed in slide-index order; the
//! document is written to disk only on [`DeckWriter::save`], so a failed
//! request never leaves a partially written deck behind.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Pt,
};

use deckgen_core::DeckError;

use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH};

/// The Helvetica family used for slide text.
pub struct DeckFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    bold_oblique: IndirectFontRef,
}

impl DeckFonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, DeckError> {
        Ok(Self {
            regular: add_font(doc, BuiltinFont::Helvetica)?,
            bold: add_font(doc, BuiltinFont::HelveticaBold)?,
            oblique: add_font(doc, BuiltinFont::HelveticaOblique)?,
            bold_oblique: add_font(doc, BuiltinFont::HelveticaBoldOblique)?,
        })
    }

    /// Resolves a span's styling to a registered font.
    pub fn for_span(&self, bold: bool, italic: bool) -> &IndirectFontRef {
        match (bold, italic) {
            (true, true) => &self.bold_oblique,
            (true, false) => &self.bold,
            (false, true) => &self.oblique,
            (false, false) => &self.regular,
        }
    }
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, DeckError> {
    doc.add_builtin_font(font)
        .map_err(|e| DeckError::Render(e.to_string()))
}

/// Owns the output document and sequences page emission.
pub struct DeckWriter {
    doc: PdfDocumentReference,
    fonts: DeckFonts,
    current: Option<(PdfPageIndex, PdfLayerIndex)>,
    committed: usize,
}

impl DeckWriter {
    /// Opens a fresh document with one blank 1024×768 pt page.
    pub fn new(title: &str) -> Result<Self, DeckError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm::from(Pt(PAGE_WIDTH)),
            Mm::from(Pt(PAGE_HEIGHT)),
            "Slide 1",
        );
        let fonts = DeckFonts::load(&doc)?;
        Ok(Self { doc, fonts, current: Some((page, layer)), committed: 0 })
    }

    pub fn fonts(&self) -> &DeckFonts {
        &self.fonts
    }

    /// Number of pages committed so far.
    pub fn page_count(&self) -> usize {
        self.committed
    }

    /// Returns the layer of the page being composed, starting a fresh
    /// page if the previous one was committed.
    pub fn start_page(&mut self) -> PdfLayerReference {
        let (page, layer) = match self.current {
            Some(indices) => indices,
            None => {
                let indices = self.doc.add_page(
                    Mm::from(Pt(PAGE_WIDTH)),
                    Mm::from(Pt(PAGE_HEIGHT)),
                    format!("Slide {}", self.committed + 1),
                );
                self.current = Some(indices);
                indices
            }
        };
        self.doc.get_page(page).get_layer(layer)
    }

    /// Finalizes the page under composition; the next [`start_page`]
    /// yields a blank canvas.
    ///
    /// [`start_page`]: DeckWriter::start_page
    pub fn commit_page(&mut self) {
        if self.current.take().is_some() {
            self.committed += 1;
        }
    }

    /// Writes the finished document to `path`, consuming the writer.
    pub fn save(self, path: &Path) -> Result<(), DeckError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| DeckError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_counted_per_commit() {
        let mut writer = DeckWriter::new("test deck").unwrap();
        assert_eq!(writer.page_count(), 0);

        let _ = writer.start_page();
        writer.commit_page();
        let _ = writer.start_page();
        writer.commit_page();
        assert_eq!(writer.page_count(), 2);
    }

    #[test]
    fn commit_without_a_started_page_is_a_no_op() {
        let mut writer = DeckWriter::new("test deck").unwrap();
        let _ = writer.start_page();
        writer.commit_page();
        writer.commit_page();
        assert_eq!(writer.page_count(), 1);
    }

    #[test]
    fn save_emits_a_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pdf");

        let mut writer = DeckWriter::new("test deck").unwrap();
        let layer = writer.start_page();
        let font = writer.fonts().for_span(false, false).clone();
        layer.use_text("hello", 18.0, Mm::from(Pt(100.0)), Mm::from(Pt(400.0)), &font);
        writer.commit_page();

        writer.save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
