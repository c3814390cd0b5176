//! Paragraph styles for slide text.

/// Font metrics and spacing for a slide's text frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f32,
    /// Line height in points.
    pub leading: f32,
    /// Space above each block, in points.
    pub space_before: f32,
    /// Space below each block, in points.
    pub space_after: f32,
}

/// Style for the opening slide.
pub const HEADING: TextStyle = TextStyle {
    font_size: 22.0,
    leading: 22.0,
    space_before: 0.0,
    space_after: 12.0,
};

/// Style for every other slide.
pub const BODY: TextStyle = TextStyle {
    font_size: 18.0,
    leading: 18.0,
    space_before: 12.0,
    space_after: 12.0,
};

/// Heading style for slide 0, body style for all later slides.
pub fn style_for_slide(index: usize) -> &'static TextStyle {
    if index == 0 {
        &HEADING
    } else {
        &BODY
    }
}
