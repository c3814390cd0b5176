//! Instruction builders for the generation phases.

/// Ordinal suffix for a 1-based slide number (1st, 2nd, 3rd, 4th, ...).
pub fn ordinal_suffix(n: usize) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Instruction for one slide's text: ordinal-qualified, Wikipedia-style,
/// no meta-commentary.
pub fn text_instruction(slide_index: usize, prompt: &str) -> String {
    let n = slide_index + 1;
    format!(
        "Assume you're the Wikipedia Bot. Give me only the {n}{} slide content \
         generated like human without any prompt text for '{prompt}'",
        ordinal_suffix(n)
    )
}

/// Instruction for one slide's image, referencing the slide's position and
/// its own generated text.
pub fn image_instruction(slide_index: usize, total_slides: usize, slide_text: &str) -> String {
    format!(
        "Generate relevant images for the {}/{} slide content for '{}'",
        slide_index + 1,
        total_slides,
        slide_text
    )
}
