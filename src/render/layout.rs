//! Text measurement and placement.

use crate::content::CaptchaContent;
use crate::style::FontFace;
use ab_glyph::{Font, GlyphId, PxScale, ScaleFont};

/// Horizontal extent and vertical line metrics of a string in a given face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

impl TextMetrics {
    /// Full line height: ascent plus descent plus leading.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}

/// Measures `text` set in `face`, kerning included.
#[must_use]
pub fn measure(face: &FontFace, text: &str) -> TextMetrics {
    let scaled = face.font().as_scaled(PxScale::from(face.size()));

    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }

    TextMetrics {
        width,
        ascent: scaled.ascent(),
        descent: scaled.descent(),
        line_gap: scaled.line_gap(),
    }
}

/// Advance width of a single character.
#[must_use]
pub fn advance(face: &FontFace, ch: char) -> f32 {
    let scaled = face.font().as_scaled(PxScale::from(face.size()));
    scaled.h_advance(scaled.glyph_id(ch))
}

/// Top-left pen position that centres the text on a canvas.
///
/// The y coordinate is the top of the line box; the baseline sits `ascent` below it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centered_origin(canvas_width: u32, canvas_height: u32, metrics: &TextMetrics) -> (f32, f32) {
    let x = (canvas_width as f32 - metrics.width) / 2.0;
    let y = (canvas_height as f32 - metrics.line_height()) / 2.0;
    (x, y)
}

/// Whether each character gets its own color.
///
/// Only when the drawn text is literally the answer's characters: more than one
/// of them and the same count as the answer.
#[must_use]
pub fn colors_per_character(content: &CaptchaContent) -> bool {
    let drawn = content.draw_text().chars().count();
    drawn > 1 && drawn == content.answer().chars().count()
}
