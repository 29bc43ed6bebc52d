//! Challenge content generation.
//!
//! A generator decides what the solver must type (the answer) and what is
//! actually painted onto the image (the draw text). The two differ for
//! arithmetic challenges, where the expression is drawn and its result is the answer.

pub mod alphabet;
pub mod arithmetic;

pub use alphabet::CharGenerator;
pub use arithmetic::{ArithmeticGenerator, Operator};

use rand::RngCore;

/// Answer and draw text for a single challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaContent {
    answer: String,
    draw_text: String,
}

impl CaptchaContent {
    /// Pairs an answer with the text to render.
    ///
    /// Generators always pass non-empty strings.
    #[must_use]
    pub fn new(answer: impl Into<String>, draw_text: impl Into<String>) -> Self {
        let content = Self {
            answer: answer.into(),
            draw_text: draw_text.into(),
        };
        debug_assert!(!content.answer.is_empty() && !content.draw_text.is_empty());
        content
    }

    /// The value checked against user input.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The text painted onto the image.
    #[must_use]
    pub fn draw_text(&self) -> &str {
        &self.draw_text
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.answer, self.draw_text)
    }
}

/// Produces fresh challenge content.
///
/// Implementations must not fail and must not depend on state other than the
/// supplied random source, so a single instance can serve concurrent renders.
pub trait ContentGenerator: Send + Sync {
    fn generate(&self, rng: &mut dyn RngCore) -> CaptchaContent;
}
