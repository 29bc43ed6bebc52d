//! Random alphanumeric challenges.

use crate::config::{CaptchaError, Result};
use crate::content::{CaptchaContent, ContentGenerator};
use rand::{Rng, RngCore};

pub(crate) const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws `length` characters uniformly from the 62-symbol alphanumeric set.
///
/// The drawn text is the answer itself.
#[derive(Debug, Clone, Copy)]
pub struct CharGenerator {
    length: usize,
}

impl Default for CharGenerator {
    fn default() -> Self {
        Self { length: 4 }
    }
}

impl CharGenerator {
    /// Creates a generator producing answers of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` if `length` is zero.
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(CaptchaError::config("length must be greater than 0"));
        }
        Ok(Self { length })
    }

    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }
}

impl ContentGenerator for CharGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> CaptchaContent {
        let text: String = (0..self.length)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();
        CaptchaContent::new(text.clone(), text)
    }
}
