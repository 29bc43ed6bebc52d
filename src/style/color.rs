//! Text colorizers.

use crate::config::StrategyError;
use image::Rgb;
use rand::{Rng, RngCore};

/// Supplies ink colors, one call per drawn character or per drawn string.
pub trait Colorizer: Send + Sync {
    /// Returns the next color to draw with.
    ///
    /// # Errors
    ///
    /// Custom colorizers may fail; the render is aborted and the error surfaces
    /// as a generation error.
    fn next_color(&self, rng: &mut dyn RngCore) -> Result<Rgb<u8>, StrategyError>;
}

/// Random dark colors, each channel drawn from `0..ceiling`.
///
/// Keeping channels low keeps the text legible on a light background.
#[derive(Debug, Clone, Copy)]
pub struct RandomColorizer {
    ceiling: u8,
}

impl Default for RandomColorizer {
    fn default() -> Self {
        Self { ceiling: 150 }
    }
}

impl RandomColorizer {
    /// Creates a colorizer with channels in `0..ceiling`. A zero ceiling always yields black.
    #[must_use]
    pub const fn with_ceiling(ceiling: u8) -> Self {
        Self { ceiling }
    }
}

impl Colorizer for RandomColorizer {
    fn next_color(&self, rng: &mut dyn RngCore) -> Result<Rgb<u8>, StrategyError> {
        Ok(random_rgb(rng, self.ceiling))
    }
}

/// Draws each channel uniformly from `0..ceiling`.
pub(crate) fn random_rgb(rng: &mut dyn RngCore, ceiling: u8) -> Rgb<u8> {
    if ceiling == 0 {
        return Rgb([0, 0, 0]);
    }
    let mut channel = || rng.random_range(0..ceiling);
    Rgb([channel(), channel(), channel()])
}

/// Draws each channel uniformly from `0..=255`.
pub(crate) fn full_range_rgb(rng: &mut dyn RngCore) -> Rgb<u8> {
    Rgb([rng.random(), rng.random(), rng.random()])
}
