//! Salt-and-pepper dots.

use crate::config::{CaptchaError, Result, StrategyError};
use crate::distort::Interferer;
use crate::style::color::full_range_rgb;
use image::RgbImage;
use rand::{Rng, RngCore};

/// Plants `area * density / 100` single-pixel dots of random color.
///
/// `density` is an occlusion ratio, not a per-pixel probability; values in
/// `0.1..=1.0` are typical.
#[derive(Debug, Clone, Copy)]
pub struct NoiseInterferer {
    density: f32,
}

impl Default for NoiseInterferer {
    fn default() -> Self {
        Self { density: 0.7 }
    }
}

impl NoiseInterferer {
    /// # Errors
    ///
    /// Returns `CaptchaError::Config` if `density` is negative or not finite.
    pub fn new(density: f32) -> Result<Self> {
        if !density.is_finite() || density < 0.0 {
            return Err(CaptchaError::config(format!(
                "noise density must be a non-negative number, got {density}"
            )));
        }
        Ok(Self { density })
    }

    #[must_use]
    pub const fn density(&self) -> f32 {
        self.density
    }

    /// Number of dots planted on a `width` x `height` canvas.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn point_count(&self, width: u32, height: u32) -> u32 {
        let area = u64::from(width) * u64::from(height);
        (area as f32 * self.density / 100.0) as u32
    }
}

impl Interferer for NoiseInterferer {
    fn draw(
        &self,
        canvas: &mut RgbImage,
        rng: &mut dyn RngCore,
    ) -> std::result::Result<(), StrategyError> {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        for _ in 0..self.point_count(width, height) {
            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            canvas.put_pixel(x, y, full_range_rgb(rng));
        }
        Ok(())
    }
}
