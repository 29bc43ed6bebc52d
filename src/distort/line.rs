//! Random straight lines.

use crate::config::StrategyError;
use crate::distort::Interferer;
use crate::distort::stroke::stroke_segment;
use crate::style::color::full_range_rgb;
use image::RgbImage;
use rand::{Rng, RngCore};

/// Draws `count` segments with random endpoints and random colors.
#[derive(Debug, Clone, Copy)]
pub struct LineInterferer {
    count: usize,
    stroke_width: f64,
}

impl Default for LineInterferer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl LineInterferer {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            count,
            stroke_width: 1.5,
        }
    }

    #[must_use]
    pub const fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }
}

impl Interferer for LineInterferer {
    fn draw(&self, canvas: &mut RgbImage, rng: &mut dyn RngCore) -> Result<(), StrategyError> {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        for _ in 0..self.count {
            let color = full_range_rgb(rng);
            let from = (
                f64::from(rng.random_range(0..width)),
                f64::from(rng.random_range(0..height)),
            );
            let to = (
                f64::from(rng.random_range(0..width)),
                f64::from(rng.random_range(0..height)),
            );
            stroke_segment(canvas, from, to, self.stroke_width, color);
        }
        Ok(())
    }
}
