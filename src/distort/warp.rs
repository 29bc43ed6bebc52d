//! Sine-wave strokes.
//!
//! Each wave gets its own amplitude, period and phase and is sampled once per
//! horizontal pixel, so it spans the full width of the canvas.

use crate::config::StrategyError;
use crate::distort::Interferer;
use crate::distort::stroke::stroke_polyline;
use crate::style::color::random_rgb;
use image::RgbImage;
use rand::{Rng, RngCore};
use std::f64::consts::TAU;

const WAVE_COLOR_CEILING: u8 = 150;

#[derive(Debug, Clone, Copy)]
pub struct WarpInterferer {
    line_count: usize,
    stroke_width: f64,
}

impl Default for WarpInterferer {
    fn default() -> Self {
        Self::new(3, 1.8)
    }
}

impl WarpInterferer {
    #[must_use]
    pub const fn new(line_count: usize, stroke_width: f64) -> Self {
        Self {
            line_count,
            stroke_width,
        }
    }
}

/// Parameters of a single wave on a canvas of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Wave {
    amplitude: f64,
    period: f64,
    phase: f64,
    baseline: f64,
}

impl Wave {
    fn random(rng: &mut dyn RngCore, width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            amplitude: rng.random::<f64>().mul_add(h / 4.0, h / 8.0),
            period: rng.random::<f64>().mul_add(w / 2.0, w / 4.0),
            phase: rng.random::<f64>() * TAU,
            baseline: h / 2.0,
        }
    }

    fn y_at(&self, x: f64) -> f64 {
        (x / self.period)
            .mul_add(TAU, self.phase)
            .sin()
            .mul_add(self.amplitude, self.baseline)
    }
}

impl Interferer for WarpInterferer {
    fn draw(&self, canvas: &mut RgbImage, rng: &mut dyn RngCore) -> Result<(), StrategyError> {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        for _ in 0..self.line_count {
            let color = random_rgb(rng, WAVE_COLOR_CEILING);
            let wave = Wave::random(rng, width, height);
            let points: Vec<(f64, f64)> = (0..width)
                .map(|x| {
                    let x = f64::from(x);
                    (x, wave.y_at(x))
                })
                .collect();
            stroke_polyline(canvas, &points, self.stroke_width, color);
        }
        Ok(())
    }
}
