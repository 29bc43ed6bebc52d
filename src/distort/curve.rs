//! Cubic Bezier curves spanning the canvas.
//!
//! Each curve runs from near the left edge to near the right edge with its
//! control points in the second and third quarters, giving smooth strokes that
//! cut across the text.

use crate::config::StrategyError;
use crate::distort::Interferer;
use crate::distort::stroke::{below, stroke_polyline};
use crate::style::color::full_range_rgb;
use image::RgbImage;
use rand::RngCore;

const EDGE_INSET: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
pub struct BezierInterferer {
    count: usize,
    stroke_width: f64,
}

impl Default for BezierInterferer {
    fn default() -> Self {
        Self::new(2)
    }
}

impl BezierInterferer {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            count,
            stroke_width: 2.0,
        }
    }

    #[must_use]
    pub const fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }
}

/// Anchor and control points of one curve on a canvas of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Curve {
    start: (f64, f64),
    ctrl_a: (f64, f64),
    ctrl_b: (f64, f64),
    end: (f64, f64),
}

impl Curve {
    fn random(rng: &mut dyn RngCore, width: u32, height: u32) -> Self {
        let quarter = width / 4;
        Self {
            start: (EDGE_INSET, f64::from(below(rng, height))),
            end: (
                f64::from(width) - EDGE_INSET,
                f64::from(below(rng, height)),
            ),
            ctrl_a: (
                f64::from(below(rng, quarter) + quarter),
                f64::from(below(rng, height)),
            ),
            ctrl_b: (
                f64::from(below(rng, quarter) + width / 2),
                f64::from(below(rng, height)),
            ),
        }
    }

    fn point_at(&self, t: f64) -> (f64, f64) {
        cubic_point(self.start, self.ctrl_a, self.ctrl_b, self.end, t)
    }
}

fn cubic_point(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

impl Interferer for BezierInterferer {
    fn draw(&self, canvas: &mut RgbImage, rng: &mut dyn RngCore) -> Result<(), StrategyError> {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let segments = (width / 8).clamp(16, 256);

        for _ in 0..self.count {
            let color = full_range_rgb(rng);
            let curve = Curve::random(rng, width, height);
            let points: Vec<(f64, f64)> = (0..=segments)
                .map(|i| curve.point_at(f64::from(i) / f64::from(segments)))
                .collect();
            stroke_polyline(canvas, &points, self.stroke_width, color);
        }
        Ok(())
    }
}
