//! Test utilities and shared fixtures.
//!
//! Deterministic random sources and misbehaving strategies used across the
//! unit tests of the renderer and producer.

#[cfg(any(test, feature = "testing"))]
use crate::config::StrategyError;
#[cfg(any(test, feature = "testing"))]
use crate::content::{CaptchaContent, ContentGenerator};
#[cfg(any(test, feature = "testing"))]
use crate::distort::Interferer;
#[cfg(any(test, feature = "testing"))]
use crate::style::Colorizer;
#[cfg(any(test, feature = "testing"))]
use image::{Rgb, RgbImage};
#[cfg(any(test, feature = "testing"))]
use rand::rngs::StdRng;
#[cfg(any(test, feature = "testing"))]
use rand::{RngCore, SeedableRng};
#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;
#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reproducible random source.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Always yields the same content.
#[cfg(any(test, feature = "testing"))]
pub struct FixedGenerator(pub CaptchaContent);

#[cfg(any(test, feature = "testing"))]
impl ContentGenerator for FixedGenerator {
    fn generate(&self, _rng: &mut dyn RngCore) -> CaptchaContent {
        self.0.clone()
    }
}

/// Interferer that always fails.
#[cfg(any(test, feature = "testing"))]
pub struct FailingInterferer;

#[cfg(any(test, feature = "testing"))]
impl Interferer for FailingInterferer {
    fn draw(&self, _canvas: &mut RgbImage, _rng: &mut dyn RngCore) -> Result<(), StrategyError> {
        Err("interferer exploded".into())
    }
}

/// Colorizer that always fails.
#[cfg(any(test, feature = "testing"))]
pub struct FailingColorizer;

#[cfg(any(test, feature = "testing"))]
impl Colorizer for FailingColorizer {
    fn next_color(&self, _rng: &mut dyn RngCore) -> Result<Rgb<u8>, StrategyError> {
        Err("out of ink".into())
    }
}

/// Black colorizer that counts how often it is asked for a color.
#[cfg(any(test, feature = "testing"))]
#[derive(Default)]
pub struct CountingColorizer {
    calls: Arc<AtomicUsize>,
}

#[cfg(any(test, feature = "testing"))]
impl CountingColorizer {
    /// Shared handle to the call counter.
    #[must_use]
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Colorizer for CountingColorizer {
    fn next_color(&self, _rng: &mut dyn RngCore) -> Result<Rgb<u8>, StrategyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Rgb([0, 0, 0]))
    }
}
