//! Stacked interferers.

use crate::config::StrategyError;
use crate::distort::Interferer;
use image::RgbImage;
use rand::RngCore;
use std::sync::Arc;

/// Runs an ordered list of interferers on the same canvas.
///
/// Absent entries are skipped. Order only affects which layer paints on top.
#[derive(Clone, Default)]
pub struct CompositeInterferer {
    layers: Vec<Option<Arc<dyn Interferer>>>,
}

impl CompositeInterferer {
    #[must_use]
    pub fn new(layers: Vec<Option<Arc<dyn Interferer>>>) -> Self {
        Self { layers }
    }

    /// Appends a layer.
    #[must_use]
    pub fn with(mut self, layer: impl Interferer + 'static) -> Self {
        let layer: Arc<dyn Interferer> = Arc::new(layer);
        self.layers.push(Some(layer));
        self
    }

    /// Number of configured layers, absent ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl FromIterator<Arc<dyn Interferer>> for CompositeInterferer {
    fn from_iter<T: IntoIterator<Item = Arc<dyn Interferer>>>(iter: T) -> Self {
        Self {
            layers: iter.into_iter().map(Some).collect(),
        }
    }
}

impl Interferer for CompositeInterferer {
    fn draw(&self, canvas: &mut RgbImage, rng: &mut dyn RngCore) -> Result<(), StrategyError> {
        for layer in self.layers.iter().flatten() {
            layer.draw(canvas, rng)?;
        }
        Ok(())
    }
}
