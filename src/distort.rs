//! Visual interference.
//!
//! Interferers paint noise onto the working canvas before the text is set.
//! They run at supersampled resolution and read the canvas size themselves,
//! so their geometry scales with the text.

pub mod composite;
pub mod curve;
pub mod line;
pub mod noise;
pub(crate) mod stroke;
pub mod warp;

pub use composite::CompositeInterferer;
pub use curve::BezierInterferer;
pub use line::LineInterferer;
pub use noise::NoiseInterferer;
pub use warp::WarpInterferer;

use crate::config::StrategyError;
use image::RgbImage;
use rand::RngCore;

/// Draws distortion onto a canvas.
///
/// Built-in interferers accept any canvas size (including degenerate ones) and
/// never fail. A custom interferer that returns an error aborts the render.
pub trait Interferer: Send + Sync {
    /// # Errors
    ///
    /// Returns the strategy's own error; the renderer wraps it as a generation error.
    fn draw(&self, canvas: &mut RgbImage, rng: &mut dyn RngCore) -> Result<(), StrategyError>;
}
