//! Image synthesis.
//!
//! Text and distortion are painted onto a supersampled canvas which is then
//! filtered down to the requested size.

pub mod layout;
pub mod renderer;

pub use layout::TextMetrics;
pub use renderer::{DEFAULT_SCALE, MAX_CANVAS_PIXELS, Renderer};
