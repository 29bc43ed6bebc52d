//! Text styling strategies.
//!
//! Colorizers pick ink colors for the challenge text; font providers pick the
//! face and base size it is set in.

pub mod color;
pub mod font;

pub use color::{Colorizer, RandomColorizer};
pub use font::{DefaultFontProvider, FontAsset, FontFace, FontProvider, RandomFontProvider};
