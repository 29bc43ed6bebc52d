//! Library definitions.
//!
//! Exports the content, distortion, styling and rendering modules along with
//! the `Producer` entry point.

pub mod config;
pub mod content;
pub mod distort;
pub mod producer;
pub mod render;
pub mod style;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
pub use config::{CaptchaError, GeneratorKind, InterfererKind, Result, Settings, StrategyError};
pub use content::{
    ArithmeticGenerator, CaptchaContent, CharGenerator, ContentGenerator, Operator,
};
pub use distort::{
    BezierInterferer, CompositeInterferer, Interferer, LineInterferer, NoiseInterferer,
    WarpInterferer,
};
pub use producer::{
    PNG_DATA_URI_PREFIX, Producer, RenderConfig, RenderConfigBuilder, RenderedCaptcha,
};
pub use render::{DEFAULT_SCALE, MAX_CANVAS_PIXELS, Renderer};
pub use style::{
    Colorizer, DefaultFontProvider, FontAsset, FontFace, FontProvider, RandomColorizer,
    RandomFontProvider,
};
